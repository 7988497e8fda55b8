use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::CString;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{DeviceEvent, Event, MouseScrollDelta, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::{CursorGrabMode, Window, WindowBuilder};

use cookbook::animation::FrameClock;
use cookbook::config::{ConfigError, DemoConfig};
use cookbook::image::ImageError;

use gl_wrapper::error::check_errors;
use gl_wrapper::framebuffer::{FrameBuffer, FrameBufferError};
use gl_wrapper::renderer::GlRenderer;

use crate::input::KeyState;
use crate::scene::{Demo, Frame, SceneError, Viewport};
use crate::screenshot;

// pixels of a trackpad scroll counted as one wheel line
const PIXELS_PER_LINE: f32 = 20.0;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    screenshot_dir: PathBuf,
}

impl App {
    /// Opens the window and makes a GL 4.3 context current on it.
    pub fn new(config: &DemoConfig, title: &str) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(
                config.width,
                config.height,
            )))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
            .with_title(config.title.as_deref().unwrap_or(title));
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new().with_depth_size(24);

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                // glutin wants a config back and offers no error path, an empty
                // list means the display cannot draw at all
                most_samples(configs, |c| c.num_samples()).expect("display offered no GL configs")
            })
            .map_err(|e| AppError::Window(e.to_string()))?;

        let window = window.ok_or_else(|| AppError::Window("no window was created".into()))?;
        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(4, 3))))
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        let interval = match NonZeroU32::new(1) {
            Some(one) if config.vsync => SwapInterval::Wait(one),
            _ => SwapInterval::DontWait,
        };
        if let Err(e) = gl_window.surface.set_swap_interval(&gl_context, interval) {
            log::warn!("Could not set swap interval: {e}");
        }

        gl::load_with(|s| match CString::new(s) {
            Ok(name) => gl_display.get_proc_address(name.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        log::info!(
            "Created {}x{} window, vsync {}",
            config.width,
            config.height,
            if config.vsync { "on" } else { "off" }
        );

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            screenshot_dir: config.screenshot_dir.clone(),
        })
    }

    pub fn run(self, mut demo: Box<dyn Demo>) -> ! {
        let Self {
            event_loop,
            gl_context,
            gl_window,
            screenshot_dir,
        } = self;

        let mut renderer = GlRenderer::new();
        let mut keys = KeyState::default();
        let mut clock = FrameClock::new();
        let mut shot_buffer: Option<FrameBuffer> = None;
        let mut captured = false;
        let mut first_frame = true;

        let (width, height): (u32, u32) = gl_window.window.inner_size().into();
        let mut viewport = Viewport { width, height };
        renderer.resize(width, height);

        event_loop.run(move |event, _window_target, control_flow| {
            control_flow.set_poll();
            match event {
                Event::MainEventsCleared => {
                    let (time, dt) = clock.tick();
                    demo.update(&Frame { time, dt }, &keys);
                    gl_window.window.request_redraw();
                }
                Event::RedrawRequested(_) => {
                    if let Err(e) = demo.render(&mut renderer, viewport) {
                        log::error!("Rendering failed: {e}");
                        control_flow.set_exit_with_code(1);
                        return;
                    }

                    if first_frame {
                        check_errors("first frame");
                        first_frame = false;
                    }

                    if let Err(e) = gl_window.surface.swap_buffers(&gl_context) {
                        log::error!("Could not swap buffers: {e}");
                        control_flow.set_exit_with_code(1);
                    }
                }
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta: (dx, dy) },
                    ..
                } if captured => {
                    // window y grows downwards
                    demo.mouse_motion(dx as f32, -dy as f32);
                }
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(size) => {
                        if let (Some(w), Some(h)) =
                            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                        {
                            gl_window.surface.resize(&gl_context, w, h);
                            renderer.resize(size.width, size.height);
                            viewport = Viewport {
                                width: size.width,
                                height: size.height,
                            };
                        }
                    }
                    WindowEvent::Focused(false) => {
                        keys.clear();
                        if captured {
                            captured = gl_window.set_capture(false);
                        }
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        let Some(key) = input.virtual_keycode else {
                            return;
                        };

                        if !keys.handle(key, input.state) {
                            return;
                        }

                        match key {
                            VirtualKeyCode::Escape => control_flow.set_exit(),
                            VirtualKeyCode::Tab if demo.uses_mouse() => {
                                captured = gl_window.set_capture(!captured);
                            }
                            VirtualKeyCode::F12 => {
                                match take_screenshot(
                                    demo.as_mut(),
                                    &mut renderer,
                                    &mut shot_buffer,
                                    viewport,
                                    &screenshot_dir,
                                ) {
                                    Ok(path) => log::info!("Saved screenshot to {path:?}"),
                                    Err(e) => log::error!("Screenshot failed: {e}"),
                                }
                                check_errors("screenshot");
                            }
                            _ => demo.key(key),
                        }
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let dy = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                        };
                        demo.scroll(dy);
                    }
                    WindowEvent::CloseRequested => control_flow.set_exit(),
                    _ => (),
                },
                _ => (),
            }
        })
    }
}

/// Picks the entry with the most samples, the first one wins ties.
fn most_samples<T>(items: impl Iterator<Item = T>, samples: impl Fn(&T) -> u8) -> Option<T> {
    items.reduce(|best, c| if samples(&c) > samples(&best) { c } else { best })
}

/// Renders one frame off-screen at window size and writes it as a PNG.
fn take_screenshot(
    demo: &mut dyn Demo,
    renderer: &mut GlRenderer,
    buffer: &mut Option<FrameBuffer>,
    viewport: Viewport,
    dir: &Path,
) -> Result<PathBuf, AppError> {
    let Viewport { width, height } = viewport;

    let fb = match buffer.take() {
        Some(mut fb) => {
            if fb.size() != (width, height) {
                fb.resize(width, height)?;
            }
            fb
        }
        None => FrameBuffer::new(width, height)?,
    };

    fb.bind();
    let rendered = demo.render(renderer, viewport);
    FrameBuffer::bind_default();
    renderer.resize(width, height);
    rendered?;

    let pixels = fb.read_pixels();
    *buffer = Some(fb);

    Ok(screenshot::save_png(dir, width, height, pixels)?)
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let (width, height) = NonZeroU32::new(width)
            .zip(NonZeroU32::new(height))
            .ok_or(AppError::EmptyWindow)?;

        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            width,
            height,
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }

    /// Grabs or releases the cursor, returns whether it is now captured.
    pub fn set_capture(&self, capture: bool) -> bool {
        if !capture {
            if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
                log::warn!("Could not release cursor: {e}");
            }
            self.window.set_cursor_visible(true);
            return false;
        }

        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Locked));

        match grabbed {
            Ok(()) => {
                self.window.set_cursor_visible(false);
                true
            }
            Err(e) => {
                log::warn!("Could not capture cursor: {e}");
                false
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not create window: {0}")]
    Window(String),
    #[error("Window has no area")]
    EmptyWindow,
    #[error("OpenGL context error: {0}")]
    Context(#[from] glutin::error::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    FrameBuffer(#[from] FrameBufferError),
    #[error("Could not save screenshot: {0}")]
    Screenshot(#[from] ImageError),
}
