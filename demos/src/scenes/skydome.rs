use cgmath::Vector3;
use winit::event::VirtualKeyCode;

use cookbook::camera::{Direction, FlyCamera};
use cookbook::config::DemoConfig;
use cookbook::mesh::Sphere;
use cookbook::transform::identity;

use gl_wrapper::geometry::{Geometry, GeometryBuilder, Primitive, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder};
use gl_wrapper::renderer::{DepthFunc, GlRenderer};

use crate::input::{drive_camera, KeyState};
use crate::scene::{Demo, Frame, SceneError, Viewport};

const RADIUS: f32 = 10.0;
const STACKS: usize = 64;
const SLICES: usize = 64;

/// Gradient sky and water painted on the inside of a sphere.
pub struct Skydome {
    program: Program,
    dome: Geometry,
    strips: Vec<(usize, usize)>,
    camera: FlyCamera,
    show_sky: bool,
    show_water: bool,
    clear: [f32; 3],
}

impl Skydome {
    pub fn new(config: &DemoConfig) -> Result<Self, SceneError> {
        let program = ProgramBuilder::new(
            include_str!("../gl_shaders/skydome.vert"),
            include_str!("../gl_shaders/skydome.frag"),
        )
        .build()?;

        let sphere = Sphere::new(RADIUS, STACKS, SLICES);
        let dome = GeometryBuilder::new(sphere.vertices())
            .with_attribute(VertexAttribute::Vec3)
            .with_primitive(Primitive::TriangleStrip)
            .build()?;

        program.set_uniform("model", identity())?;
        program.set_uniform("radius", RADIUS)?;

        let mut camera = FlyCamera::new(Vector3::new(0.0, 0.0, 0.0));
        camera.speed = config.camera_speed;
        camera.sensitivity = config.mouse_sensitivity;

        Ok(Self {
            program,
            dome,
            strips: sphere.strips().collect(),
            camera,
            show_sky: true,
            show_water: true,
            clear: config.clear_color,
        })
    }
}

impl Demo for Skydome {
    fn update(&mut self, frame: &Frame, keys: &KeyState) {
        drive_camera(&mut self.camera, keys, frame.dt);

        if keys.is_down(VirtualKeyCode::E) {
            self.camera.process_keyboard(Direction::Up, frame.dt);
        }
        if keys.is_down(VirtualKeyCode::Q) {
            self.camera.process_keyboard(Direction::Down, frame.dt);
        }
    }

    fn render(&mut self, renderer: &mut GlRenderer, viewport: Viewport) -> Result<(), SceneError> {
        let [r, g, b] = self.clear;
        renderer.set_depth_test(Some(DepthFunc::Less));
        renderer.clear_color(r, g, b);

        let projection = self.camera.projection(viewport.aspect(), 0.1, 100.0);

        self.program.set_uniform("view", self.camera.view_matrix())?;
        self.program.set_uniform("projection", projection)?;
        self.program.set_uniform("show_sky", self.show_sky)?;
        self.program.set_uniform("show_water", self.show_water)?;

        for &(first, count) in &self.strips {
            renderer.draw_range(&self.dome, &self.program, first, count);
        }

        Ok(())
    }

    fn key(&mut self, key: VirtualKeyCode) {
        match key {
            VirtualKeyCode::Key1 => {
                self.show_sky = !self.show_sky;
                log::info!("Sky {}", if self.show_sky { "on" } else { "off" });
            }
            VirtualKeyCode::Key2 => {
                self.show_water = !self.show_water;
                log::info!("Water {}", if self.show_water { "on" } else { "off" });
            }
            _ => {}
        }
    }

    fn mouse_motion(&mut self, dx: f32, dy: f32) {
        self.camera.process_mouse(dx, dy);
    }

    fn scroll(&mut self, dy: f32) {
        self.camera.process_scroll(dy);
    }

    fn uses_mouse(&self) -> bool {
        true
    }
}
