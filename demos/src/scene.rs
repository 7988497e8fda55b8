use thiserror::Error;
use winit::event::VirtualKeyCode;

use cookbook::config::DemoConfig;
use cookbook::image::ImageError;

use gl_wrapper::geometry::GBError;
use gl_wrapper::program::{PBError, UniformError};
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::TextureError;
use gl_wrapper::uniform_buffer::BlockError;

use crate::args::DemoKind;
use crate::input::KeyState;
use crate::scenes;

/// Timing of the frame being prepared, in seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    pub time: f32,
    pub dt: f32,
}

/// Size of the surface being rendered to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

pub trait Demo {
    fn update(&mut self, _frame: &Frame, _keys: &KeyState) {}

    fn render(&mut self, renderer: &mut GlRenderer, viewport: Viewport) -> Result<(), SceneError>;

    /// Called once per key press, held keys are in [`KeyState`].
    fn key(&mut self, _key: VirtualKeyCode) {}

    fn mouse_motion(&mut self, _dx: f32, _dy: f32) {}

    fn scroll(&mut self, _dy: f32) {}

    /// Whether `Tab` may capture the cursor for this demo.
    fn uses_mouse(&self) -> bool {
        false
    }
}

/// Creates the demo, a GL context must be current.
pub fn build(kind: DemoKind, config: &DemoConfig) -> Result<Box<dyn Demo>, SceneError> {
    let demo: Box<dyn Demo> = match kind {
        DemoKind::Clear => Box::new(scenes::clear::Clear),
        DemoKind::Point => Box::new(scenes::point::Point::new()?),
        DemoKind::Triangle => Box::new(scenes::triangle::Triangle::new()?),
        DemoKind::CubeSwarm => Box::new(scenes::cube_swarm::CubeSwarm::new(config)?),
        DemoKind::CubePyramid => Box::new(scenes::cube_pyramid::CubePyramid::new(config)?),
        DemoKind::SpinningCube => Box::new(scenes::spinning_cube::SpinningCube::new()?),
        DemoKind::UniformBlock => Box::new(scenes::uniform_block::UniformBlockDemo::new()?),
        DemoKind::Skydome => Box::new(scenes::skydome::Skydome::new(config)?),
        DemoKind::Skybox => Box::new(scenes::skybox::Skybox::new(config)?),
    };

    log::info!("Started demo '{}'", kind.title());

    Ok(demo)
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Could not build shader program: {0}")]
    Program(#[from] PBError),
    #[error("Could not build geometry: {0}")]
    Geometry(#[from] GBError),
    #[error(transparent)]
    Uniform(#[from] UniformError),
    #[error("Could not create texture: {0}")]
    Texture(#[from] TextureError),
    #[error("Could not fill uniform block: {0}")]
    Block(#[from] BlockError),
    #[error(transparent)]
    Image(#[from] ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_viewport_has_finite_aspect() {
        let viewport = Viewport {
            width: 640,
            height: 0,
        };

        assert_eq!(viewport.aspect(), 640.0);
    }
}
