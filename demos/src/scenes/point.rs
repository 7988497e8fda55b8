use rand::rngs::SmallRng;
use rand::SeedableRng;
use winit::event::VirtualKeyCode;

use cookbook::transform::{lerp, random_float};

use gl_wrapper::geometry::{Geometry, GeometryBuilder, Primitive};
use gl_wrapper::program::{Program, ProgramBuilder};
use gl_wrapper::renderer::GlRenderer;

use crate::input::KeyState;
use crate::scene::{Demo, Frame, SceneError, Viewport};

const START_SIZE: f32 = 30.0;
const MIN_SIZE: f32 = 10.0;
const MAX_SIZE: f32 = 60.0;
// color split sits at 295 px of a 600 px wide window
const SPLIT: f32 = 295.0 / 600.0;

/// A single point at the origin, colored by which side of the split a fragment is on.
pub struct Point {
    program: Program,
    geometry: Geometry,
    size: f32,
    target: f32,
    rng: SmallRng,
}

impl Point {
    pub fn new() -> Result<Self, SceneError> {
        let program = ProgramBuilder::new(
            include_str!("../gl_shaders/point.vert"),
            include_str!("../gl_shaders/point.frag"),
        )
        .build()?;

        let geometry = GeometryBuilder::attributeless(1)
            .with_primitive(Primitive::Points)
            .build()?;

        Ok(Self {
            program,
            geometry,
            size: START_SIZE,
            target: START_SIZE,
            rng: SmallRng::from_entropy(),
        })
    }
}

impl Demo for Point {
    fn update(&mut self, frame: &Frame, _keys: &KeyState) {
        self.size = lerp(self.size, self.target, (frame.dt * 8.0).min(1.0));
    }

    fn render(&mut self, renderer: &mut GlRenderer, viewport: Viewport) -> Result<(), SceneError> {
        renderer.set_program_point_size(true);
        renderer.clear_color(0.0, 0.0, 0.0);

        self.program.set_uniform("point_size", self.size)?;
        self.program
            .set_uniform("split_x", viewport.width as f32 * SPLIT)?;

        renderer.draw(&self.geometry, &self.program);

        Ok(())
    }

    fn key(&mut self, key: VirtualKeyCode) {
        if key == VirtualKeyCode::Space {
            self.target = random_float(&mut self.rng, MIN_SIZE, MAX_SIZE);
            log::debug!("Point size {:.1}", self.target);
        }
    }
}
