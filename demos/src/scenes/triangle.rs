use cgmath::Vector4;

use cookbook::animation::Oscillator;
use cookbook::mesh::TRIANGLE;

use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder};
use gl_wrapper::renderer::GlRenderer;

use crate::input::KeyState;
use crate::scene::{Demo, Frame, SceneError, Viewport};

/// Blue triangle sliding back and forth along x.
pub struct Triangle {
    program: Program,
    geometry: Geometry,
    oscillator: Oscillator,
}

impl Triangle {
    pub fn new() -> Result<Self, SceneError> {
        let program = ProgramBuilder::new(
            include_str!("../gl_shaders/triangle.vert"),
            include_str!("../gl_shaders/solid.frag"),
        )
        .build()?;

        program.set_uniform("fill", Vector4::new(0.0, 0.0, 1.0, 1.0))?;

        let geometry = GeometryBuilder::new(&TRIANGLE)
            .with_attribute(VertexAttribute::Vec3)
            .build()?;

        Ok(Self {
            program,
            geometry,
            oscillator: Oscillator::default(),
        })
    }
}

impl Demo for Triangle {
    fn update(&mut self, _frame: &Frame, _keys: &KeyState) {
        self.oscillator.tick();
    }

    fn render(&mut self, renderer: &mut GlRenderer, _viewport: Viewport) -> Result<(), SceneError> {
        renderer.clear_color(0.0, 0.0, 0.0);

        self.program
            .set_uniform("offset", self.oscillator.position)?;
        renderer.draw(&self.geometry, &self.program);

        Ok(())
    }
}
