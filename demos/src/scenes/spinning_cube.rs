use cgmath::{Matrix4, Vector3, Vector4};

use cookbook::mesh::CUBE_UNIT;
use cookbook::transform::{identity, perspective, rotate, translate};

use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder};
use gl_wrapper::renderer::{DepthFunc, GlRenderer};

use crate::input::KeyState;
use crate::scene::{Demo, Frame, SceneError, Viewport};

const CLEAR: [f32; 3] = [0.2, 0.3, 0.3];

fn projection(aspect: f32) -> Matrix4<f32> {
    perspective(45f32.to_radians(), aspect, 0.01, 1000.0)
}

pub struct SpinningCube {
    program: Program,
    cube: Geometry,
    time: f32,
}

impl SpinningCube {
    pub fn new() -> Result<Self, SceneError> {
        let program = ProgramBuilder::new(
            include_str!("../gl_shaders/mvp.vert"),
            include_str!("../gl_shaders/solid.frag"),
        )
        .build()?;

        program.set_uniform("fill", Vector4::new(1.0, 0.5, 0.2, 1.0))?;
        program.set_uniform("view", translate(identity(), 0.0, 0.0, -3.0))?;

        let cube = GeometryBuilder::new(&CUBE_UNIT)
            .with_attribute(VertexAttribute::Vec3)
            .build()?;

        Ok(Self {
            program,
            cube,
            time: 0.0,
        })
    }
}

impl Demo for SpinningCube {
    fn update(&mut self, frame: &Frame, _keys: &KeyState) {
        self.time = frame.time;
    }

    fn render(&mut self, renderer: &mut GlRenderer, viewport: Viewport) -> Result<(), SceneError> {
        let [r, g, b] = CLEAR;
        renderer.set_face_culling(false);
        renderer.set_depth_test(Some(DepthFunc::Less));
        renderer.clear_color(r, g, b);

        let model = rotate(identity(), self.time, Vector3::new(0.5, 1.0, 0.0));
        let projection = projection(viewport.aspect());

        self.program.set_uniform("model", model)?;
        self.program.set_uniform("projection", projection)?;
        renderer.draw(&self.cube, &self.program);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_range() {
        let proj = projection(1.0);

        let near = proj * Vector4::new(0.0, 0.0, -0.01, 1.0);
        let far = proj * Vector4::new(0.0, 0.0, -1000.0, 1.0);

        assert!((near.z / near.w + 1.0).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn teal_background() {
        assert_eq!(CLEAR, [0.2, 0.3, 0.3]);
    }
}
