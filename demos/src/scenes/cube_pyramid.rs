use cgmath::Matrix4;
use winit::event::VirtualKeyCode;

use cookbook::config::DemoConfig;
use cookbook::material::Material;
use cookbook::mesh::{CUBE_POSITIONS, PYRAMID_POSITIONS};
use cookbook::transform::{identity, multiply, perspective, translate};

use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder};
use gl_wrapper::renderer::{DepthFunc, GlRenderer};

use crate::scene::{Demo, SceneError, Viewport};

const CAMERA_Z: f32 = 20.0;
const DEPTH_FUNC: DepthFunc = DepthFunc::LessEqual;

fn projection(aspect: f32) -> Matrix4<f32> {
    perspective(45f32.to_radians(), aspect, 0.1, 1000.0)
}

/// A gold cube next to a bronze pyramid.
pub struct CubePyramid {
    program: Program,
    cube: Geometry,
    pyramid: Geometry,
    cube_material: Material,
    clear: [f32; 3],
}

impl CubePyramid {
    pub fn new(config: &DemoConfig) -> Result<Self, SceneError> {
        let program = ProgramBuilder::new(
            include_str!("../gl_shaders/material.vert"),
            include_str!("../gl_shaders/material.frag"),
        )
        .build()?;

        let cube = GeometryBuilder::new(&CUBE_POSITIONS)
            .with_attribute(VertexAttribute::Vec3)
            .build()?;
        let pyramid = GeometryBuilder::new(&PYRAMID_POSITIONS)
            .with_attribute(VertexAttribute::Vec3)
            .build()?;

        Ok(Self {
            program,
            cube,
            pyramid,
            cube_material: Material::gold(),
            clear: config.clear_color,
        })
    }

    fn set_material(&self, material: &Material) -> Result<(), SceneError> {
        self.program.set_uniform("material_ambient", material.ambient)?;
        self.program.set_uniform("material_diffuse", material.diffuse)?;
        self.program.set_uniform("material_specular", material.specular)?;
        self.program
            .set_uniform("material_shininess", material.shininess)?;
        Ok(())
    }
}

impl Demo for CubePyramid {
    fn render(&mut self, renderer: &mut GlRenderer, viewport: Viewport) -> Result<(), SceneError> {
        let [r, g, b] = self.clear;
        renderer.set_depth_test(Some(DEPTH_FUNC));
        renderer.clear_color(r, g, b);

        let proj = projection(viewport.aspect());
        let view = translate(identity(), 0.0, 0.0, -CAMERA_Z);
        self.program.set_uniform("proj_matrix", proj)?;

        let cube_mv = multiply(view, translate(identity(), -2.0, 0.0, 0.0));
        self.program.set_uniform("mv_matrix", cube_mv)?;
        self.set_material(&self.cube_material)?;
        renderer.draw(&self.cube, &self.program);

        let pyramid_mv = multiply(view, translate(identity(), 5.0, 5.0, 0.0));
        self.program.set_uniform("mv_matrix", pyramid_mv)?;
        self.set_material(&Material::bronze())?;
        renderer.draw(&self.pyramid, &self.program);

        Ok(())
    }

    fn key(&mut self, key: VirtualKeyCode) {
        // M swaps the cube between the metals
        if key == VirtualKeyCode::M {
            self.cube_material = if self.cube_material == Material::gold() {
                Material::silver()
            } else if self.cube_material == Material::silver() {
                Material::bronze()
            } else {
                Material::gold()
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_lens() {
        let proj = projection(1.0);
        let focal = 1.0 / 22.5f32.to_radians().tan();

        assert!((proj.y.y - focal).abs() < 1e-5);
        assert!((proj.x.x - focal).abs() < 1e-5);
    }

    #[test]
    fn equal_depth_passes() {
        assert_eq!(DEPTH_FUNC, DepthFunc::LessEqual);
    }
}
