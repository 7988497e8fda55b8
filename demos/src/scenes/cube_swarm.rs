use rand::rngs::SmallRng;
use rand::SeedableRng;
use winit::event::VirtualKeyCode;

use cookbook::animation::swarm_model;
use cookbook::config::DemoConfig;
use cookbook::mesh::CUBE_POSITIONS;
use cookbook::transform::{identity, multiply, perspective, random_int, translate};

use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder};
use gl_wrapper::renderer::{DepthFunc, GlRenderer};

use crate::input::KeyState;
use crate::scene::{Demo, Frame, SceneError, Viewport};

const MAX_CUBES: usize = 48;
const CAMERA_Z: f32 = 30.0;

pub struct CubeSwarm {
    program: Program,
    cube: Geometry,
    count: usize,
    time: f32,
    clear: [f32; 3],
    rng: SmallRng,
}

impl CubeSwarm {
    pub fn new(config: &DemoConfig) -> Result<Self, SceneError> {
        let program = ProgramBuilder::new(
            include_str!("../gl_shaders/swarm.vert"),
            include_str!("../gl_shaders/swarm.frag"),
        )
        .build()?;

        let cube = GeometryBuilder::new(&CUBE_POSITIONS)
            .with_attribute(VertexAttribute::Vec3)
            .build()?;

        Ok(Self {
            program,
            cube,
            count: MAX_CUBES,
            time: 0.0,
            clear: config.clear_color,
            rng: SmallRng::from_entropy(),
        })
    }
}

impl Demo for CubeSwarm {
    fn update(&mut self, frame: &Frame, _keys: &KeyState) {
        self.time = frame.time;
    }

    fn render(&mut self, renderer: &mut GlRenderer, viewport: Viewport) -> Result<(), SceneError> {
        let [r, g, b] = self.clear;
        renderer.set_depth_test(Some(DepthFunc::LessEqual));
        renderer.clear_color(r, g, b);

        let proj = perspective(45f32.to_radians(), viewport.aspect(), 0.1, 1000.0);
        let view = translate(identity(), 0.0, 0.0, -CAMERA_Z);

        self.program.set_uniform("proj_matrix", proj)?;

        for i in 0..self.count {
            let mv = multiply(view, swarm_model(self.time, i));
            self.program.set_uniform("mv_matrix", mv)?;
            renderer.draw(&self.cube, &self.program);
        }

        Ok(())
    }

    fn key(&mut self, key: VirtualKeyCode) {
        if key == VirtualKeyCode::Space {
            self.count = random_int(&mut self.rng, 1, MAX_CUBES as i32) as usize;
            log::info!("Drawing {} cubes", self.count);
        }
    }
}
