use cgmath::Vector3;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use winit::event::VirtualKeyCode;

use cookbook::animation::Spinner;
use cookbook::mesh::blob_quad;
use cookbook::transform::{identity, random_float, rotate};

use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder};
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::uniform_buffer::{BlockWriter, UniformBuffer};

use crate::input::KeyState;
use crate::scene::{Demo, Frame, SceneError, Viewport};

const BLOCK_NAME: &str = "BlobSettings";
const BLOCK_BINDING: u32 = 1;
const MEMBERS: [&str; 4] = ["InnerColor", "OuterColor", "RadiusInner", "RadiusOuter"];

const INNER_COLOR: [f32; 4] = [1.0, 1.0, 0.75, 1.0];
const OUTER_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
const RADIUS_INNER: f32 = 0.25;
const RADIUS_OUTER: f32 = 0.45;

/// Blurry disc on a spinning quad, shaded from a uniform block.
pub struct UniformBlockDemo {
    program: Program,
    quad: Geometry,
    writer: BlockWriter,
    buffer: UniformBuffer,
    inner_offset: usize,
    spinner: Spinner,
    pending_color: Option<[f32; 4]>,
    rng: SmallRng,
}

impl UniformBlockDemo {
    pub fn new() -> Result<Self, SceneError> {
        let program = ProgramBuilder::new(
            include_str!("../gl_shaders/blob.vert"),
            include_str!("../gl_shaders/blob.frag"),
        )
        .build()?;

        let quad = GeometryBuilder::new(&blob_quad())
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec2)
            .build()?;

        let block = program.uniform_block(BLOCK_NAME)?;
        let offsets = program.uniform_offsets(&MEMBERS)?;
        log::debug!("{BLOCK_NAME}: {} bytes, offsets {offsets:?}", block.size);

        let mut writer = BlockWriter::new(block.size);
        writer.write_vec4(offsets[0], INNER_COLOR)?;
        writer.write_vec4(offsets[1], OUTER_COLOR)?;
        writer.write_f32(offsets[2], RADIUS_INNER)?;
        writer.write_f32(offsets[3], RADIUS_OUTER)?;

        let buffer = UniformBuffer::new(writer.as_bytes());
        buffer.bind_base(BLOCK_BINDING);
        program.bind_uniform_block(&block, BLOCK_BINDING);

        Ok(Self {
            program,
            quad,
            writer,
            buffer,
            inner_offset: offsets[0],
            spinner: Spinner::default(),
            pending_color: None,
            rng: SmallRng::from_entropy(),
        })
    }
}

impl Demo for UniformBlockDemo {
    fn update(&mut self, _frame: &Frame, _keys: &KeyState) {
        self.spinner.tick();
    }

    fn render(&mut self, renderer: &mut GlRenderer, _viewport: Viewport) -> Result<(), SceneError> {
        if let Some(color) = self.pending_color.take() {
            self.writer.write_vec4(self.inner_offset, color)?;
            self.buffer.update(self.writer.as_bytes())?;
        }

        renderer.set_blending(true);
        renderer.clear_color(0.0, 0.0, 0.0);

        let rotation = rotate(
            identity(),
            self.spinner.angle.to_radians(),
            Vector3::unit_z(),
        );
        self.program.set_uniform("rotation", rotation)?;
        renderer.draw(&self.quad, &self.program);

        Ok(())
    }

    fn key(&mut self, key: VirtualKeyCode) {
        if key == VirtualKeyCode::R {
            let color = [
                random_float(&mut self.rng, 0.0, 1.0),
                random_float(&mut self.rng, 0.0, 1.0),
                random_float(&mut self.rng, 0.0, 1.0),
                1.0,
            ];
            log::debug!("Inner color {color:?}");
            self.pending_color = Some(color);
        }
    }
}
