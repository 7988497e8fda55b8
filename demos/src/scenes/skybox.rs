use cgmath::Vector3;
use winit::event::VirtualKeyCode;

use cookbook::camera::FlyCamera;
use cookbook::config::DemoConfig;
use cookbook::image::{load_png, CubeFaces, ImageData};
use cookbook::mesh::{index_vertices, SKYBOX_POSITIONS, TEXTURED_CUBE, VEC3};
use cookbook::transform::{identity, strip_translation, translate};

use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder};
use gl_wrapper::renderer::{DepthFunc, GlRenderer};
use gl_wrapper::texture::{
    CubeFace, CubeMap, Texture2D, TextureError, TextureFilter, TextureFormats,
};

use crate::input::{drive_camera, KeyState};
use crate::scene::{Demo, Frame, SceneError, Viewport};

const CONTAINER_UNIT: u8 = 0;
const SKYBOX_UNIT: u8 = 1;

/// Textured container inside a cube map skybox.
pub struct Skybox {
    container_program: Program,
    skybox_program: Program,
    container: Geometry,
    sky: Geometry,
    container_texture: Texture2D,
    cube_map: CubeMap,
    camera: FlyCamera,
    show_container: bool,
    z_offset: f32,
    clear: [f32; 3],
}

/// Change of the view's z offset for one frame, Q pulls the scene closer.
fn z_offset_step(keys: &KeyState, speed: f32, dt: f32) -> f32 {
    let mut step = 0.0;
    if keys.is_down(VirtualKeyCode::Q) {
        step += speed * dt;
    }
    if keys.is_down(VirtualKeyCode::E) {
        step -= speed * dt;
    }
    step
}

fn format_of(image: &ImageData) -> Result<TextureFormats, TextureError> {
    TextureFormats::from_channels(image.channels.count()).ok_or(TextureError::UnsupportedFormat)
}

impl Skybox {
    pub fn new(config: &DemoConfig) -> Result<Self, SceneError> {
        let textures = config.resources.join("textures");

        let image = load_png(textures.join("container.png"))?;
        let container_texture = Texture2D::new(
            image.width,
            image.height,
            Some(&image.pixels),
            format_of(&image)?,
            TextureFilter::Mipmap,
        )?;
        log::info!("Loaded container texture {}x{}", image.width, image.height);

        let faces = CubeFaces::in_dir(textures.join("skybox")).load()?;
        let faces = faces
            .iter()
            .map(|img| {
                Ok(CubeFace {
                    width: img.width,
                    height: img.height,
                    format: format_of(img)?,
                    data: &img.pixels,
                })
            })
            .collect::<Result<Vec<_>, TextureError>>()?;
        let faces: [CubeFace; 6] = faces
            .try_into()
            .map_err(|_| TextureError::InvalidSrcLength)?;
        let cube_map = CubeMap::new(&faces)?;
        log::info!("Loaded skybox cube map");

        let container_program = ProgramBuilder::new(
            include_str!("../gl_shaders/textured.vert"),
            include_str!("../gl_shaders/textured.frag"),
        )
        .build()?;
        container_program.set_uniform("texture1", CONTAINER_UNIT as i32)?;
        container_program.set_uniform("model", identity())?;

        let skybox_program = ProgramBuilder::new(
            include_str!("../gl_shaders/skybox.vert"),
            include_str!("../gl_shaders/skybox.frag"),
        )
        .build()?;
        skybox_program.set_uniform("skybox", SKYBOX_UNIT as i32)?;

        let container = GeometryBuilder::new(&TEXTURED_CUBE)
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec2)
            .build()?;
        let (corners, indices) = index_vertices(&SKYBOX_POSITIONS, VEC3);
        let sky = GeometryBuilder::new(&corners)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&indices)
            .build()?;

        let mut camera = FlyCamera::new(Vector3::new(0.0, 0.0, 3.0));
        camera.speed = config.camera_speed;
        camera.sensitivity = config.mouse_sensitivity;

        Ok(Self {
            container_program,
            skybox_program,
            container,
            sky,
            container_texture,
            cube_map,
            camera,
            show_container: true,
            z_offset: 0.0,
            clear: config.clear_color,
        })
    }
}

impl Demo for Skybox {
    fn update(&mut self, frame: &Frame, keys: &KeyState) {
        drive_camera(&mut self.camera, keys, frame.dt);
        self.z_offset += z_offset_step(keys, self.camera.speed, frame.dt);
    }

    fn render(&mut self, renderer: &mut GlRenderer, viewport: Viewport) -> Result<(), SceneError> {
        let [r, g, b] = self.clear;
        renderer.set_depth_test(Some(DepthFunc::Less));
        renderer.clear_color(r, g, b);

        let view = translate(self.camera.view_matrix(), 0.0, 0.0, self.z_offset);
        let projection = self.camera.projection(viewport.aspect(), 0.1, 100.0);

        if self.show_container {
            self.container_program.set_uniform("view", view)?;
            self.container_program.set_uniform("projection", projection)?;
            self.container_texture.bind(CONTAINER_UNIT);
            renderer.draw(&self.container, &self.container_program);
        }

        // the sky writes depth 1.0, so it must pass where nothing was drawn
        renderer.set_depth_test(Some(DepthFunc::LessEqual));
        self.skybox_program
            .set_uniform("view", strip_translation(view))?;
        self.skybox_program.set_uniform("projection", projection)?;
        self.cube_map.bind(SKYBOX_UNIT);
        renderer.draw(&self.sky, &self.skybox_program);
        renderer.set_depth_test(Some(DepthFunc::Less));

        Ok(())
    }

    fn key(&mut self, key: VirtualKeyCode) {
        if key == VirtualKeyCode::Space {
            self.show_container = !self.show_container;
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

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::ElementState;

    fn holding(held: &[VirtualKeyCode]) -> KeyState {
        let mut keys = KeyState::default();
        for &key in held {
            keys.handle(key, ElementState::Pressed);
        }
        keys
    }

    #[test]
    fn q_moves_forward_and_e_back() {
        assert_eq!(z_offset_step(&holding(&[VirtualKeyCode::Q]), 2.5, 1.0), 2.5);
        assert_eq!(z_offset_step(&holding(&[VirtualKeyCode::E]), 2.5, 1.0), -2.5);
    }

    #[test]
    fn offset_follows_camera_speed() {
        let keys = holding(&[VirtualKeyCode::Q]);
        assert_eq!(z_offset_step(&keys, 4.0, 0.5), 2.0);
        assert_eq!(z_offset_step(&keys, 2.5, 0.0), 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let keys = holding(&[VirtualKeyCode::Q, VirtualKeyCode::E]);
        assert_eq!(z_offset_step(&keys, 2.5, 1.0), 0.0);
        assert_eq!(z_offset_step(&KeyState::default(), 2.5, 1.0), 0.0);
    }
}
