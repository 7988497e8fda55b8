pub mod animation;
pub mod camera;
pub mod config;
pub mod image;
pub mod material;
pub mod mesh;
pub mod transform;

pub use cgmath;
