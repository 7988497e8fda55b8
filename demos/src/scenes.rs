pub mod clear;
pub mod cube_pyramid;
pub mod cube_swarm;
pub mod point;
pub mod skybox;
pub mod skydome;
pub mod spinning_cube;
pub mod triangle;
pub mod uniform_block;
