use cgmath::{InnerSpace, Matrix4, Vector3};

use crate::transform::{clamp, look_at, perspective};

const PITCH_LIMIT: f32 = 89.0;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 45.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// First person camera driven by yaw and pitch in degrees.
#[derive(Clone, Debug)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    world_up: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
    zoom: f32,
}

impl FlyCamera {
    pub fn new(position: Vector3<f32>) -> Self {
        let mut camera = Self {
            position,
            front: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::unit_y(),
            right: Vector3::unit_x(),
            world_up: Vector3::unit_y(),
            yaw: -90.0,
            pitch: 0.0,
            speed: 2.5,
            sensitivity: 0.1,
            zoom: ZOOM_MAX,
        };
        camera.update_vectors();
        camera
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn process_keyboard(&mut self, direction: Direction, dt: f32) {
        let velocity = self.speed * dt;

        let delta = match direction {
            Direction::Forward => self.front,
            Direction::Backward => -self.front,
            Direction::Right => self.front.cross(self.up).normalize(),
            Direction::Left => -self.front.cross(self.up).normalize(),
            Direction::Up => self.world_up,
            Direction::Down => -self.world_up,
        };

        self.position += delta * velocity;
    }

    /// `dy` grows upwards, callers flip window coordinates.
    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = clamp(
            self.pitch + dy * self.sensitivity,
            -PITCH_LIMIT,
            PITCH_LIMIT,
        );

        self.update_vectors();
    }

    pub fn process_scroll(&mut self, dy: f32) {
        self.zoom = clamp(self.zoom - dy, ZOOM_MIN, ZOOM_MAX);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        look_at(self.position, self.position + self.front, self.up)
    }

    pub fn projection(&self, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
        perspective(self.zoom.to_radians(), aspect, near, far)
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());

        self.front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 3.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn default_looks_down_negative_z() {
        let camera = FlyCamera::default();

        assert!(close(camera.front(), Vector3::new(0.0, 0.0, -1.0)));
        assert!(close(camera.right(), Vector3::unit_x()));
        assert!(close(camera.up(), Vector3::unit_y()));
        assert_eq!(camera.position, Vector3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn keyboard_moves_by_speed_times_dt() {
        let mut camera = FlyCamera::default();

        camera.process_keyboard(Direction::Forward, 0.5);
        assert!(close(camera.position, Vector3::new(0.0, 0.0, 1.75)));

        camera.process_keyboard(Direction::Right, 1.0);
        assert!(close(camera.position, Vector3::new(2.5, 0.0, 1.75)));

        camera.process_keyboard(Direction::Left, 1.0);
        camera.process_keyboard(Direction::Backward, 0.5);
        assert!(close(camera.position, Vector3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = FlyCamera::default();

        camera.process_mouse(0.0, 10_000.0);
        assert_eq!(camera.pitch(), 89.0);

        camera.process_mouse(0.0, -20_000.0);
        assert_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn yaw_turns_front() {
        let mut camera = FlyCamera::default();

        // 900 * 0.1 = 90 degrees, from -90 to 0 faces +x
        camera.process_mouse(900.0, 0.0);

        assert!((camera.yaw() - 0.0).abs() < 1e-4);
        assert!(close(camera.front(), Vector3::unit_x()));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = FlyCamera::default();

        camera.process_scroll(-10.0);
        assert_eq!(camera.zoom(), 45.0);

        camera.process_scroll(30.0);
        assert_eq!(camera.zoom(), 15.0);

        camera.process_scroll(100.0);
        assert_eq!(camera.zoom(), 1.0);
    }
}
