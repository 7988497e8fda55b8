use std::collections::HashSet;

use winit::event::{ElementState, VirtualKeyCode};

use cookbook::camera::{Direction, FlyCamera};

/// Keys currently held down.
#[derive(Debug, Default)]
pub struct KeyState {
    held: HashSet<VirtualKeyCode>,
}

impl KeyState {
    /// Records a key event, returns true on the initial press.
    pub fn handle(&mut self, key: VirtualKeyCode, state: ElementState) -> bool {
        match state {
            ElementState::Pressed => self.held.insert(key),
            ElementState::Released => {
                self.held.remove(&key);
                false
            }
        }
    }

    pub fn is_down(&self, key: VirtualKeyCode) -> bool {
        self.held.contains(&key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

const MOVE_KEYS: [(VirtualKeyCode, Direction); 4] = [
    (VirtualKeyCode::W, Direction::Forward),
    (VirtualKeyCode::S, Direction::Backward),
    (VirtualKeyCode::A, Direction::Left),
    (VirtualKeyCode::D, Direction::Right),
];

/// WASD movement for fly-camera demos.
pub fn drive_camera(camera: &mut FlyCamera, keys: &KeyState, dt: f32) {
    for (key, direction) in MOVE_KEYS {
        if keys.is_down(key) {
            camera.process_keyboard(direction, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_press_is_not_initial() {
        let mut keys = KeyState::default();

        assert!(keys.handle(VirtualKeyCode::Space, ElementState::Pressed));
        assert!(!keys.handle(VirtualKeyCode::Space, ElementState::Pressed));
        assert!(keys.is_down(VirtualKeyCode::Space));

        assert!(!keys.handle(VirtualKeyCode::Space, ElementState::Released));
        assert!(!keys.is_down(VirtualKeyCode::Space));
        assert!(keys.handle(VirtualKeyCode::Space, ElementState::Pressed));
    }

    #[test]
    fn held_w_moves_forward() {
        let mut keys = KeyState::default();
        keys.handle(VirtualKeyCode::W, ElementState::Pressed);

        let mut camera = FlyCamera::default();
        let start = camera.position;
        drive_camera(&mut camera, &keys, 1.0);

        // default camera looks down -z
        assert!(camera.position.z < start.z);

        keys.clear();
        let moved = camera.position;
        drive_camera(&mut camera, &keys, 1.0);
        assert_eq!(camera.position, moved);
    }
}
