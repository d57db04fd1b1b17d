//! Input state management

use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Tracks keyboard and mouse input state per frame
#[derive(Default)]
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Mouse buttons currently held (button index)
    mouse_buttons_down: HashSet<u32>,
    /// Raw accumulated mouse delta (device motion)
    raw_mouse_delta: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Process mouse button press
    pub fn process_mouse_button_down(&mut self, button: u32) {
        self.mouse_buttons_down.insert(button);
    }

    /// Process mouse button release
    pub fn process_mouse_button_up(&mut self, button: u32) {
        self.mouse_buttons_down.remove(&button);
    }

    /// Process raw mouse delta (device motion)
    pub fn process_mouse_raw_delta(&mut self, dx: f64, dy: f64) {
        self.raw_mouse_delta.0 += dx;
        self.raw_mouse_delta.1 += dy;
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.raw_mouse_delta = (0.0, 0.0);
    }

    /// Is a key currently held down?
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Was a key pressed this frame?
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Is a mouse button currently held?
    pub fn is_mouse_button_down(&self, button: u32) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Get the raw mouse delta accumulated this frame
    pub fn raw_mouse_delta(&self) -> (f64, f64) {
        self.raw_mouse_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_transitions() {
        let mut input = InputState::new();

        input.process_key_down(KeyCode::KeyW);
        assert!(input.is_key_down(KeyCode::KeyW));
        assert!(input.is_key_just_pressed(KeyCode::KeyW));

        // End frame clears just_pressed but keeps held state
        input.end_frame();
        assert!(input.is_key_down(KeyCode::KeyW));
        assert!(!input.is_key_just_pressed(KeyCode::KeyW));

        input.process_key_up(KeyCode::KeyW);
        assert!(!input.is_key_down(KeyCode::KeyW));
    }

    #[test]
    fn test_repeat_is_not_just_pressed() {
        let mut input = InputState::new();

        input.process_key_down(KeyCode::Digit1);
        input.end_frame();
        // OS key repeat sends another down event while still held
        input.process_key_down(KeyCode::Digit1);
        assert!(input.is_key_down(KeyCode::Digit1));
        assert!(!input.is_key_just_pressed(KeyCode::Digit1));
    }

    #[test]
    fn test_raw_mouse_delta_accumulates() {
        let mut input = InputState::new();

        input.process_mouse_raw_delta(3.0, -2.0);
        input.process_mouse_raw_delta(1.0, 1.0);
        let delta = input.raw_mouse_delta();
        assert!((delta.0 - 4.0).abs() < 1e-10);
        assert!((delta.1 + 1.0).abs() < 1e-10);

        input.end_frame();
        assert_eq!(input.raw_mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_mouse_buttons() {
        let mut input = InputState::new();

        input.process_mouse_button_down(1);
        assert!(input.is_mouse_button_down(1));

        input.process_mouse_button_up(1);
        assert!(!input.is_mouse_button_down(1));
    }
}
