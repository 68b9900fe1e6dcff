//! Keyboard input handling and per-frame axis sampling.

use glam::Vec2;
use std::collections::HashSet;

/// Axis and button values sampled once per visual frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSample {
    /// Horizontal axis in [-1, 1]; positive is right.
    pub horizontal: f32,
    /// Vertical axis in [-1, 1]; positive is up.
    pub vertical: f32,
    /// Jump went down this frame (edge, not level).
    pub jump_pressed: bool,
}

impl InputSample {
    pub fn new(horizontal: f32, vertical: f32, jump_pressed: bool) -> Self {
        Self {
            horizontal: horizontal.clamp(-1.0, 1.0),
            vertical: vertical.clamp(-1.0, 1.0),
            jump_pressed,
        }
    }

    pub fn axes(&self) -> Vec2 {
        Vec2::new(self.horizontal, self.vertical)
    }
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame edges. Call once the frame has been simulated.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        let held: Vec<KeyCode> = self.keys_held.drain().collect();
        self.keys_released.extend(held);
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_key_held(*k))
    }

    fn axis(&self, negative: &[KeyCode], positive: &[KeyCode]) -> f32 {
        let mut value = 0.0;
        if self.any_held(positive) {
            value += 1.0;
        }
        if self.any_held(negative) {
            value -= 1.0;
        }
        value
    }

    /// Horizontal axis (A/D or arrows).
    pub fn horizontal_axis(&self) -> f32 {
        self.axis(
            &[KeyCode::KeyA, KeyCode::ArrowLeft],
            &[KeyCode::KeyD, KeyCode::ArrowRight],
        )
    }

    /// Vertical axis (W/S or arrows).
    pub fn vertical_axis(&self) -> f32 {
        self.axis(
            &[KeyCode::KeyS, KeyCode::ArrowDown],
            &[KeyCode::KeyW, KeyCode::ArrowUp],
        )
    }

    /// Check if jump was pressed (Space).
    pub fn is_jump_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Space)
    }

    /// Snapshot the axes and jump edge for this frame.
    pub fn sample(&self) -> InputSample {
        InputSample::new(self.horizontal_axis(), self.vertical_axis(), self.is_jump_pressed())
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;
