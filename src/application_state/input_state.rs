//! # Input State
//!
//! Edge-aware snapshots of the keyboard and mouse, produced once per frame by
//! the input manager and consumed by the engine.

use std::collections::HashMap;
use winit::{event::MouseButton, keyboard::KeyCode};

/// Frame-to-frame state of a key or button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RawInputState {
    /// Up last frame and this frame
    #[default]
    NotPressed,
    /// Went down this frame
    Pressed,
    /// Down last frame and this frame
    Held,
    /// Went up this frame
    Released,
}

impl RawInputState {
    /// Down this frame, whether new or not.
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    pub fn is_just_released(&self) -> bool {
        matches!(self, RawInputState::Released)
    }

    /// Derives the transition from last frame's and this frame's raw states.
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// One frame's worth of input.
///
/// Keys and buttons that were never tracked read as `NotPressed`.
#[derive(Debug, Default)]
pub struct ProcessedInputState {
    pub keyboard_states: HashMap<KeyCode, RawInputState>,
    pub mouse_button_states: HashMap<MouseButton, RawInputState>,
    /// Raw mouse motion summed over the frame, `None` if the mouse did not move
    pub mouse_delta: Option<(f64, f64)>,
}

impl ProcessedInputState {
    pub fn get_key_state(&self, key: KeyCode) -> RawInputState {
        self.keyboard_states.get(&key).copied().unwrap_or_default()
    }

    pub fn get_mouse_button_state(&self, button: MouseButton) -> RawInputState {
        self.mouse_button_states.get(&button).copied().unwrap_or_default()
    }

    pub fn get_mouse_delta(&self) -> Option<(f64, f64)> {
        self.mouse_delta
    }
}

/// Raw mouse state between two frames.
#[derive(Debug, Default)]
pub struct MouseInput {
    pub mouse_button_inputs_old: HashMap<MouseButton, bool>,
    pub mouse_button_inputs_new: HashMap<MouseButton, bool>,
    /// Motion accumulated since the last snapshot
    pub mouse_delta: Option<(f64, f64)>,
}
