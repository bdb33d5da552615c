//! # Input Manager
//!
//! Collects raw window and device events between frames and turns them into a
//! [`ProcessedInputState`] snapshot once per frame.
//!
//! Only the keys and buttons the sandbox reacts to are tracked.

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{MouseInput, ProcessedInputState, RawInputState};

const KEY_CODES: [KeyCode; 5] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::Space,
];

const MOUSE_BUTTONS: [MouseButton; 2] = [MouseButton::Left, MouseButton::Right];

/// Tracks the state of every watched key and button.
pub struct InputManager {
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,
    pub mouse_inputs: MouseInput,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a manager with every tracked key and button released.
    pub fn new() -> Self {
        let keyboard_inputs_old: HashMap<_, _> = KEY_CODES.iter().map(|&key| (key, false)).collect();
        let keyboard_inputs_new = keyboard_inputs_old.clone();

        let mouse_button_inputs_old: HashMap<_, _> =
            MOUSE_BUTTONS.iter().map(|&button| (button, false)).collect();
        let mouse_button_inputs_new = mouse_button_inputs_old.clone();

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            mouse_inputs: MouseInput {
                mouse_button_inputs_old,
                mouse_button_inputs_new,
                mouse_delta: None,
            },
        }
    }

    /// Copies this frame's raw states into the "old" maps.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }

        for (button, new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            if let Some(old_state) = self.mouse_inputs.mouse_button_inputs_old.get_mut(button) {
                *old_state = *new_state;
            }
        }
    }

    /// Records keyboard and mouse button events. Everything else is ignored.
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => self.record_key(*key, *state == ElementState::Pressed),
            WindowEvent::MouseInput { button, state, .. } => {
                self.record_button(*button, *state == ElementState::Pressed)
            }
            _ => {}
        }
    }

    /// Sets the raw state of a tracked key; untracked keys are dropped.
    pub fn record_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
            *key_state = pressed;
        }
    }

    /// Sets the raw state of a tracked mouse button.
    pub fn record_button(&mut self, button: MouseButton, pressed: bool) {
        if let Some(button_state) = self.mouse_inputs.mouse_button_inputs_new.get_mut(&button) {
            *button_state = pressed;
        }
    }

    /// Adds raw device motion to this frame's total.
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (x, y) = self.mouse_inputs.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_inputs.mouse_delta = Some((x + delta.0, y + delta.1));
    }

    /// Builds the snapshot for this frame without changing any state.
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let keyboard_states = self
            .keyboard_inputs_new
            .iter()
            .map(|(key, &new_state)| {
                let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
                (*key, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        let mouse_button_states = self
            .mouse_inputs
            .mouse_button_inputs_new
            .iter()
            .map(|(button, &new_state)| {
                let old_state = self
                    .mouse_inputs
                    .mouse_button_inputs_old
                    .get(button)
                    .copied()
                    .unwrap_or(false);
                (*button, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta: self.mouse_inputs.mouse_delta,
        }
    }

    /// Returns this frame's snapshot and starts the next frame.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.reset_inputs();
        processed_input
    }

    /// Ends the frame: edges are consumed and motion is cleared.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();
        self.mouse_inputs.mouse_delta = None;
    }

    /// Treats every key and button as released, e.g. after focus loss, so
    /// nothing stays stuck down.
    pub fn release_all(&mut self) {
        self.keyboard_inputs_new.values_mut().for_each(|state| *state = false);
        self.mouse_inputs
            .mouse_button_inputs_new
            .values_mut()
            .for_each(|state| *state = false);
        self.mouse_inputs.mouse_delta = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_held_key_is_pressed_once_then_held() {
        let mut input = InputManager::new();
        input.record_key(KeyCode::Space, true);

        let first = input.get_and_reset_processed_input();
        assert_eq!(first.get_key_state(KeyCode::Space), RawInputState::Pressed);

        let second = input.get_and_reset_processed_input();
        assert_eq!(second.get_key_state(KeyCode::Space), RawInputState::Held);

        input.record_key(KeyCode::Space, false);
        let third = input.get_and_reset_processed_input();
        assert_eq!(third.get_key_state(KeyCode::Space), RawInputState::Released);
    }

    #[test]
    fn untracked_keys_are_ignored() {
        let mut input = InputManager::new();
        input.record_key(KeyCode::KeyQ, true);
        let snapshot = input.get_and_reset_processed_input();
        assert!(!snapshot.keyboard_states.contains_key(&KeyCode::KeyQ));
    }

    #[test]
    fn mouse_motion_accumulates_until_the_frame_ends() {
        let mut input = InputManager::new();
        input.intake_mouse_motion((2.0, -1.0));
        input.intake_mouse_motion((3.0, 4.0));

        assert_eq!(input.get_and_reset_processed_input().get_mouse_delta(), Some((5.0, 3.0)));
        assert_eq!(input.get_and_reset_processed_input().get_mouse_delta(), None);
    }

    #[test]
    fn release_all_clears_held_inputs() {
        let mut input = InputManager::new();
        input.record_key(KeyCode::KeyW, true);
        input.record_button(MouseButton::Right, true);
        input.get_and_reset_processed_input();

        input.release_all();
        let snapshot = input.get_and_reset_processed_input();
        assert!(!snapshot.get_key_state(KeyCode::KeyW).is_active());
        assert!(!snapshot.get_mouse_button_state(MouseButton::Right).is_active());
    }
}
