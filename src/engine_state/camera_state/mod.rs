//! # Camera State Management
//!
//! The engine does not own a projection or a view matrix; those belong to the
//! render surface. What it does own is the player's look orientation, which
//! both the movement code and the surface read every frame.
//!
//! ## Core Components
//! - `LookOrientation`: yaw/pitch angles exposed as a quaternion
//! - `LookController`: turns captured mouse motion into orientation updates

use look::LookOrientation;

pub mod look;

/// Feeds mouse motion into a `LookOrientation`.
///
/// Motion is only applied while input is captured; the controller itself
/// does not know about pointer lock, the caller decides when to call it.
#[derive(Debug)]
pub struct LookController {
    /// The current look orientation
    pub look: LookOrientation,
    /// Radians per unit of raw mouse motion
    pub sensitivity: f32,
}

impl LookController {
    /// Creates a controller facing down -Z.
    ///
    /// # Arguments
    /// * `sensitivity` - Radians per unit of raw mouse motion
    pub fn new(sensitivity: f32) -> Self {
        Self {
            look: LookOrientation::default(),
            sensitivity,
        }
    }

    /// Applies accumulated mouse motion, if any.
    ///
    /// # Returns
    /// `true` if the orientation changed.
    pub fn intake_motion(&mut self, delta: Option<(f64, f64)>) -> bool {
        match delta {
            Some(delta) if delta != (0.0, 0.0) => {
                self.look.apply_mouse_delta(delta, self.sensitivity);
                true
            }
            _ => false,
        }
    }
}
