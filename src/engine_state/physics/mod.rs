//! # Player Physics
//!
//! Everything that moves the player through the voxel grid:
//!
//! * `player` - the `PlayerBody` (eye position, velocity, ground state)
//! * `aabb` - bounding boxes and the grid cells they cover
//! * `movement` - held movement keys to a horizontal velocity
//! * `collision` - the per-axis `CollisionResolver` run once per frame
//!
//! The resolver runs on a variable timestep taken straight from the frame
//! clock. There is no fixed-step accumulator and no sub-stepping.

use serde::{Deserialize, Serialize};

pub mod aabb;
pub mod collision;
pub mod movement;
pub mod player;

pub use collision::{CollisionResolver, TickOutcome};
pub use movement::MovementIntent;
pub use player::{PlayerBody, PlayerDimensions};

/// Which collision rules the resolver applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionMode {
    /// Downward support, ceilings and X/Z walls, with swept boxes.
    #[default]
    Full,
    /// Downward support only. Horizontal motion is never blocked and the body
    /// only leaves the ground by jumping.
    Legacy,
}

/// Movement and physics tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Downward acceleration, units/s².
    pub gravity: f32,
    /// Horizontal speed while a movement key is held, units/s.
    pub move_speed: f32,
    /// Upward velocity set by a jump, units/s.
    pub jump_velocity: f32,
    pub collision_mode: CollisionMode,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: 30.0,
            move_speed: 10.0,
            jump_velocity: 10.0,
            collision_mode: CollisionMode::Full,
        }
    }
}
