use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;

/// Fixed size of the player's collision box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerDimensions {
    /// Full height of the box, centered on the eye.
    pub height: f32,
    /// Width along both X and Z.
    pub width: f32,
}

impl Default for PlayerDimensions {
    fn default() -> Self {
        Self {
            height: 1.8,
            width: 0.5,
        }
    }
}

/// The controlled entity. `position` is the eye, which is also what the
/// render surface looks from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerBody {
    pub position: Point3<f32>,
    pub velocity: Vector3<f32>,
    pub on_ground: bool,
    pub dimensions: PlayerDimensions,
}

impl PlayerBody {
    /// An airborne body at rest.
    pub fn new(position: Point3<f32>, dimensions: PlayerDimensions) -> Self {
        Self {
            position,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            on_ground: false,
            dimensions,
        }
    }

    /// Collision box centered on the eye.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_center_size(
            self.position,
            Vector3::new(
                self.dimensions.width,
                self.dimensions.height,
                self.dimensions.width,
            ),
        )
    }

    /// Launches the body upwards if it is standing on something.
    ///
    /// # Returns
    /// `true` if the jump was accepted. Airborne bodies ignore the command.
    pub fn jump(&mut self, jump_velocity: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.velocity.y = jump_velocity;
        self.on_ground = false;
        true
    }

    /// Length of the XZ part of the velocity.
    pub fn horizontal_speed(&self) -> f32 {
        self.velocity.x.hypot(self.velocity.z)
    }
}
