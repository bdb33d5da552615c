//! Turning held movement keys into a horizontal velocity.

use cgmath::{InnerSpace, Rotation, Vector3};

use crate::engine_state::camera_state::look::LookOrientation;

/// The four held movement intents.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementIntent {
    /// Unit direction in the player's local frame (forward is -Z), or zero
    /// when the intents cancel out.
    pub fn local_direction(&self) -> Vector3<f32> {
        let mut direction = Vector3::new(0.0, 0.0, 0.0);
        if self.forward {
            direction.z -= 1.0;
        }
        if self.back {
            direction.z += 1.0;
        }
        if self.left {
            direction.x -= 1.0;
        }
        if self.right {
            direction.x += 1.0;
        }

        // Normalizing a zero vector would produce NaNs.
        if direction.magnitude2() > 0.0 {
            direction.normalize()
        } else {
            direction
        }
    }
}

/// The `(x, z)` velocity the intents ask for under `look`.
///
/// The local direction is rotated by the full look rotation and its Y part is
/// dropped, so looking steeply up or down shortens the horizontal stride.
pub fn desired_horizontal_velocity(
    intent: &MovementIntent,
    look: &LookOrientation,
    move_speed: f32,
) -> (f32, f32) {
    let local = intent.local_direction();
    if local.magnitude2() == 0.0 {
        return (0.0, 0.0);
    }
    let world = look.rotation().rotate_vector(local);
    (world.x * move_speed, world.z * move_speed)
}

#[cfg(test)]
mod tests {
    use cgmath::Deg;

    use super::*;

    #[test]
    fn forward_with_zero_look_moves_along_negative_z() {
        let intent = MovementIntent {
            forward: true,
            ..Default::default()
        };
        let (vx, vz) = desired_horizontal_velocity(&intent, &LookOrientation::default(), 10.0);
        assert!(vx.abs() < 1e-5);
        assert!((vz + 10.0).abs() < 1e-5);
    }

    #[test]
    fn diagonal_movement_is_not_faster() {
        let intent = MovementIntent {
            forward: true,
            right: true,
            ..Default::default()
        };
        let (vx, vz) = desired_horizontal_velocity(&intent, &LookOrientation::default(), 10.0);
        assert!((vx.hypot(vz) - 10.0).abs() < 1e-4);
        assert!(vx > 0.0 && vz < 0.0);
    }

    #[test]
    fn opposing_keys_cancel_without_nan() {
        let intent = MovementIntent {
            forward: true,
            back: true,
            left: true,
            right: true,
        };
        assert_eq!(intent.local_direction(), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(
            desired_horizontal_velocity(&intent, &LookOrientation::default(), 10.0),
            (0.0, 0.0)
        );
    }

    #[test]
    fn yaw_rotates_the_stride() {
        let intent = MovementIntent {
            forward: true,
            ..Default::default()
        };
        let look = LookOrientation::new(Deg(-90.0), Deg(0.0));
        let (vx, vz) = desired_horizontal_velocity(&intent, &look, 5.0);
        assert!((vx - 5.0).abs() < 1e-4);
        assert!(vz.abs() < 1e-4);
    }

    #[test]
    fn pitch_shortens_the_horizontal_stride() {
        let intent = MovementIntent {
            forward: true,
            ..Default::default()
        };
        let look = LookOrientation::new(Deg(0.0), Deg(60.0));
        let (vx, vz) = desired_horizontal_velocity(&intent, &look, 10.0);
        assert!((vx.hypot(vz) - 5.0).abs() < 1e-3);
    }
}
