//! # Look Orientation
//!
//! Yaw/pitch look state of the player. Both angles are kept as plain radians
//! but the facing is always produced as a single quaternion
//! (`Q_y(yaw) * Q_x(pitch)`), so vectors are never rotated through chained
//! Euler steps.
//!
//! Conventions:
//! - Zero yaw and pitch looks down -Z
//! - Positive yaw turns left (counter-clockwise seen from above)
//! - Positive pitch looks up

use cgmath::{InnerSpace, Quaternion, Rad, Rotation, Rotation3, Vector3};
use std::f32::consts::FRAC_PI_2;

/// Where the player is looking.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LookOrientation {
    /// Horizontal rotation around +Y. Unclamped.
    pub yaw: Rad<f32>,
    /// Vertical rotation around the local X axis, within [-π/2, π/2].
    pub pitch: Rad<f32>,
}

impl Default for LookOrientation {
    fn default() -> Self {
        Self {
            yaw: Rad(0.0),
            pitch: Rad(0.0),
        }
    }
}

impl LookOrientation {
    /// Creates an orientation, clamping the pitch.
    ///
    /// # Arguments
    /// * `yaw` - Anything convertible to `Rad<f32>`, e.g. `cgmath::Deg`
    /// * `pitch` - Anything convertible to `Rad<f32>`
    pub fn new<Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(yaw: Y, pitch: P) -> Self {
        let mut look = Self {
            yaw: yaw.into(),
            pitch: pitch.into(),
        };
        look.clamp_pitch();
        look
    }

    fn clamp_pitch(&mut self) {
        self.pitch = Rad(self.pitch.0.clamp(-FRAC_PI_2, FRAC_PI_2));
    }

    /// Applies one raw mouse motion event.
    ///
    /// Moving the mouse right turns right and moving it down looks down.
    ///
    /// # Arguments
    /// * `delta` - Raw `(dx, dy)` motion as reported by the device
    /// * `sensitivity` - Radians per motion unit
    pub fn apply_mouse_delta(&mut self, delta: (f64, f64), sensitivity: f32) {
        let (dx, dy) = delta;
        self.yaw -= Rad(dx as f32 * sensitivity);
        self.pitch -= Rad(dy as f32 * sensitivity);
        self.clamp_pitch();
    }

    /// The look rotation as a unit quaternion.
    pub fn rotation(&self) -> Quaternion<f32> {
        (Quaternion::from_angle_y(self.yaw) * Quaternion::from_angle_x(self.pitch)).normalize()
    }

    /// Unit vector the player is facing.
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation().rotate_vector(-Vector3::unit_z())
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Deg;

    use super::*;

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn zero_orientation_faces_negative_z() {
        assert_close(LookOrientation::default().forward(), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn quarter_yaw_turns_left() {
        let look = LookOrientation::new(Deg(90.0), Deg(0.0));
        assert_close(look.forward(), Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn pitch_is_clamped_to_straight_up_and_down() {
        let mut look = LookOrientation::default();
        look.apply_mouse_delta((0.0, -10_000.0), 0.002);
        assert_eq!(look.pitch, Rad(FRAC_PI_2));
        assert_close(look.forward(), Vector3::new(0.0, 1.0, 0.0));

        look.apply_mouse_delta((0.0, 20_000.0), 0.002);
        assert_eq!(look.pitch, Rad(-FRAC_PI_2));
    }

    #[test]
    fn yaw_is_not_clamped() {
        let mut look = LookOrientation::default();
        look.apply_mouse_delta((-10_000.0, 0.0), 0.002);
        assert!((look.yaw.0 - 20.0).abs() < 1e-4);
    }

    #[test]
    fn looking_straight_up_keeps_a_valid_rotation() {
        let look = LookOrientation::new(Deg(37.0), Deg(90.0));
        assert!((look.rotation().magnitude() - 1.0).abs() < 1e-5);
        assert!(look.forward().y > 0.9999);
    }
}
