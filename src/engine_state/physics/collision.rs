//! # Collision Resolver
//!
//! Integrates gravity and movement intent into a [`PlayerBody`] and resolves
//! the result against a [`VoxelGrid`], one axis at a time.
//!
//! ## Tick order
//!
//! 1. Gravity: `velocity.y -= gravity * delta`
//! 2. Intent: `velocity.x/z` are *assigned* from the held keys and the look
//!    rotation, so releasing every key stops the player within the same tick
//! 3. Y axis
//! 4. X axis, then Z axis (Full mode only)
//!
//! ## Support height
//!
//! The collision box is centered on the eye. When the body lands on a solid
//! cell at grid height `y`, the eye is snapped to `y + 1.5`, half a block
//! above the cell's top face. For horizontal sweeps the body is therefore
//! taken to span from half a block under the eye up to the top of the box,
//! which keeps the floor out of the wall checks.
//!
//! ## Known limitation
//!
//! Legacy mode only inspects cells around the pre-move box, so a large
//! `delta` (e.g. after the process was suspended) lets the body skip through
//! thin floors. Full mode sweeps the box over the whole step on every axis.

use cgmath::{Point3, Vector3};

use crate::engine_state::{camera_state::look::LookOrientation, voxels::grid::VoxelGrid};

use super::{
    aabb::Aabb,
    movement::{desired_horizontal_velocity, MovementIntent},
    player::PlayerBody,
    CollisionMode, PhysicsSettings,
};

/// Height of the eye above the bottom of the cell it stands on.
pub const SUPPORT_EYE_HEIGHT: f32 = 1.5;

/// Gap kept between the box and a wall it was clamped against.
const SKIN: f32 = 1e-4;

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The body was snapped onto a supporting cell.
    pub landed: bool,
    /// Upward motion was stopped by a cell above.
    pub hit_ceiling: bool,
    pub blocked_x: bool,
    pub blocked_z: bool,
}

#[derive(Clone, Copy, Debug)]
enum HorizontalAxis {
    X = 0,
    Z = 2,
}

/// Per-axis player integrator.
#[derive(Clone, Debug, Default)]
pub struct CollisionResolver {
    pub settings: PhysicsSettings,
}

impl CollisionResolver {
    pub fn new(settings: PhysicsSettings) -> Self {
        Self { settings }
    }

    /// Advances `body` by `delta` seconds.
    ///
    /// Jump commands are not handled here; they are applied to the body with
    /// [`PlayerBody::jump`] before the tick that should carry them.
    pub fn step(
        &self,
        body: &mut PlayerBody,
        grid: &VoxelGrid,
        intent: &MovementIntent,
        look: &LookOrientation,
        delta: f32,
    ) -> TickOutcome {
        body.velocity.y -= self.settings.gravity * delta;

        let (vx, vz) = desired_horizontal_velocity(intent, look, self.settings.move_speed);
        body.velocity.x = vx;
        body.velocity.z = vz;

        let pre_move = body.bounding_box();
        let mut outcome = TickOutcome::default();

        match self.settings.collision_mode {
            CollisionMode::Legacy => {
                resolve_y_legacy(body, grid, &pre_move, delta, &mut outcome);
                body.position.x += body.velocity.x * delta;
                body.position.z += body.velocity.z * delta;
            }
            CollisionMode::Full => {
                resolve_y(body, grid, &pre_move, delta, &mut outcome);
                outcome.blocked_x = resolve_horizontal(body, grid, HorizontalAxis::X, delta);
                outcome.blocked_z = resolve_horizontal(body, grid, HorizontalAxis::Z, delta);
            }
        }

        if outcome.landed {
            log::trace!("landed at y = {}", body.position.y);
        }
        outcome
    }
}

/// Reference behaviour: scan the pre-move box and snap onto the first solid
/// cell (lowest Y first) whose support height the body has fallen below.
fn resolve_y_legacy(
    body: &mut PlayerBody,
    grid: &VoxelGrid,
    pre_move: &Aabb,
    delta: f32,
    outcome: &mut TickOutcome,
) {
    body.position.y += body.velocity.y * delta;

    for cell in pre_move.cells() {
        if !grid.is_solid(cell.x, cell.y, cell.z) {
            continue;
        }
        let support = cell.y as f32 + SUPPORT_EYE_HEIGHT;
        if body.velocity.y < 0.0 && body.position.y < support {
            body.position.y = support;
            body.velocity.y = 0.0;
            body.on_ground = true;
            outcome.landed = true;
        }
    }
}

fn resolve_y(
    body: &mut PlayerBody,
    grid: &VoxelGrid,
    pre_move: &Aabb,
    delta: f32,
    outcome: &mut TickOutcome,
) {
    let start_y = body.position.y;
    let dy = body.velocity.y * delta;
    body.position.y += dy;
    body.on_ground = false;

    let swept = pre_move.union(&pre_move.translated(Vector3::new(0.0, dy, 0.0)));
    let solid = |cell: &Point3<i32>| grid.is_solid(cell.x, cell.y, cell.z);

    if body.velocity.y <= 0.0 {
        // Only cells whose top is at or below the eye can hold the body up.
        // Resting exactly on a support counts as contact even when `dy` is
        // too small to move the eye.
        let support = swept
            .cells()
            .filter(solid)
            .filter(|cell| (cell.y + 1) as f32 <= start_y + SKIN)
            .map(|cell| cell.y as f32 + SUPPORT_EYE_HEIGHT)
            .filter(|&support| body.position.y <= support + SKIN)
            .reduce(f32::max);

        if let Some(support) = support {
            body.position.y = support;
            body.velocity.y = 0.0;
            body.on_ground = true;
            outcome.landed = true;
        }
    } else if body.velocity.y > 0.0 {
        let half_height = body.dimensions.height * 0.5;
        let ceiling = swept
            .cells()
            .filter(solid)
            .filter(|cell| cell.y as f32 >= pre_move.max.y - SKIN)
            .map(|cell| cell.y as f32 - half_height - SKIN)
            .reduce(f32::min);

        if let Some(limit) = ceiling {
            if body.position.y > limit {
                body.position.y = limit.max(start_y);
                body.velocity.y = 0.0;
                outcome.hit_ceiling = true;
            }
        }
    }
}

/// The part of the body that walls can stop: from half a block under the eye
/// (the standing surface) to the top of the collision box.
fn wall_box(body: &PlayerBody) -> Aabb {
    let full = body.bounding_box();
    let feet = body.position.y - (SUPPORT_EYE_HEIGHT - 1.0) + SKIN;
    Aabb::new(Point3::new(full.min.x, feet, full.min.z), full.max)
}

/// Moves the body along one horizontal axis and clamps it against the
/// nearest solid cell in the way.
///
/// # Returns
/// `true` if the move was blocked.
fn resolve_horizontal(
    body: &mut PlayerBody,
    grid: &VoxelGrid,
    axis: HorizontalAxis,
    delta: f32,
) -> bool {
    let a = axis as usize;
    let velocity = body.velocity[a];
    if velocity == 0.0 {
        return false;
    }

    let before = wall_box(body);
    body.position[a] += velocity * delta;
    let after = wall_box(body);
    let half_width = body.dimensions.width * 0.5;

    let cells = before.union(&after).cells();
    let limit = if velocity > 0.0 {
        cells
            .filter(|cell| grid.is_solid(cell.x, cell.y, cell.z))
            .map(|cell| cell[a] as f32)
            .filter(|&near_face| near_face >= before.max[a] - SKIN)
            .map(|near_face| near_face - half_width - SKIN)
            .reduce(f32::min)
    } else {
        cells
            .filter(|cell| grid.is_solid(cell.x, cell.y, cell.z))
            .map(|cell| cell[a] as f32 + 1.0)
            .filter(|&near_face| near_face <= before.min[a] + SKIN)
            .map(|near_face| near_face + half_width + SKIN)
            .reduce(f32::max)
    };

    match limit {
        Some(limit) => {
            body.position[a] = limit;
            body.velocity[a] = 0.0;
            true
        }
        None => false,
    }
}
