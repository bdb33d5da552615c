//! Grid traversal for picking the block under the crosshair.
//!
//! Walks the cells a ray passes through in order (Amanatides & Woo), so the
//! first solid cell reported is always the nearest one.

use cgmath::{InnerSpace, Point3, Vector3};

use super::{block::BlockSide, grid::VoxelGrid};

/// The first solid cell along a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastHit {
    /// Grid coordinate of the solid cell.
    pub position: Point3<i32>,
    /// The face the ray entered through.
    pub side: BlockSide,
    /// Distance from the ray origin to the entry point.
    pub distance: f32,
}

impl RaycastHit {
    /// The empty cell in front of the hit face, where a new block would go.
    pub fn adjacent(&self) -> Point3<i32> {
        self.position + self.side.normal()
    }
}

/// Casts a ray through the grid.
///
/// The cell containing `origin` is never reported.
///
/// # Arguments
/// * `grid` - Grid to test against
/// * `origin` - Ray start in world space
/// * `direction` - Ray direction, need not be normalized
/// * `max_distance` - How far to search
///
/// # Returns
/// The first solid cell within `max_distance`, or `None`. A zero direction
/// never hits anything.
pub fn raycast(
    grid: &VoxelGrid,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    max_distance: f32,
) -> Option<RaycastHit> {
    if direction.magnitude2() == 0.0 {
        return None;
    }
    let direction = direction.normalize();

    let mut cell = Point3::new(
        origin.x.floor() as i32,
        origin.y.floor() as i32,
        origin.z.floor() as i32,
    );
    let mut step = [0i32; 3];
    let mut t_max = [f32::INFINITY; 3];
    let mut t_delta = [f32::INFINITY; 3];

    for axis in 0..3 {
        let d = direction[axis];
        let boundary = cell[axis] as f32;
        if d > 0.0 {
            step[axis] = 1;
            t_max[axis] = (boundary + 1.0 - origin[axis]) / d;
            t_delta[axis] = 1.0 / d;
        } else if d < 0.0 {
            step[axis] = -1;
            t_max[axis] = (origin[axis] - boundary) / -d;
            t_delta[axis] = 1.0 / -d;
        }
    }

    let (width, height, depth) = grid.dimensions();
    let size = [width as i32, height as i32, depth as i32];

    loop {
        // Past the grid and heading further out: only Air remains.
        let leaving = (0..3).any(|a| {
            (cell[a] < 0 && step[a] <= 0) || (cell[a] >= size[a] && step[a] >= 0)
        });
        if leaving {
            return None;
        }

        let axis = if t_max[0] <= t_max[1] && t_max[0] <= t_max[2] {
            0
        } else if t_max[1] <= t_max[2] {
            1
        } else {
            2
        };

        let distance = t_max[axis];
        if distance > max_distance {
            return None;
        }

        cell[axis] += step[axis];
        t_max[axis] += t_delta[axis];

        if grid.is_solid(cell.x, cell.y, cell.z) {
            return Some(RaycastHit {
                position: cell,
                side: entry_side(axis, step[axis]),
                distance,
            });
        }
    }
}

fn entry_side(axis: usize, step: i32) -> BlockSide {
    match (axis, step > 0) {
        (0, true) => BlockSide::LEFT,
        (0, false) => BlockSide::RIGHT,
        (1, true) => BlockSide::BOTTOM,
        (1, false) => BlockSide::TOP,
        (_, true) => BlockSide::BACK,
        (_, false) => BlockSide::FRONT,
    }
}
