//! Axis-aligned bounding boxes and the grid cells they cover.

use cgmath::{Point3, Vector3};

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Aabb { min, max }
    }

    /// Box of the given full size centered on `center`.
    pub fn from_center_size(center: Point3<f32>, size: Vector3<f32>) -> Self {
        let half = size * 0.5;
        Aabb {
            min: center - half,
            max: center + half,
        }
    }

    /// Copy of the box moved by `offset`.
    pub fn translated(&self, offset: Vector3<f32>) -> Self {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Self {
        Aabb {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Whether the two boxes share volume. Boxes that only touch do not
    /// intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Integer cells the box touches: `floor(min) ..< ceil(max)` on each axis.
    ///
    /// A box whose face lies exactly on a cell boundary does not reach into the
    /// neighbouring cell.
    pub fn cell_range(&self) -> (Point3<i32>, Point3<i32>) {
        (
            Point3::new(
                self.min.x.floor() as i32,
                self.min.y.floor() as i32,
                self.min.z.floor() as i32,
            ),
            Point3::new(
                self.max.x.ceil() as i32,
                self.max.y.ceil() as i32,
                self.max.z.ceil() as i32,
            ),
        )
    }

    /// Every cell in [`Aabb::cell_range`], Y outermost and ascending.
    pub fn cells(&self) -> impl Iterator<Item = Point3<i32>> {
        let (lo, hi) = self.cell_range();
        (lo.y..hi.y).flat_map(move |y| {
            (lo.z..hi.z).flat_map(move |z| (lo.x..hi.x).map(move |x| Point3::new(x, y, z)))
        })
    }
}
