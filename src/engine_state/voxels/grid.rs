//! # Voxel Grid Module
//!
//! This module provides the `VoxelGrid` struct, the dense occupancy store the
//! player collides against and the mesh registry mirrors.
//!
//! ## Memory Layout
//!
//! Cells are stored as one `BlockTypeSize` byte each in a flat vector, indexed
//! `y * W * D + z * W + x`. A full Y plane is therefore contiguous, which keeps
//! the collision sweeps (which iterate Y outermost) cache friendly.
//!
//! ## Bounds
//!
//! Reads never fail: any coordinate outside `[0, W) x [0, H) x [0, D)` reads as
//! `AIR`. Writes are checked and rejected with `WorldError::OutOfBounds`.

use cgmath::Point3;

use super::{
    block::{block_type::BlockType, BlockTypeSize},
    error::{WorldError, WorldResult},
};

/// A fixed-size dense 3D grid of blocks.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::VoxelGrid;
/// use voxel_sandbox::BlockType;
///
/// let mut grid = VoxelGrid::new(4, 4, 4);
/// grid.set(1, 0, 1, BlockType::DIRT).unwrap();
/// assert_eq!(grid.get(1, 0, 1), BlockType::DIRT);
/// assert_eq!(grid.get(-1, 0, 0), BlockType::AIR);
/// ```
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    width: usize,
    height: usize,
    depth: usize,
    cells: Vec<BlockTypeSize>,
}

impl VoxelGrid {
    /// Creates a grid of the given dimensions with every cell set to `AIR`.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        VoxelGrid {
            width,
            height,
            depth,
            cells: vec![BlockType::AIR.as_int(); width * height * depth],
        }
    }

    /// Returns `(width, height, depth)` in blocks.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    /// Whether the coordinate lies inside the grid.
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.index(x, y, z).is_some()
    }

    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some(y * self.width * self.depth + z * self.width + x)
    }

    /// Reads the block at the given coordinate.
    ///
    /// Out-of-range coordinates return `AIR`; there is no error path.
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockType {
        match self.index(x, y, z) {
            Some(index) => BlockType::from_int(self.cells[index]),
            None => BlockType::AIR,
        }
    }

    /// Reads the block at a grid point. See [`VoxelGrid::get`].
    pub fn get_at(&self, position: Point3<i32>) -> BlockType {
        self.get(position.x, position.y, position.z)
    }

    /// Whether the block at the coordinate is solid. Out of range is never solid.
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z).is_solid()
    }

    /// Writes a block and returns the block it replaced.
    ///
    /// # Errors
    /// Returns `WorldError::OutOfBounds` and leaves the grid untouched when the
    /// coordinate is outside the grid.
    pub fn set(&mut self, x: i32, y: i32, z: i32, value: BlockType) -> WorldResult<BlockType> {
        let Some(index) = self.index(x, y, z) else {
            return Err(WorldError::OutOfBounds {
                position: Point3::new(x, y, z),
                width: self.width,
                height: self.height,
                depth: self.depth,
            });
        };

        let previous = BlockType::from_int(self.cells[index]);
        self.cells[index] = value.as_int();
        Ok(previous)
    }

    /// Writes a block at a grid point. See [`VoxelGrid::set`].
    pub fn set_at(&mut self, position: Point3<i32>, value: BlockType) -> WorldResult<BlockType> {
        self.set(position.x, position.y, position.z, value)
    }

    /// Iterates over every solid cell in storage order.
    pub fn solid_cells(&self) -> impl Iterator<Item = (Point3<i32>, BlockType)> + '_ {
        let plane = self.width * self.depth;
        self.cells.iter().enumerate().filter_map(move |(index, &cell)| {
            let block_type = BlockType::from_int(cell);
            if !block_type.is_solid() {
                return None;
            }
            let y = index / plane;
            let z = (index % plane) / self.width;
            let x = index % self.width;
            Some((Point3::new(x as i32, y as i32, z as i32), block_type))
        })
    }

    /// Returns the Y coordinate of the highest solid block in a column, if any.
    pub fn column_top(&self, x: i32, z: i32) -> Option<i32> {
        (0..self.height as i32).rev().find(|&y| self.is_solid(x, y, z))
    }
}
