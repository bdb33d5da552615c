//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine:
//! block type definitions, the six block faces, and per-face texture lookup.

use block_type::BlockType;
use cgmath::Vector3;

pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Maps each block type to its texture indices for each face.
///
/// The outer array is indexed by `BlockType` as a `usize`.
/// The inner array holds one texture index per face in `BlockSide` order:
/// [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
pub static BLOCK_TYPE_TO_TEXTURE_INDICES: [[usize; 6]; 3] = [
    [0, 0, 0, 0, 0, 0], // AIR (never meshed)
    [1, 1, 1, 1, 1, 1], // DIRT
    [2, 2, 1, 3, 2, 2], // GRASS (top: 3, bottom: dirt, sides: 2)
];

/// Represents the six faces of a voxel block.
///
/// The discriminants match the order used by `BLOCK_TYPE_TO_TEXTURE_INDICES`.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The face pointing towards positive Z
    FRONT = 0,

    /// The face pointing towards negative Z
    BACK = 1,

    /// The face pointing towards negative Y
    BOTTOM = 2,

    /// The face pointing towards positive Y
    TOP = 3,

    /// The face pointing towards negative X
    LEFT = 4,

    /// The face pointing towards positive X
    RIGHT = 5,
}

impl BlockSide {
    /// All six faces in texture-table order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Unit grid offset from a block to the neighbour sharing this face.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }
}

/// Gets the texture indices for all faces of a block type.
///
/// # Arguments
/// * `block_type` - The block type to look up
///
/// # Returns
/// An array of 6 texture indices, one for each face in `BlockSide` order.
pub fn texture_indices(block_type: BlockType) -> [usize; 6] {
    BLOCK_TYPE_TO_TEXTURE_INDICES[block_type as usize]
}
