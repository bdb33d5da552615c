//! Errors raised by voxel writes and block edits.

use cgmath::Point3;

use crate::engine_state::rendering::mesh_registry::MeshRegistryError;

use super::block::block_type::BlockType;

/// Result alias for voxel operations.
pub type WorldResult<T> = Result<T, WorldError>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("voxel {position:?} is outside the {width}x{height}x{depth} grid")]
    OutOfBounds {
        position: Point3<i32>,
        width: usize,
        height: usize,
        depth: usize,
    },

    #[error("cannot place {0:?}, only solid blocks can be placed")]
    NotPlaceable(BlockType),

    #[error("voxel {0:?} is already occupied")]
    Occupied(Point3<i32>),

    #[error("voxel {0:?} overlaps the player")]
    OverlapsPlayer(Point3<i32>),

    #[error(transparent)]
    Mesh(#[from] MeshRegistryError),
}
