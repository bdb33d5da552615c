//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification, conversion and
//! the solidity rules the physics relies on.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The `FromPrimitive` derive allows conversion from the compact byte
/// representation stored in the grid back into the rich enum type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// An air block, which is passable and never rendered.
    AIR,

    /// A plain dirt block.
    DIRT,

    /// A grass block. Collides exactly like dirt but renders with its own material.
    GRASS,
}

impl Default for BlockType {
    fn default() -> Self {
        BlockType::AIR
    }
}

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// Unknown ids decode as `AIR`, so a corrupted cell can never become
    /// collidable geometry.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    pub fn from_int(btype: BlockTypeSize) -> Self {
        num_traits::FromPrimitive::from_u8(btype).unwrap_or(BlockType::AIR)
    }

    /// Returns the compact id stored in the grid.
    pub fn as_int(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Whether the block stops player movement.
    pub fn is_solid(self) -> bool {
        !matches!(self, BlockType::AIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_air_is_passable() {
        assert!(!BlockType::AIR.is_solid());
        assert!(BlockType::DIRT.is_solid());
        assert!(BlockType::GRASS.is_solid());
    }

    #[test]
    fn unknown_ids_decode_as_air() {
        assert_eq!(BlockType::from_int(BlockType::GRASS.as_int()), BlockType::GRASS);
        assert_eq!(BlockType::from_int(200), BlockType::AIR);
    }

    #[test]
    fn block_types_use_lowercase_names_in_config() {
        let parsed: BlockType = serde_json::from_str("\"grass\"").unwrap();
        assert_eq!(parsed, BlockType::GRASS);
    }
}
