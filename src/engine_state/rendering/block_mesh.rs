//! Per-block cube meshes.
//!
//! Every solid voxel owns one `BlockMesh`: a unit cube expressed relative to
//! the voxel's geometric center, plus the material its block type selects.
//! There is no face culling or merging between neighbours.

use cgmath::Point3;

use crate::engine_state::voxels::block::{block_type::BlockType, texture_indices, BlockSide};

use super::Vertex;

/// Render material of a solid block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Material {
    Dirt,
    Grass,
}

impl Material {
    /// Selects the material for a block type. Air has none.
    pub fn for_block(block_type: BlockType) -> Option<Self> {
        match block_type {
            BlockType::AIR => None,
            BlockType::DIRT => Some(Material::Dirt),
            BlockType::GRASS => Some(Material::Grass),
        }
    }

    /// Flat base color, for surfaces that draw without textures.
    pub fn base_color(self) -> [f32; 3] {
        match self {
            Material::Dirt => [0.545, 0.271, 0.075],
            Material::Grass => [0.133, 0.545, 0.133],
        }
    }
}

/// Corners of one cube face in unit-cube space: lower-left, lower-right,
/// upper-left, upper-right, counter-clockwise when seen from outside.
fn face_corners(side: BlockSide) -> [[f32; 3]; 4] {
    match side {
        BlockSide::FRONT => [[0., 0., 1.], [1., 0., 1.], [0., 1., 1.], [1., 1., 1.]],
        BlockSide::BACK => [[1., 0., 0.], [0., 0., 0.], [1., 1., 0.], [0., 1., 0.]],
        BlockSide::BOTTOM => [[0., 0., 0.], [1., 0., 0.], [0., 0., 1.], [1., 0., 1.]],
        BlockSide::TOP => [[0., 1., 1.], [1., 1., 1.], [0., 1., 0.], [1., 1., 0.]],
        BlockSide::LEFT => [[0., 0., 0.], [0., 0., 1.], [0., 1., 0.], [0., 1., 1.]],
        BlockSide::RIGHT => [[1., 0., 1.], [1., 0., 0.], [1., 1., 1.], [1., 1., 0.]],
    }
}

/// An owned cube mesh for a single voxel.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockMesh {
    /// World-space center of the voxel (grid coordinate + 0.5 on every axis).
    pub center: Point3<f32>,
    pub material: Material,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl BlockMesh {
    /// Builds the cube for the voxel at `position`.
    ///
    /// # Returns
    /// `None` when `block_type` is air.
    pub fn cube(position: Point3<i32>, block_type: BlockType) -> Option<Self> {
        let material = Material::for_block(block_type)?;
        let textures = texture_indices(block_type);

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (face_number, side) in BlockSide::all().into_iter().enumerate() {
            let texture_index = textures[side as usize];
            let uvs = [(0.0, 1.0), (1.0, 1.0), (0.0, 0.0), (1.0, 0.0)];
            for (corner, (u, v)) in face_corners(side).into_iter().zip(uvs) {
                let centered = [corner[0] - 0.5, corner[1] - 0.5, corner[2] - 0.5];
                vertices.push(Vertex::new(centered, texture_index, u, v));
            }

            let base = face_number as u32 * 4;
            indices.extend_from_slice(&[base, base + 1, base + 3, base, base + 3, base + 2]);
        }

        Some(BlockMesh {
            center: Point3::new(
                position.x as f32 + 0.5,
                position.y as f32 + 0.5,
                position.z as f32 + 0.5,
            ),
            material,
            vertices,
            indices,
        })
    }

    /// Vertex positions translated into world space.
    pub fn world_positions(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.vertices.iter().map(|vertex| {
            Point3::new(
                self.center.x + vertex.position[0],
                self.center.y + vertex.position[1],
                self.center.z + vertex.position[2],
            )
        })
    }
}
