//! # Mesh Registry
//!
//! Keeps exactly one [`BlockMesh`] per solid voxel, keyed by the voxel's grid
//! coordinate.
//!
//! ## Consistency
//!
//! Once all edits have been propagated, a mesh exists for coordinate `C` if and
//! only if the grid holds a solid block at `C`. Every insertion and removal is
//! also queued as a [`MeshDelta`] so the render surface only has to look at
//! what changed since it last drained the queue.

use std::collections::{hash_map::Entry, HashMap};

use cgmath::Point3;

use crate::engine_state::voxels::grid::VoxelGrid;

use super::block_mesh::BlockMesh;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum MeshRegistryError {
    #[error("a mesh already exists for voxel {0:?}")]
    AlreadyPresent(Point3<i32>),

    #[error("voxel {0:?} is not solid and cannot be meshed")]
    NotSolid(Point3<i32>),
}

/// A change to the registry that the render surface has not seen yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshDelta {
    Added(Point3<i32>),
    Removed(Point3<i32>),
}

/// Mapping from solid voxel coordinate to its owned mesh.
#[derive(Debug, Default)]
pub struct MeshRegistry {
    meshes: HashMap<Point3<i32>, BlockMesh>,
    pending: Vec<MeshDelta>,
}

impl MeshRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the mesh for the solid voxel at `position`.
    ///
    /// # Errors
    /// - `NotSolid` if the grid holds air at `position`
    /// - `AlreadyPresent` if a mesh is already registered there; the existing
    ///   mesh is kept
    pub fn add_mesh(
        &mut self,
        grid: &VoxelGrid,
        position: Point3<i32>,
    ) -> Result<&BlockMesh, MeshRegistryError> {
        match self.meshes.entry(position) {
            Entry::Occupied(_) => Err(MeshRegistryError::AlreadyPresent(position)),
            Entry::Vacant(slot) => {
                let mesh = BlockMesh::cube(position, grid.get_at(position))
                    .ok_or(MeshRegistryError::NotSolid(position))?;
                self.pending.push(MeshDelta::Added(position));
                log::debug!("mesh added at {:?} ({:?})", position, mesh.material);
                Ok(slot.insert(mesh))
            }
        }
    }

    /// Removes and returns the mesh at `position`.
    ///
    /// Removing a coordinate without a mesh is a no-op, so calling this twice
    /// is safe.
    pub fn remove_mesh(&mut self, position: Point3<i32>) -> Option<BlockMesh> {
        let removed = self.meshes.remove(&position)?;
        self.pending.push(MeshDelta::Removed(position));
        log::debug!("mesh removed at {:?}", position);
        Some(removed)
    }

    /// Brings the registry in line with the grid: meshes every solid cell that
    /// has none and drops meshes whose cell is no longer solid.
    ///
    /// # Returns
    /// The number of meshes added and removed.
    pub fn sync_with_grid(&mut self, grid: &VoxelGrid) -> (usize, usize) {
        let stale: Vec<Point3<i32>> = self
            .meshes
            .keys()
            .copied()
            .filter(|&position| !grid.get_at(position).is_solid())
            .collect();
        for &position in &stale {
            self.remove_mesh(position);
        }

        let mut added = 0;
        for (position, _) in grid.solid_cells() {
            if !self.meshes.contains_key(&position) && self.add_mesh(grid, position).is_ok() {
                added += 1;
            }
        }

        (added, stale.len())
    }

    pub fn get(&self, position: Point3<i32>) -> Option<&BlockMesh> {
        self.meshes.get(&position)
    }

    pub fn contains(&self, position: Point3<i32>) -> bool {
        self.meshes.contains_key(&position)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Whether there are changes the render surface has not consumed.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Takes every queued change, oldest first.
    pub fn drain_deltas(&mut self) -> Vec<MeshDelta> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use crate::engine_state::voxels::generation::{generate, GeneratorSettings};

    fn grid_with(cells: &[(i32, i32, i32, BlockType)]) -> VoxelGrid {
        let mut grid = VoxelGrid::new(4, 4, 4);
        for &(x, y, z, block_type) in cells {
            grid.set(x, y, z, block_type).unwrap();
        }
        grid
    }

    #[test]
    fn add_mesh_registers_one_entry_per_voxel() {
        let grid = grid_with(&[(1, 1, 1, BlockType::GRASS)]);
        let mut registry = MeshRegistry::new();

        let mesh = registry.add_mesh(&grid, Point3::new(1, 1, 1)).unwrap();
        assert_eq!(mesh.center, Point3::new(1.5, 1.5, 1.5));
        assert_eq!(registry.len(), 1);

        assert_eq!(
            registry.add_mesh(&grid, Point3::new(1, 1, 1)),
            Err(MeshRegistryError::AlreadyPresent(Point3::new(1, 1, 1)))
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.drain_deltas(), vec![MeshDelta::Added(Point3::new(1, 1, 1))]);
    }

    #[test]
    fn add_mesh_rejects_air() {
        let grid = grid_with(&[]);
        let mut registry = MeshRegistry::new();
        assert_eq!(
            registry.add_mesh(&grid, Point3::new(0, 0, 0)),
            Err(MeshRegistryError::NotSolid(Point3::new(0, 0, 0)))
        );
        assert!(registry.is_empty());
        assert!(!registry.has_pending());
    }

    #[test]
    fn remove_mesh_only_touches_its_coordinate_and_is_idempotent() {
        let grid = grid_with(&[(0, 0, 0, BlockType::DIRT), (1, 0, 0, BlockType::DIRT)]);
        let mut registry = MeshRegistry::new();
        registry.add_mesh(&grid, Point3::new(0, 0, 0)).unwrap();
        registry.add_mesh(&grid, Point3::new(1, 0, 0)).unwrap();
        registry.drain_deltas();

        assert!(registry.remove_mesh(Point3::new(0, 0, 0)).is_some());
        assert!(!registry.contains(Point3::new(0, 0, 0)));
        assert!(registry.contains(Point3::new(1, 0, 0)));

        assert!(registry.remove_mesh(Point3::new(0, 0, 0)).is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.drain_deltas(), vec![MeshDelta::Removed(Point3::new(0, 0, 0))]);
    }

    #[test]
    fn sync_with_grid_matches_solid_cells_exactly() {
        let mut grid = generate(5, 3, 5, &GeneratorSettings::default());
        let mut registry = MeshRegistry::new();

        assert_eq!(registry.sync_with_grid(&grid), (75, 0));
        for (position, _) in grid.solid_cells() {
            assert!(registry.contains(position));
        }

        grid.set(2, 2, 2, BlockType::AIR).unwrap();
        assert_eq!(registry.sync_with_grid(&grid), (0, 1));
        assert!(!registry.contains(Point3::new(2, 2, 2)));
        assert_eq!(registry.len(), 74);
        assert_eq!(registry.sync_with_grid(&grid), (0, 0));
    }
}
