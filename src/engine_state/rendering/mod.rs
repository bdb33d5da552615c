//! Render-facing side of the engine.
//!
//! The engine never draws anything itself. It keeps a [`MeshRegistry`] in step
//! with the voxel grid and hands a [`RenderSurface`] two things:
//! - mesh creation/destruction requests, only when voxels change
//! - the current [`Viewpoint`], once per frame
//!
//! Scene setup, lighting, projection and the draw call live behind the trait.

use cgmath::{Point3, Quaternion};

pub mod block_mesh;
mod headless;
pub mod mesh_registry;
mod vertex;

pub use block_mesh::{BlockMesh, Material};
pub use headless::HeadlessSurface;
pub use mesh_registry::{MeshDelta, MeshRegistry};
pub use vertex::Vertex;

/// Where the player looks from, handed to the surface every frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewpoint {
    /// Eye position in world space.
    pub eye: Point3<f32>,
    /// Look rotation; the camera looks down its rotated -Z axis.
    pub orientation: Quaternion<f32>,
}

/// Anything that can show the voxel world.
///
/// Implementations must treat a removal for a coordinate they never received
/// as a no-op.
pub trait RenderSurface {
    /// A solid voxel gained a mesh.
    fn mesh_added(&mut self, position: Point3<i32>, mesh: &BlockMesh);

    /// The voxel at `position` lost its mesh.
    fn mesh_removed(&mut self, position: Point3<i32>);

    /// Draws a frame from `viewpoint`.
    fn present(&mut self, viewpoint: &Viewpoint);
}

/// Forwards every pending registry change to `surface`, oldest first.
///
/// An addition whose mesh was removed again before this call is skipped; the
/// matching removal is still forwarded.
///
/// # Returns
/// The number of deltas consumed.
pub fn sync_surface(registry: &mut MeshRegistry, surface: &mut dyn RenderSurface) -> usize {
    let deltas = registry.drain_deltas();
    for delta in &deltas {
        match *delta {
            MeshDelta::Added(position) => {
                if let Some(mesh) = registry.get(position) {
                    surface.mesh_added(position, mesh);
                }
            }
            MeshDelta::Removed(position) => surface.mesh_removed(position),
        }
    }
    deltas.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{block::block_type::BlockType, grid::VoxelGrid};

    #[test]
    fn surface_only_sees_changes_once() {
        let mut grid = VoxelGrid::new(3, 3, 3);
        grid.set(0, 0, 0, BlockType::DIRT).unwrap();
        grid.set(1, 0, 0, BlockType::GRASS).unwrap();

        let mut registry = MeshRegistry::new();
        let mut surface = HeadlessSurface::new();
        registry.sync_with_grid(&grid);

        assert_eq!(sync_surface(&mut registry, &mut surface), 2);
        assert_eq!(surface.mesh_count(), 2);
        assert_eq!(sync_surface(&mut registry, &mut surface), 0);

        grid.set(0, 0, 0, BlockType::AIR).unwrap();
        registry.remove_mesh(Point3::new(0, 0, 0));
        assert_eq!(sync_surface(&mut registry, &mut surface), 1);
        assert_eq!(surface.mesh_count(), 1);
        assert!(surface.has_mesh(Point3::new(1, 0, 0)));
    }

    #[test]
    fn add_then_remove_in_one_batch_leaves_nothing_behind() {
        let mut grid = VoxelGrid::new(2, 2, 2);
        grid.set(1, 1, 1, BlockType::DIRT).unwrap();

        let mut registry = MeshRegistry::new();
        let mut surface = HeadlessSurface::new();
        registry.add_mesh(&grid, Point3::new(1, 1, 1)).unwrap();
        registry.remove_mesh(Point3::new(1, 1, 1));

        assert_eq!(sync_surface(&mut registry, &mut surface), 2);
        assert_eq!(surface.mesh_count(), 0);
    }
}
