//! Block placement and removal.
//!
//! Both operations write the grid and update the mesh registry in the same
//! call, so the one-mesh-per-solid-cell rule holds after every edit.

use cgmath::{Point3, Vector3};

use crate::engine_state::{
    physics::{aabb::Aabb, player::PlayerBody},
    rendering::mesh_registry::MeshRegistry,
};

use super::{
    block::block_type::BlockType,
    error::{WorldError, WorldResult},
    grid::VoxelGrid,
};

fn ensure_in_bounds(grid: &VoxelGrid, position: Point3<i32>) -> WorldResult<()> {
    if grid.contains(position.x, position.y, position.z) {
        return Ok(());
    }
    let (width, height, depth) = grid.dimensions();
    Err(WorldError::OutOfBounds {
        position,
        width,
        height,
        depth,
    })
}

fn cell_box(position: Point3<i32>) -> Aabb {
    let min = Point3::new(position.x as f32, position.y as f32, position.z as f32);
    Aabb::new(min, min + Vector3::new(1.0, 1.0, 1.0))
}

/// Places a solid block into an empty cell.
///
/// # Errors
/// - `NotPlaceable` for `AIR`
/// - `OutOfBounds` outside the grid
/// - `Occupied` if the cell already holds a solid block
/// - `OverlapsPlayer` if the block would intersect the player's box
pub fn place(
    grid: &mut VoxelGrid,
    registry: &mut MeshRegistry,
    player: &PlayerBody,
    position: Point3<i32>,
    block_type: BlockType,
) -> WorldResult<()> {
    if !block_type.is_solid() {
        return Err(WorldError::NotPlaceable(block_type));
    }
    ensure_in_bounds(grid, position)?;
    if grid.get_at(position).is_solid() {
        return Err(WorldError::Occupied(position));
    }
    if cell_box(position).intersects(&player.bounding_box()) {
        return Err(WorldError::OverlapsPlayer(position));
    }

    grid.set_at(position, block_type)?;
    registry.add_mesh(grid, position)?;
    log::debug!("placed {:?} at {:?}", block_type, position);
    Ok(())
}

/// Clears a cell.
///
/// # Returns
/// The block that was removed, or `None` if the cell was already empty.
///
/// # Errors
/// `OutOfBounds` outside the grid.
pub fn remove(
    grid: &mut VoxelGrid,
    registry: &mut MeshRegistry,
    position: Point3<i32>,
) -> WorldResult<Option<BlockType>> {
    let previous = grid.set_at(position, BlockType::AIR)?;
    if !previous.is_solid() {
        return Ok(None);
    }

    registry.remove_mesh(position);
    log::debug!("removed {:?} at {:?}", previous, position);
    Ok(Some(previous))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        physics::player::PlayerDimensions,
        rendering::mesh_registry::MeshDelta,
        voxels::generation::{generate, GeneratorSettings},
    };

    struct Fixture {
        grid: VoxelGrid,
        registry: MeshRegistry,
        player: PlayerBody,
    }

    fn fixture() -> Fixture {
        let grid = generate(8, 6, 8, &GeneratorSettings::default());
        let mut registry = MeshRegistry::new();
        registry.sync_with_grid(&grid);
        registry.drain_deltas();
        Fixture {
            grid,
            registry,
            player: PlayerBody::new(Point3::new(4.5, 3.5, 4.5), PlayerDimensions::default()),
        }
    }

    #[test]
    fn placing_writes_the_grid_and_adds_a_mesh() {
        let mut f = fixture();
        let target = Point3::new(1, 3, 1);

        place(&mut f.grid, &mut f.registry, &f.player, target, BlockType::DIRT).unwrap();

        assert_eq!(f.grid.get_at(target), BlockType::DIRT);
        assert!(f.registry.contains(target));
        assert_eq!(f.registry.drain_deltas(), vec![MeshDelta::Added(target)]);
    }

    #[test]
    fn placement_is_rejected_without_side_effects() {
        let mut f = fixture();
        let before = f.registry.len();

        let cases = [
            (Point3::new(1, 3, 1), BlockType::AIR, WorldError::NotPlaceable(BlockType::AIR)),
            (Point3::new(1, 2, 1), BlockType::DIRT, WorldError::Occupied(Point3::new(1, 2, 1))),
            (Point3::new(4, 3, 4), BlockType::DIRT, WorldError::OverlapsPlayer(Point3::new(4, 3, 4))),
            (Point3::new(4, 4, 4), BlockType::GRASS, WorldError::OverlapsPlayer(Point3::new(4, 4, 4))),
        ];
        for (target, block_type, expected) in cases {
            let result = place(&mut f.grid, &mut f.registry, &f.player, target, block_type);
            assert_eq!(result, Err(expected));
        }

        let outside = place(&mut f.grid, &mut f.registry, &f.player, Point3::new(8, 3, 0), BlockType::DIRT);
        assert!(matches!(outside, Err(WorldError::OutOfBounds { .. })));

        assert_eq!(f.registry.len(), before);
        assert!(!f.registry.has_pending());
        assert_eq!(f.grid.get(1, 3, 1), BlockType::AIR);
    }

    #[test]
    fn blocks_next_to_the_player_can_be_placed() {
        let mut f = fixture();
        let target = Point3::new(5, 3, 4);
        assert!(place(&mut f.grid, &mut f.registry, &f.player, target, BlockType::GRASS).is_ok());
    }

    #[test]
    fn removing_clears_the_cell_and_its_mesh() {
        let mut f = fixture();
        let target = Point3::new(2, 2, 2);

        assert_eq!(remove(&mut f.grid, &mut f.registry, target), Ok(Some(BlockType::GRASS)));
        assert_eq!(f.grid.get_at(target), BlockType::AIR);
        assert!(!f.registry.contains(target));
        assert_eq!(f.registry.drain_deltas(), vec![MeshDelta::Removed(target)]);

        assert_eq!(remove(&mut f.grid, &mut f.registry, target), Ok(None));
        assert!(!f.registry.has_pending());
    }

    #[test]
    fn removing_outside_the_grid_is_an_error() {
        let mut f = fixture();
        let result = remove(&mut f.grid, &mut f.registry, Point3::new(0, -1, 0));
        assert!(matches!(result, Err(WorldError::OutOfBounds { .. })));
    }
}
