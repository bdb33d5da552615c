//! # World Generation
//!
//! Fills a fresh [`VoxelGrid`] from a [`GeneratorSettings`] description.
//!
//! Two strategies are supported:
//! - Layered: every column gets the same bottom-up stack of blocks
//! - Perlin: 2D Perlin noise picks a surface height per column

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::{block::block_type::BlockType, grid::VoxelGrid};

/// How a new world is filled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeneratorSettings {
    /// Bottom-up list of block types; layer `i` fills `y = i` in every column.
    Layered { layers: Vec<BlockType> },
    /// Rolling terrain: dirt up to a noise-driven surface capped with grass.
    Perlin {
        seed: u32,
        /// Scaling applied to block coordinates before sampling the noise.
        scale: f64,
        /// Surface height where the noise is zero.
        base_height: f64,
        /// Maximum deviation from `base_height`, in blocks.
        amplitude: f64,
    },
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorSettings::Layered {
            layers: vec![BlockType::DIRT, BlockType::DIRT, BlockType::GRASS],
        }
    }
}

/// Builds a grid of the given dimensions using `settings`.
pub fn generate(width: usize, height: usize, depth: usize, settings: &GeneratorSettings) -> VoxelGrid {
    let mut grid = VoxelGrid::new(width, height, depth);
    if height == 0 {
        return grid;
    }

    match settings {
        GeneratorSettings::Layered { layers } => {
            for (y, &block_type) in layers.iter().enumerate() {
                for z in 0..depth as i32 {
                    for x in 0..width as i32 {
                        fill(&mut grid, x, y as i32, z, block_type);
                    }
                }
            }
        }
        GeneratorSettings::Perlin {
            seed,
            scale,
            base_height,
            amplitude,
        } => {
            let perlin = Perlin::new(*seed);
            for z in 0..depth as i32 {
                for x in 0..width as i32 {
                    let sample = perlin.get([x as f64 * scale, z as f64 * scale]);
                    let surface = (base_height + sample * amplitude).round() as i32;
                    let surface = surface.clamp(0, height as i32 - 1);
                    for y in 0..surface {
                        fill(&mut grid, x, y, z, BlockType::DIRT);
                    }
                    fill(&mut grid, x, surface, z, BlockType::GRASS);
                }
            }
        }
    }

    grid
}

fn fill(grid: &mut VoxelGrid, x: i32, y: i32, z: i32, block_type: BlockType) {
    // Layers taller than the grid are cut off rather than treated as an error.
    if grid.set(x, y, z, block_type).is_err() {
        log::trace!("generator skipped out-of-range cell ({x}, {y}, {z})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_world_is_two_dirt_layers_under_grass() {
        let grid = generate(20, 3, 20, &GeneratorSettings::default());
        for z in 0..20 {
            for x in 0..20 {
                assert_eq!(grid.get(x, 0, z), BlockType::DIRT);
                assert_eq!(grid.get(x, 1, z), BlockType::DIRT);
                assert_eq!(grid.get(x, 2, z), BlockType::GRASS);
            }
        }
        assert_eq!(grid.solid_cells().count(), 20 * 3 * 20);
    }

    #[test]
    fn layers_taller_than_the_grid_are_truncated() {
        let settings = GeneratorSettings::Layered {
            layers: vec![BlockType::DIRT; 5],
        };
        let grid = generate(2, 3, 2, &settings);
        assert_eq!(grid.solid_cells().count(), 2 * 3 * 2);
    }

    #[test]
    fn perlin_columns_are_capped_with_grass() {
        let settings = GeneratorSettings::Perlin {
            seed: 7,
            scale: 0.1,
            base_height: 4.0,
            amplitude: 3.0,
        };
        let grid = generate(16, 10, 16, &settings);
        for z in 0..16 {
            for x in 0..16 {
                let top = grid.column_top(x, z).expect("every column has a surface");
                assert_eq!(grid.get(x, top, z), BlockType::GRASS);
                for y in 0..top {
                    assert_eq!(grid.get(x, y, z), BlockType::DIRT);
                }
            }
        }
    }

    #[test]
    fn perlin_generation_is_deterministic_per_seed() {
        let settings = GeneratorSettings::Perlin {
            seed: 3,
            scale: 0.07,
            base_height: 5.0,
            amplitude: 4.0,
        };
        let a = generate(12, 12, 12, &settings);
        let b = generate(12, 12, 12, &settings);
        assert!(a.solid_cells().eq(b.solid_cells()));
    }
}
