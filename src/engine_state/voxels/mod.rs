//! # Voxel World
//!
//! The world is a single fixed-size [`grid::VoxelGrid`] of blocks. There is no
//! chunking and no streaming; the whole grid lives in one flat allocation for
//! the lifetime of the session.
//!
//! ## Components
//!
//! * **Block**: block types, the six faces, per-face texture indices
//! * **Grid**: dense block storage with bounds-checked writes
//! * **Generation**: filling a new grid (layered or Perlin terrain)
//! * **Edit**: placing and removing blocks while keeping meshes in step
//! * **Raycast**: finding the block the player is looking at
//!
//! ## Data Flow
//!
//! 1. A grid is generated once at startup
//! 2. The mesh registry is synced against it, one mesh per solid cell
//! 3. Edits write the grid and the registry together
//! 4. Physics only ever reads the grid

pub mod block;
pub mod edit;
pub mod error;
pub mod generation;
pub mod grid;
pub mod raycast;
