//! # Voxel Sandbox
//!
//! A small first-person voxel sandbox: a fixed-size block world, a player that
//! walks, jumps and collides with it, and a mesh registry that keeps render
//! geometry in step with the blocks.
//!
//! ## Key Modules
//!
//! * `application_state` - winit window, input capture and the frame clock
//! * `config` - JSON configuration with defaults for every setting
//! * `engine_state` - The grid, the player physics and the render boundary
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_sandbox::run();
//! }
//! ```
//!
//! The engine itself runs without a window:
//!
//! ```
//! use voxel_sandbox::{EngineState, HeadlessSurface, SandboxConfig};
//!
//! let engine = EngineState::new(&SandboxConfig::default(), HeadlessSurface::new());
//! assert_eq!(engine.registry.len(), 20 * 3 * 20);
//! ```

use application_state::ApplicationState;
use log::info;
use winit::event_loop::EventLoop;

pub mod application_state;
pub mod config;
pub mod engine_state;

pub use config::{ConfigError, SandboxConfig};
pub use engine_state::{
    camera_state::look::LookOrientation,
    physics::{CollisionMode, CollisionResolver, MovementIntent, PhysicsSettings, PlayerBody},
    rendering::{BlockMesh, HeadlessSurface, MeshRegistry, RenderSurface, Viewpoint},
    voxels::{block::block_type::BlockType, error::WorldError, grid::VoxelGrid},
    EngineState, PlayerAction,
};

/// Starts the sandbox: logging, config, window and event loop.
///
/// Returns when the window is closed.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");

    let config = SandboxConfig::load_or_default(SandboxConfig::path_from_env());

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("failed to create event loop: {}", e);
            return;
        }
    };

    let mut state = ApplicationState::new(config);
    if let Err(e) = event_loop.run_app(&mut state) {
        log::error!("event loop stopped with an error: {}", e);
    }
}
