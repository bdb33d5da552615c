//! # Voxel Sandbox Entry Point
//!
//! Calls into the library's `run()`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- [path/to/config.json]
//! ```

fn main() {
    voxel_sandbox::run();
}
