//! # Sandbox Configuration
//!
//! All tunables live in one JSON document. Every field has a default, so a
//! file only needs to name what it changes:
//!
//! ```json
//! {
//!   "world": { "generator": { "kind": "perlin", "seed": 1, "scale": 0.08,
//!                             "base_height": 6.0, "amplitude": 3.0 },
//!              "height": 16 },
//!   "player": { "spawn": [10.0, 12.0, 10.0] },
//!   "physics": { "collision_mode": "legacy" }
//! }
//! ```
//!
//! The file path comes from the first command line argument, falling back to
//! the `VOXEL_SANDBOX_CONFIG` environment variable. A missing or broken file
//! is logged and the defaults are used instead.

use std::{
    fs,
    path::{Path, PathBuf},
};

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use crate::engine_state::{
    physics::{PhysicsSettings, PlayerDimensions},
    voxels::{block::block_type::BlockType, generation::GeneratorSettings},
};

/// Environment variable consulted when no path is given on the command line.
pub const CONFIG_ENV_VAR: &str = "VOXEL_SANDBOX_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Size and contents of the generated world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub generator: GeneratorSettings,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 3,
            depth: 20,
            generator: GeneratorSettings::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial eye position. A spawn inside the terrain is raised to rest on
    /// top of it.
    pub spawn: [f32; 3],
    pub dimensions: PlayerDimensions,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: [10.0, 5.0, 10.0],
            dimensions: PlayerDimensions::default(),
        }
    }
}

impl PlayerConfig {
    pub fn spawn_point(&self) -> Point3<f32> {
        Point3::from(self.spawn)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Radians of rotation per unit of raw mouse motion.
    pub mouse_sensitivity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.002,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target frames per second for the window loop.
    pub frame_rate: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { frame_rate: 60.0 }
    }
}

/// Click-to-edit settings. Off unless enabled explicitly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingConfig {
    pub enabled: bool,
    /// Block placed by a right click.
    pub block: BlockType,
    /// How far from the eye a block can be picked.
    pub reach: f32,
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            block: BlockType::GRASS,
            reach: 5.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub physics: PhysicsSettings,
    pub input: InputConfig,
    pub display: DisplayConfig,
    pub editing: EditingConfig,
}

impl SandboxConfig {
    /// Reads and parses a config file.
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, `ConfigError::Parse` if it
    /// is not a valid config document.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the config at `path`, or the defaults if there is no path or the
    /// file is unusable.
    pub fn load_or_default(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            log::info!("no config file given, using defaults");
            return Self::default();
        };

        match Self::from_path(&path) {
            Ok(config) => {
                log::info!("loaded config from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// The config path named by the command line or the environment.
    pub fn path_from_env() -> Option<PathBuf> {
        std::env::args_os()
            .nth(1)
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
    }
}
