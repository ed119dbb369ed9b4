//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World generation and loading.
    pub world: WorldConfig,
    /// Chunk mesh compilation.
    pub mesh: MeshConfig,
    /// Cell picking.
    pub pick: PickConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Which generator fills chunks on first access.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum GeneratorKind {
    /// Every chunk starts empty.
    Empty,
    /// Flat dirt terrain with a grass surface.
    #[default]
    Flat,
}

/// World configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunk generator.
    pub generator: GeneratorKind,
    /// Horizontal radius, in chunks, of the area loaded around the viewer.
    pub view_radius: u32,
    /// Vertical radius, in chunks.
    pub vertical_radius: u32,
}

/// Mesh compilation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// Also recompile neighbouring chunks when a boundary cell changes.
    pub invalidate_neighbors: bool,
    /// Upper bound on chunk compiles per frame (0 = unlimited).
    pub max_compiles_per_frame: u32,
}

/// Picking configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PickConfig {
    /// Maximum ray length in cells.
    pub reach: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter used when `RUST_LOG` is not set (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write a JSON log file in debug builds.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorKind::Flat,
            view_radius: 4,
            vertical_radius: 1,
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            invalidate_neighbors: true,
            max_compiles_per_frame: 0,
        }
    }
}

impl Default for PickConfig {
    fn default() -> Self {
        Self { reach: 8.0 }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

// --- Limits ---

/// Largest horizontal view radius, in chunks.
pub const MAX_VIEW_RADIUS: u32 = 32;
/// Largest vertical radius; the world is 16 chunks tall.
pub const MAX_VERTICAL_RADIUS: u32 = 7;

impl Config {
    /// Clamps out-of-range values, logging each one that changed.
    ///
    /// Applied after every load and after CLI overrides.
    pub fn sanitize(&mut self) {
        if self.world.view_radius > MAX_VIEW_RADIUS {
            log::warn!(
                "view_radius {} exceeds {MAX_VIEW_RADIUS}, clamping",
                self.world.view_radius
            );
            self.world.view_radius = MAX_VIEW_RADIUS;
        }
        if self.world.vertical_radius > MAX_VERTICAL_RADIUS {
            log::warn!(
                "vertical_radius {} exceeds {MAX_VERTICAL_RADIUS}, clamping",
                self.world.vertical_radius
            );
            self.world.vertical_radius = MAX_VERTICAL_RADIUS;
        }
        if !(self.pick.reach.is_finite() && self.pick.reach > 0.0) {
            let fallback = PickConfig::default().reach;
            log::warn!("invalid pick reach {}, using {fallback}", self.pick.reach);
            self.pick.reach = fallback;
        }
    }
}

// --- Persistence ---

impl Config {
    /// Per-user config directory, `<platform config dir>/cubit`.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|d| d.join("cubit"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Reads `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let defaults = Config::default();
            defaults.save(config_dir)?;
            log::info!("wrote default config to {}", path.display());
            return Ok(defaults);
        }
        let config = read_config(&path)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Writes this config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;
        let path = config_dir.join(CONFIG_FILE);
        let text = ron::ser::to_string_pretty(self, pretty_config())
            .map_err(ConfigError::SerializeError)?;
        std::fs::write(&path, text).map_err(|source| ConfigError::WriteError { path, source })
    }

    /// Re-reads the file. Returns `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&config_dir.join(CONFIG_FILE))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("config changed on disk");
        Ok(Some(fresh))
    }
}

fn pretty_config() -> ron::ser::PrettyConfig {
    ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .separate_tuple_members(true)
        .enumerate_arrays(false)
}

/// Parses and sanitizes one config file.
fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: Config =
        ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
    config.sanitize();
    Ok(config)
}
