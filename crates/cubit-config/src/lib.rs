//! Configuration for the cubit client core.
//!
//! Settings persist to disk as a RON file, can be overridden from the command
//! line, and are forward/backward compatible through `#[serde(default)]`.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, GeneratorKind, MAX_VERTICAL_RADIUS, MAX_VIEW_RADIUS, MeshConfig,
    PickConfig, WorldConfig,
};
pub use error::ConfigError;
