//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, GeneratorKind};

/// Command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "cubit", about = "Cubit voxel world demo")]
pub struct CliArgs {
    /// Chunk generator.
    #[arg(long, value_enum)]
    pub generator: Option<GeneratorKind>,

    /// Horizontal view radius in chunks.
    #[arg(long)]
    pub view_radius: Option<u32>,

    /// Picking reach in cells.
    #[arg(long)]
    pub reach: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Applies command-line values on top of the loaded config, then re-sanitizes.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(generator) = args.generator {
            self.world.generator = generator;
        }
        if let Some(radius) = args.view_radius {
            self.world.view_radius = radius;
        }
        if let Some(reach) = args.reach {
            self.pick.reach = reach;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        self.sanitize();
    }
}
