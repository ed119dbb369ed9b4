//! Headless demo of the cubit world core.
//!
//! Loads a block of chunks around the origin, compiles their meshes, picks a
//! cell with a ray, edits the world and recompiles. Configuration is loaded
//! from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p cubit-demo -- --generator flat --view-radius 2`.

mod scene;

use clap::Parser;
use cubit_config::{CliArgs, Config};
use cubit_voxel::{Cell, ChunkRef, Facing};
use glam::{IVec3, Vec3};
use tracing::{error, info, warn};

use crate::scene::{Scene, demo_registry};

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => Config::default_dir().unwrap_or_else(|e| {
            eprintln!("{e}, using the working directory");
            ".".into()
        }),
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    cubit_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let (registry, cubes) = match demo_registry() {
        Ok(r) => r,
        Err(e) => {
            error!("failed to build cube registry: {e}");
            return;
        }
    };
    info!("registered {} cube types", registry.len());

    let mut scene = Scene::new(&config, registry, cubes);
    scene.load_around(IVec3::ZERO, &config);
    let rebuilt = scene.update();
    info!(
        "compiled {rebuilt} chunks, {} vertices total",
        scene.vertex_count()
    );

    // Look straight down onto the hut roof.
    let eye = Vec3::new(8.5, 20.5, 7.5);
    let Some(hit) = scene.pick(eye, Vec3::NEG_Y, config.pick.reach) else {
        warn!("nothing within {} cells below {eye}", config.pick.reach);
        return;
    };
    info!(
        "picked {} through {:?} face at distance {:.2}",
        hit.position, hit.face, hit.distance
    );

    if scene.edit(hit.position, Cell::EMPTY) {
        info!("removed cell at {}", hit.position);
    }
    if let Some(p) = hit.adjacent_position() {
        scene.edit(p, Cell::cube(cubes.stone, Facing::North));
        info!("placed stone at {p}");
    }

    let rebuilt = scene.update();
    info!(
        "recompiled {rebuilt} chunks, {} vertices total",
        scene.vertex_count()
    );
    if let Some(compiled) = scene.compiled(ChunkRef::for_world_position(hit.position)) {
        info!(
            "edited chunk now at revision {} with {} quads",
            compiled.compiled_revision(),
            compiled.mesh().quad_count()
        );
    }
}
