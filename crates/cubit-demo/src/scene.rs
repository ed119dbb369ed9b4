//! A small headless scene: a world, its compiled chunk meshes, and picking.

use cubit_config::{Config, GeneratorKind};
use cubit_mesh::{CompiledChunk, affected_chunks};
use cubit_raycast::{Ray, WorldIntersection, cast_ray};
use cubit_voxel::{
    Cell, ChunkRef, CubeDef, CubeRef, CubeRegistry, EmptyGenerator, FaceIndex, Facing,
    FlatGenerator, RegistryError, World,
};
use glam::{IVec3, Vec3};
use rustc_hash::FxHashMap;

/// References of the cubes registered by [`demo_registry`].
#[derive(Clone, Copy, Debug)]
pub struct DemoCubes {
    pub dirt: CubeRef,
    pub grass: CubeRef,
    pub stone: CubeRef,
}

/// Builds the cube set used by the demo world.
pub fn demo_registry() -> Result<(CubeRegistry, DemoCubes), RegistryError> {
    let mut registry = CubeRegistry::new();
    let dirt = registry.register(CubeDef::uniform("dirt", FaceIndex(2)))?;

    let mut grass = CubeDef::uniform("grass", FaceIndex(3));
    grass.faces[Facing::Top.index()] = FaceIndex(0);
    grass.faces[Facing::Bottom.index()] = FaceIndex(2);
    let grass = registry.register(grass)?;

    let stone = registry.register(CubeDef::uniform("stone", FaceIndex(1)))?;
    Ok((registry, DemoCubes { dirt, grass, stone }))
}

/// World plus per-chunk render state.
pub struct Scene {
    pub world: World,
    pub registry: CubeRegistry,
    compiled: FxHashMap<ChunkRef, CompiledChunk>,
    invalidate_neighbors: bool,
    max_compiles_per_frame: usize,
}

impl Scene {
    pub fn new(config: &Config, registry: CubeRegistry, cubes: DemoCubes) -> Self {
        let world = match config.world.generator {
            GeneratorKind::Empty => World::new(EmptyGenerator),
            GeneratorKind::Flat => World::new(FlatGenerator::new(cubes.dirt, cubes.grass)),
        };
        Self {
            world,
            registry,
            compiled: FxHashMap::default(),
            invalidate_neighbors: config.mesh.invalidate_neighbors,
            max_compiles_per_frame: config.mesh.max_compiles_per_frame as usize,
        }
    }

    /// Generates every chunk within the configured radius of `centre`.
    pub fn load_around(&mut self, centre: IVec3, config: &Config) {
        let r = config.world.view_radius as i32;
        let v = config.world.vertical_radius as i32;
        let centre = ChunkRef::chunk_coords_of(centre);
        for cz in -r..=r {
            for cy in -v..=v {
                for cx in -r..=r {
                    let p = (centre + IVec3::new(cx, cy, cz)) * 16;
                    if self.world.get_or_create_chunk(p).is_some() {
                        self.compiled
                            .entry(ChunkRef::for_world_position(p))
                            .or_default();
                    }
                }
            }
        }
        tracing::info!("loaded {} chunks", self.world.chunk_count());
    }

    /// Recompiles stale chunk meshes. Returns the number of chunks rebuilt.
    pub fn update(&mut self) -> usize {
        let mut rebuilt = 0;
        for (r, compiled) in &mut self.compiled {
            if self.max_compiles_per_frame != 0 && rebuilt >= self.max_compiles_per_frame {
                break;
            }
            let Some(chunk) = self.world.chunk(*r) else {
                continue;
            };
            if compiled.update(chunk, &self.registry) {
                rebuilt += 1;
            }
        }
        rebuilt
    }

    /// Total vertices across all compiled chunk meshes.
    pub fn vertex_count(&self) -> usize {
        self.compiled.values().map(|c| c.mesh().vertices.len()).sum()
    }

    pub fn compiled(&self, r: ChunkRef) -> Option<&CompiledChunk> {
        self.compiled.get(&r)
    }

    pub fn pick(&self, origin: Vec3, direction: Vec3, reach: f32) -> Option<WorldIntersection> {
        cast_ray(&Ray::new(origin, direction, reach), &self.world)
    }

    /// Writes a cell and marks dependent meshes stale. Returns `true` if anything changed.
    pub fn edit(&mut self, p: IVec3, cell: Cell) -> bool {
        if !self.world.set_cell(p, cell) {
            return false;
        }
        // The write may have generated a chunk outside the loaded area.
        self.compiled
            .entry(ChunkRef::for_world_position(p))
            .or_default();
        if self.invalidate_neighbors {
            // The owning chunk is stale through its revision already.
            for r in affected_chunks(p).into_iter().skip(1) {
                if let Some(compiled) = self.compiled.get_mut(&r) {
                    compiled.invalidate();
                }
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
