//! Chunk generators invoked by [`crate::World`] the first time a chunk is touched.

use glam::IVec3;

use crate::cell::{Cell, CubeRef};
use crate::chunk::{CHUNK_SIZE, Chunk};
use crate::facing::Facing;

/// Produces the initial contents of a chunk.
pub trait ChunkGenerator {
    /// Builds the chunk whose bottom-north-west corner is `origin`.
    fn generate(&self, origin: IVec3) -> Chunk;
}

/// Generates chunks that are entirely empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyGenerator;

impl ChunkGenerator for EmptyGenerator {
    fn generate(&self, origin: IVec3) -> Chunk {
        Chunk::new_empty(origin)
    }
}

/// Flat terrain: solid dirt below chunk layer 0, air above it, and a grass
/// surface at world height 11. The origin chunk also gets a small dirt hut.
#[derive(Clone, Copy, Debug)]
pub struct FlatGenerator {
    pub dirt: CubeRef,
    pub grass: CubeRef,
}

/// Local Y of the grass layer in chunk layer 0.
pub const GRASS_HEIGHT: i32 = 11;

impl FlatGenerator {
    pub fn new(dirt: CubeRef, grass: CubeRef) -> Self {
        Self { dirt, grass }
    }

    fn build_hut(&self, chunk: &mut Chunk) {
        let wall = Cell::cube(self.dirt, Facing::North);
        let floor = GRASS_HEIGHT + 1;

        // Back wall, full width.
        for y in floor..floor + 2 {
            for x in 5..=11 {
                chunk.set(IVec3::new(x, y, 9), wall);
            }
        }
        // Front wall with a door at x = 7 and a window at x = 9.
        for y in floor..floor + 2 {
            for x in 5..=11 {
                if x == 7 || (x == 9 && y == floor + 1) {
                    continue;
                }
                chunk.set(IVec3::new(x, y, 5), wall);
            }
        }
        for y in floor..floor + 2 {
            for z in 6..=8 {
                chunk.set(IVec3::new(5, y, z), wall);
                chunk.set(IVec3::new(11, y, z), wall);
            }
        }
        for z in 5..=9 {
            for x in 5..=11 {
                chunk.set(IVec3::new(x, floor + 2, z), wall);
            }
        }
    }
}

impl ChunkGenerator for FlatGenerator {
    fn generate(&self, origin: IVec3) -> Chunk {
        let dirt = Cell::cube(self.dirt, Facing::North);
        let layer = origin.y.div_euclid(CHUNK_SIZE as i32);
        if layer < 0 {
            return Chunk::new(origin, dirt);
        }
        if layer > 0 {
            return Chunk::new_empty(origin);
        }

        let grass = Cell::cube(self.grass, Facing::North);
        let mut chunk = Chunk::new_empty(origin);
        let size = CHUNK_SIZE as i32;
        for z in 0..size {
            for y in 0..=GRASS_HEIGHT {
                let cell = if y < GRASS_HEIGHT { dirt } else { grass };
                for x in 0..size {
                    chunk.set(IVec3::new(x, y, z), cell);
                }
            }
        }
        if origin == IVec3::ZERO {
            self.build_hut(&mut chunk);
        }
        tracing::trace!("generated flat chunk at {origin}");
        chunk
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
