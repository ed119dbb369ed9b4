//! Sparse world index: owns every loaded chunk, keyed by [`ChunkRef`].
//!
//! Chunks are created lazily through the configured [`ChunkGenerator`] the
//! first time a write (or an explicit [`World::get_or_create_chunk`]) touches
//! them. Reads never create chunks.

use glam::IVec3;
use rustc_hash::FxHashMap;

use crate::cell::Cell;
use crate::chunk::Chunk;
use crate::chunk_ref::ChunkRef;
use crate::generator::ChunkGenerator;

/// Owns all loaded chunks and the generator that fills new ones.
pub struct World {
    chunks: FxHashMap<ChunkRef, Chunk>,
    generator: Box<dyn ChunkGenerator>,
}

impl World {
    /// Creates an empty world backed by `generator`.
    pub fn new(generator: impl ChunkGenerator + 'static) -> Self {
        Self {
            chunks: FxHashMap::default(),
            generator: Box::new(generator),
        }
    }

    /// Returns the chunk containing world position `p`, generating it if needed.
    ///
    /// Returns `None` if `p` lies outside the addressable world.
    pub fn get_or_create_chunk(&mut self, p: IVec3) -> Option<&mut Chunk> {
        let r = ChunkRef::for_world_position(p);
        let origin = r.origin()?;
        let generator = &self.generator;
        Some(self.chunks.entry(r).or_insert_with(|| {
            tracing::trace!("generating chunk at {origin}");
            generator.generate(origin)
        }))
    }

    /// Writes a cell at world position `p`. Returns `true` if anything changed.
    pub fn set_cell(&mut self, p: IVec3, cell: Cell) -> bool {
        match self.get_or_create_chunk(p) {
            Some(chunk) => chunk.set_world(p, cell),
            None => false,
        }
    }

    /// Reads the cell at world position `p`. Unloaded chunks read as empty.
    pub fn get_cell(&self, p: IVec3) -> Cell {
        self.chunks
            .get(&ChunkRef::for_world_position(p))
            .map_or(Cell::EMPTY, |chunk| chunk.get_world(p))
    }

    /// Immutable access to a loaded chunk.
    pub fn chunk(&self, r: ChunkRef) -> Option<&Chunk> {
        self.chunks.get(&r)
    }

    /// Iterates the references of all loaded chunks.
    pub fn chunk_refs(&self) -> impl Iterator<Item = ChunkRef> + '_ {
        self.chunks.keys().copied()
    }

    /// Number of loaded chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Removes and returns a loaded chunk.
    pub fn unload_chunk(&mut self, r: ChunkRef) -> Option<Chunk> {
        self.chunks.remove(&r)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CubeRef;
    use crate::facing::Facing;
    use crate::generator::{EmptyGenerator, FlatGenerator};

    const STONE: Cell = Cell::cube(CubeRef(3), Facing::North);

    #[test]
    fn test_new_world_is_empty() {
        let world = World::new(EmptyGenerator);
        assert_eq!(world.chunk_count(), 0);
        assert_eq!(world.chunk_refs().count(), 0);
    }

    #[test]
    fn test_get_cell_never_creates_chunks() {
        let world = World::new(FlatGenerator::new(CubeRef(0), CubeRef(1)));
        assert_eq!(world.get_cell(IVec3::new(0, -5, 0)), Cell::EMPTY);
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn test_set_cell_creates_chunk_through_generator() {
        let mut world = World::new(EmptyGenerator);
        let p = IVec3::new(-1, 20, 33);
        assert!(world.set_cell(p, STONE));
        assert_eq!(world.chunk_count(), 1);
        assert_eq!(world.get_cell(p), STONE);

        let r = ChunkRef::for_world_position(p);
        let chunk = world.chunk(r).unwrap();
        assert_eq!(chunk.position(), IVec3::new(-16, 16, 32));
        assert_eq!(chunk.get(IVec3::new(15, 4, 1)), STONE);
    }

    #[test]
    fn test_setting_same_value_reports_no_change() {
        let mut world = World::new(EmptyGenerator);
        assert!(!world.set_cell(IVec3::new(4, 4, 4), Cell::EMPTY));
        assert_eq!(world.chunk_count(), 1, "the chunk is still generated");
    }

    #[test]
    fn test_generator_contents_visible_after_creation() {
        let mut world = World::new(FlatGenerator::new(CubeRef(0), CubeRef(1)));
        world.get_or_create_chunk(IVec3::new(40, 3, 40)).unwrap();
        assert_eq!(world.get_cell(IVec3::new(40, 11, 40)).decompose().cube, Some(CubeRef(1)));
        assert!(world.get_cell(IVec3::new(40, 12, 40)).is_empty());
    }

    #[test]
    fn test_out_of_range_positions() {
        let mut world = World::new(EmptyGenerator);
        let far = IVec3::new(0, 16 * 8, 0);
        assert!(world.get_or_create_chunk(far).is_none());
        assert!(!world.set_cell(far, STONE));
        assert_eq!(world.get_cell(far), Cell::EMPTY);
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn test_unload_chunk() {
        let mut world = World::new(EmptyGenerator);
        let p = IVec3::new(1, 2, 3);
        world.set_cell(p, STONE);
        let r = ChunkRef::for_world_position(p);
        assert_eq!(world.chunk_refs().collect::<Vec<_>>(), vec![r]);

        let chunk = world.unload_chunk(r).unwrap();
        assert_eq!(chunk.get_world(p), STONE);
        assert_eq!(world.chunk_count(), 0);
        assert_eq!(world.get_cell(p), Cell::EMPTY);
        assert!(world.unload_chunk(r).is_none());
    }
}
