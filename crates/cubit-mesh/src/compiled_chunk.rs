//! Renderable state of one chunk, recompiled only when the chunk's revision moves.

use cubit_voxel::{Chunk, Facing, VoxRef};
use glam::IVec3;

use crate::cube_mesh::CubeMesh;
use crate::face_graphics::FaceGraphics;
use crate::greedy::compile;

/// Where to draw one embedded vox model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxPlacement {
    /// World position of the cell holding the model.
    pub position: IVec3,
    pub model: VoxRef,
    pub facing: Facing,
}

/// Lists every vox model embedded in `chunk`, in linear cell order.
pub fn collect_vox_placements(chunk: &Chunk) -> Vec<VoxPlacement> {
    chunk
        .vox_cells()
        .map(|(local, model, facing)| VoxPlacement {
            position: chunk.position() + local,
            model,
            facing,
        })
        .collect()
}

/// Cached cube mesh and vox placements for a chunk.
///
/// Call [`CompiledChunk::update`] once per frame; it only does work when the
/// chunk changed since the last compile.
#[derive(Clone, Debug, Default)]
pub struct CompiledChunk {
    mesh: CubeMesh,
    vox: Vec<VoxPlacement>,
    /// Chunk revision the mesh was built from. 0 means never compiled.
    compiled_revision: u32,
    compiled_vox_revision: Option<u32>,
}

impl CompiledChunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the cached mesh does not match `chunk`.
    pub fn is_stale(&self, chunk: &Chunk) -> bool {
        self.compiled_revision != chunk.revision()
    }

    /// Recompiles whatever is out of date. Returns `true` if the cube mesh was rebuilt.
    pub fn update<G: FaceGraphics + ?Sized>(&mut self, chunk: &Chunk, graphics: &G) -> bool {
        if self.compiled_vox_revision != Some(chunk.vox_revision()) {
            self.vox = collect_vox_placements(chunk);
            self.compiled_vox_revision = Some(chunk.vox_revision());
        }
        if !self.is_stale(chunk) {
            return false;
        }
        let quads = compile(chunk, graphics, &mut self.mesh);
        tracing::debug!(
            "compiled chunk at {} (revision {} -> {}, {quads} quads)",
            chunk.position(),
            self.compiled_revision,
            chunk.revision()
        );
        self.compiled_revision = chunk.revision();
        true
    }

    /// Forces the next [`CompiledChunk::update`] to rebuild everything.
    ///
    /// Used when a neighbouring chunk's boundary changed.
    pub fn invalidate(&mut self) {
        self.compiled_revision = 0;
        self.compiled_vox_revision = None;
    }

    pub fn mesh(&self) -> &CubeMesh {
        &self.mesh
    }

    pub fn vox_placements(&self) -> &[VoxPlacement] {
        &self.vox
    }

    /// Chunk revision of the current mesh.
    pub fn compiled_revision(&self) -> u32 {
        self.compiled_revision
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
