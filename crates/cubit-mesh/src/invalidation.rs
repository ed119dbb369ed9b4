//! Determines which chunk meshes go stale after a cell edit.
//!
//! The compiler treats everything outside a chunk as empty, so an edit only
//! changes the edited chunk's own mesh. Neighbouring chunks still draw their
//! boundary faces against the old contents, so callers that track
//! cross-chunk visibility recompile them as well.

use cubit_voxel::{CHUNK_SIZE, ChunkRef, Facing};
use glam::IVec3;

/// Chunk-grid offsets of the neighbours sharing a boundary with the
/// chunk-relative cell `local`.
///
/// Interior cells yield nothing; a corner cell yields three offsets.
pub fn boundary_neighbors(local: IVec3) -> Vec<IVec3> {
    let last = CHUNK_SIZE as i32 - 1;
    Facing::ALL
        .into_iter()
        .map(Facing::offset)
        .filter(|o| {
            let along = local.dot(o.abs());
            if o.cmplt(IVec3::ZERO).any() { along == 0 } else { along == last }
        })
        .collect()
}

/// Every loaded-or-not chunk whose mesh depends on the cell at world position `p`.
///
/// The owning chunk comes first. References outside the addressable world are
/// left out.
pub fn affected_chunks(p: IVec3) -> Vec<ChunkRef> {
    let coords = ChunkRef::chunk_coords_of(p);
    let local = p - coords * CHUNK_SIZE as i32;
    std::iter::once(IVec3::ZERO)
        .chain(boundary_neighbors(local))
        .map(|o| ChunkRef::from_chunk_coords(coords + o))
        .filter(|r| r.is_valid())
        .collect()
}
