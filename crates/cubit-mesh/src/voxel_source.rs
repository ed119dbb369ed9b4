//! The read-only view of cell data the mesh compiler needs.

use cubit_voxel::{Cell, Chunk};
use glam::IVec3;

/// A box of cells that can be meshed.
///
/// Coordinates passed to [`VoxelSource::get`] are always inside
/// [`VoxelSource::dimensions`]; the compiler does its own bounds checks.
/// [`crate::compile`] only meshes sources up to [`crate::MAX_SOURCE_EXTENT`]
/// cells along each axis.
pub trait VoxelSource {
    /// Extent along X, Y and Z.
    fn dimensions(&self) -> (usize, usize, usize);

    /// Returns the cell at `(x, y, z)`.
    fn get(&self, x: i32, y: i32, z: i32) -> Cell;

    /// Returns `true` if `cell` neither draws cube faces nor hides its neighbours' faces.
    fn is_empty(&self, cell: Cell) -> bool;
}

impl VoxelSource for Chunk {
    fn dimensions(&self) -> (usize, usize, usize) {
        Chunk::dimensions(self)
    }

    fn get(&self, x: i32, y: i32, z: i32) -> Cell {
        Chunk::get(self, IVec3::new(x, y, z))
    }

    fn is_empty(&self, cell: Cell) -> bool {
        Chunk::is_empty_cell(cell)
    }
}

#[cfg(test)]
mod tests {
    use cubit_voxel::{CubeRef, Facing, VoxRef};

    use super::*;

    #[test]
    fn test_chunk_source_contract() {
        let mut chunk = Chunk::new_empty(IVec3::ZERO);
        let stone = Cell::cube(CubeRef(1), Facing::North);
        chunk.set(IVec3::new(2, 3, 4), stone);

        assert_eq!(VoxelSource::dimensions(&chunk), (16, 16, 16));
        assert_eq!(VoxelSource::get(&chunk, 2, 3, 4), stone);
        assert!(!VoxelSource::is_empty(&chunk, stone));
        assert!(VoxelSource::is_empty(&chunk, Cell::EMPTY));
    }

    #[test]
    fn test_vox_cells_are_empty_for_culling() {
        let chunk = Chunk::new_empty(IVec3::ZERO);
        assert!(VoxelSource::is_empty(&chunk, Cell::vox(VoxRef(0), Facing::Top)));
    }
}
