//! 16×16×16 chunk storage with a solid-fill fast path and revision counters.
//!
//! A chunk starts out *solid*: one [`Cell`] implicitly fills every position and
//! no array is allocated. The first write that differs from the fill
//! materializes the dense 4096-cell array. A dense chunk only returns to solid
//! through an explicit [`Chunk::fill`].

use glam::IVec3;

use crate::cell::{Cell, VoxRef};
use crate::facing::Facing;

/// Side length of a chunk in cells.
pub const CHUNK_SIZE: usize = 16;

/// Total number of cells in a chunk (16³).
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

#[derive(Clone, Debug)]
enum Cells {
    Solid(Cell),
    Dense(Box<[Cell; CHUNK_VOLUME]>),
}

/// One chunk of the world.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// World coordinate of the bottom-north-west corner.
    position: IVec3,
    /// Incremented on every net change to cell contents. Starts at 1.
    revision: u32,
    /// Incremented whenever a vox model may have been inserted or removed.
    vox_revision: u32,
    cells: Cells,
}

impl Chunk {
    /// Creates a solid chunk at `position` filled with `fill`.
    pub fn new(position: IVec3, fill: Cell) -> Self {
        Self {
            position,
            revision: 1,
            vox_revision: 0,
            cells: Cells::Solid(fill),
        }
    }

    /// Creates an empty chunk at `position`.
    pub fn new_empty(position: IVec3) -> Self {
        Self::new(position, Cell::EMPTY)
    }

    /// World coordinate of the bottom-north-west corner.
    pub fn position(&self) -> IVec3 {
        self.position
    }

    /// Current content revision.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Current vox model revision.
    pub fn vox_revision(&self) -> u32 {
        self.vox_revision
    }

    /// Returns `true` while no dense array has been materialized.
    pub fn is_solid(&self) -> bool {
        matches!(self.cells, Cells::Solid(_))
    }

    /// The fill value if the chunk is solid.
    pub fn solid_fill(&self) -> Option<Cell> {
        match self.cells {
            Cells::Solid(fill) => Some(fill),
            Cells::Dense(_) => None,
        }
    }

    /// Returns the cell at chunk-relative `p`, or [`Cell::EMPTY`] if out of bounds.
    pub fn get(&self, p: IVec3) -> Cell {
        let Some(index) = Self::linear_index(p) else {
            return Cell::EMPTY;
        };
        match &self.cells {
            Cells::Solid(fill) => *fill,
            Cells::Dense(cells) => cells[index],
        }
    }

    /// Sets the cell at chunk-relative `p`. Returns `true` if the contents changed.
    ///
    /// Out-of-bounds writes are ignored.
    pub fn set(&mut self, p: IVec3, cell: Cell) -> bool {
        let Some(index) = Self::linear_index(p) else {
            return false;
        };
        if let Cells::Solid(fill) = self.cells {
            if fill == cell {
                return false;
            }
            self.cells = Cells::Dense(Box::new([fill; CHUNK_VOLUME]));
        }
        let Cells::Dense(cells) = &mut self.cells else {
            return false;
        };
        let old = cells[index];
        if old == cell {
            return false;
        }
        cells[index] = cell;
        self.bump_revisions(old.is_vox() || cell.is_vox());
        true
    }

    /// Like [`Chunk::get`] but with a world coordinate.
    pub fn get_world(&self, p: IVec3) -> Cell {
        self.get(p - self.position)
    }

    /// Like [`Chunk::set`] but with a world coordinate.
    pub fn set_world(&mut self, p: IVec3, cell: Cell) -> bool {
        self.set(p - self.position, cell)
    }

    /// Replaces the whole chunk with a solid fill. Returns `true` if anything changed.
    ///
    /// Any dense array is dropped.
    pub fn fill(&mut self, cell: Cell) -> bool {
        let had_vox = match &self.cells {
            Cells::Solid(fill) if *fill == cell => return false,
            Cells::Solid(fill) => fill.is_vox(),
            Cells::Dense(cells) => cells.iter().any(|c| c.is_vox()),
        };
        self.cells = Cells::Solid(cell);
        self.bump_revisions(had_vox || cell.is_vox());
        true
    }

    /// Iterates every embedded vox model as `(local position, model, facing)`.
    pub fn vox_cells(&self) -> impl Iterator<Item = (IVec3, VoxRef, Facing)> + '_ {
        (0..CHUNK_VOLUME).filter_map(move |i| {
            let p = Self::position_of(i);
            let d = self.get(p).decompose();
            d.vox.map(|v| (p, v, d.facing))
        })
    }

    /// Dimensions of the chunk in cells.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (CHUNK_SIZE, CHUNK_SIZE, CHUNK_SIZE)
    }

    /// Returns `true` if `cell` holds no cube.
    ///
    /// A cell holding only a vox model counts as empty here: vox models are
    /// drawn separately and do not hide neighbouring cube faces.
    pub fn is_empty_cell(cell: Cell) -> bool {
        cell.decompose().cube.is_none()
    }

    /// Advances the counters after a net change. Both wrap; `revision` skips
    /// 0, which mesh caches use for "never compiled".
    fn bump_revisions(&mut self, vox_changed: bool) {
        self.revision = self.revision.wrapping_add(1).max(1);
        if vox_changed {
            self.vox_revision = self.vox_revision.wrapping_add(1);
        }
    }

    /// Converts chunk-relative `p` to a linear index (x fastest, then y, then z).
    fn linear_index(p: IVec3) -> Option<usize> {
        let size = CHUNK_SIZE as i32;
        if p.x < 0 || p.x >= size || p.y < 0 || p.y >= size || p.z < 0 || p.z >= size {
            return None;
        }
        Some(p.z as usize * CHUNK_SIZE * CHUNK_SIZE + p.y as usize * CHUNK_SIZE + p.x as usize)
    }

    fn position_of(index: usize) -> IVec3 {
        IVec3::new(
            (index % CHUNK_SIZE) as i32,
            (index / CHUNK_SIZE % CHUNK_SIZE) as i32,
            (index / (CHUNK_SIZE * CHUNK_SIZE)) as i32,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
