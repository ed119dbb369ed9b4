//! Bit-packed 32-bit cell values.
//!
//! Layout:
//!   - bits `0..16`  cube or vox reference
//!   - bits `16..19` facing (values above 5 decode as North)
//!   - bit  `31`     set for a vox model reference, clear for a cube
//!
//! The all-ones value is [`Cell::EMPTY`].

use serde::{Deserialize, Serialize};

use crate::facing::Facing;

const REF_MASK: u32 = 0x0000_FFFF;
const FACING_SHIFT: u32 = 16;
const FACING_MASK: u32 = 0x7;
const VOX_BIT: u32 = 0x8000_0000;

/// Reference to a cube definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CubeRef(pub u16);

impl CubeRef {
    /// The invalid cube reference.
    pub const INVALID: CubeRef = CubeRef(0xFFFF);

    /// Returns `true` unless this is [`CubeRef::INVALID`].
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Reference to a vox model definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxRef(pub u16);

impl VoxRef {
    /// The invalid vox reference.
    pub const INVALID: VoxRef = VoxRef(0xFFFF);

    /// Returns `true` unless this is [`VoxRef::INVALID`].
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// The content of one grid position packed into 32 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Cell(u32);

/// Result of [`Cell::decompose`]. At most one of `cube` and `vox` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decomposed {
    pub cube: Option<CubeRef>,
    pub vox: Option<VoxRef>,
    pub facing: Facing,
}

/// Tagged view of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellContent {
    Empty,
    Cube(CubeRef, Facing),
    Vox(VoxRef, Facing),
}

impl Cell {
    /// Empty cell; also the value returned for out-of-range reads.
    pub const EMPTY: Cell = Cell(0xFFFF_FFFF);

    /// Packs a cube reference and facing.
    pub const fn cube(r: CubeRef, facing: Facing) -> Self {
        Cell(r.0 as u32 | ((facing as u32) << FACING_SHIFT))
    }

    /// Packs a vox model reference and facing.
    pub const fn vox(r: VoxRef, facing: Facing) -> Self {
        Cell(r.0 as u32 | ((facing as u32) << FACING_SHIFT) | VOX_BIT)
    }

    /// Reinterprets raw bits (e.g. from an older save or a network buffer).
    pub const fn from_bits(bits: u32) -> Self {
        Cell(bits)
    }

    /// The raw 32-bit representation.
    pub const fn to_bits(self) -> u32 {
        self.0
    }

    /// Splits the cell into its reference and facing parts.
    pub fn decompose(self) -> Decomposed {
        let facing = Facing::from_bits((self.0 >> FACING_SHIFT) & FACING_MASK);
        let r = (self.0 & REF_MASK) as u16;
        if self.0 & VOX_BIT == 0 {
            let cube = CubeRef(r);
            Decomposed {
                cube: cube.is_valid().then_some(cube),
                vox: None,
                facing,
            }
        } else {
            let vox = VoxRef(r);
            Decomposed {
                cube: None,
                vox: vox.is_valid().then_some(vox),
                facing,
            }
        }
    }

    /// Returns the tagged view of this cell.
    pub fn content(self) -> CellContent {
        let d = self.decompose();
        match (d.cube, d.vox) {
            (Some(c), _) => CellContent::Cube(c, d.facing),
            (None, Some(v)) => CellContent::Vox(v, d.facing),
            (None, None) => CellContent::Empty,
        }
    }

    /// Returns `true` if the cell references a valid cube.
    pub fn is_cube(self) -> bool {
        self.decompose().cube.is_some()
    }

    /// Returns `true` if the cell references a valid vox model.
    pub fn is_vox(self) -> bool {
        self.decompose().vox.is_some()
    }

    /// Returns `true` if the cell holds neither a cube nor a vox model.
    pub fn is_empty(self) -> bool {
        self.content() == CellContent::Empty
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<CellContent> for Cell {
    fn from(content: CellContent) -> Self {
        match content {
            CellContent::Empty => Cell::EMPTY,
            CellContent::Cube(r, f) => Cell::cube(r, f),
            CellContent::Vox(r, f) => Cell::vox(r, f),
        }
    }
}
