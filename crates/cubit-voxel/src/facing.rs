//! The six axis-aligned facings a cell's content can point toward.

use glam::IVec3;

/// One of the six axis-aligned directions.
///
/// The `repr(u8)` discriminant is the 3-bit value stored inside a [`crate::Cell`].
/// North is −Z, East is +X and Top is +Y.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Facing {
    /// −Z direction.
    #[default]
    North = 0,
    /// +Z direction.
    South = 1,
    /// +X direction.
    East = 2,
    /// −X direction.
    West = 3,
    /// +Y direction.
    Top = 4,
    /// −Y direction.
    Bottom = 5,
}

/// `CUBE_LOCAL_FACE[cell_facing][world_side]` is the cube face shown on
/// `world_side` when the cube's own north face points along `cell_facing`.
const CUBE_LOCAL_FACE: [[Facing; 6]; 6] = {
    use Facing::*;
    [
        [North, South, East, West, Top, Bottom],
        [South, North, West, East, Top, Bottom],
        [West, East, North, South, Top, Bottom],
        [East, West, South, North, Top, Bottom],
        [Bottom, Top, East, West, North, South],
        [Top, Bottom, East, West, South, North],
    ]
};

impl Facing {
    /// All six facings in discriminant order.
    pub const ALL: [Facing; 6] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::Top,
        Self::Bottom,
    ];

    /// Decodes a raw 3-bit value. Anything outside `0..=5` becomes North.
    pub fn from_bits(bits: u32) -> Self {
        match bits {
            1 => Self::South,
            2 => Self::East,
            3 => Self::West,
            4 => Self::Top,
            5 => Self::Bottom,
            _ => Self::North,
        }
    }

    /// Returns the facing index (0–5).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit offset to the neighbouring cell in this direction.
    pub fn offset(self) -> IVec3 {
        match self {
            Self::North => IVec3::new(0, 0, -1),
            Self::South => IVec3::new(0, 0, 1),
            Self::East => IVec3::new(1, 0, 0),
            Self::West => IVec3::new(-1, 0, 0),
            Self::Top => IVec3::new(0, 1, 0),
            Self::Bottom => IVec3::new(0, -1, 0),
        }
    }

    /// Returns the opposite facing.
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Maps this world-space side to the face of a cube rotated to `cell_facing`.
    ///
    /// Horizontal facings yaw the cube about the Y axis (North → East → South →
    /// West is clockwise seen from above); Top and Bottom pitch the cube's north
    /// face up or down.
    pub fn cube_local_face(self, cell_facing: Facing) -> Facing {
        CUBE_LOCAL_FACE[cell_facing.index()][self.index()]
    }
}
