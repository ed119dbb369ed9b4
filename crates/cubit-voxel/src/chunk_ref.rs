//! Packed chunk references: the key type of the sparse world map.
//!
//! Layout (32 bits):
//!   - bits `0..14`  chunk X + 0x2000
//!   - bits `14..28` chunk Z + 0x2000
//!   - bits `28..32` chunk Y + 8
//!
//! This bounds the world to chunk X/Z in `-8192..8192` and chunk Y in `-8..8`.

use glam::IVec3;

use crate::chunk::CHUNK_SIZE;

const XZ_BITS: u32 = 14;
const XZ_MASK: u32 = (1 << XZ_BITS) - 1;
const XZ_BIAS: i32 = 1 << (XZ_BITS - 1);
const Y_BITS: u32 = 4;
const Y_MASK: u32 = (1 << Y_BITS) - 1;
const Y_BIAS: i32 = 1 << (Y_BITS - 1);
const Z_SHIFT: u32 = XZ_BITS;
const Y_SHIFT: u32 = XZ_BITS * 2;

/// Identifies one chunk of the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkRef(u32);

impl ChunkRef {
    /// Returned for chunk coordinates that do not fit the packed layout.
    pub const INVALID: ChunkRef = ChunkRef(0xFFFF_FFFF);

    /// Packs chunk-grid coordinates (world coordinates divided by 16).
    ///
    /// Returns [`ChunkRef::INVALID`] if any axis is out of range. The single
    /// in-range coordinate whose packing equals the sentinel is rejected too.
    pub fn from_chunk_coords(c: IVec3) -> Self {
        let x = i64::from(c.x) + i64::from(XZ_BIAS);
        let z = i64::from(c.z) + i64::from(XZ_BIAS);
        let y = i64::from(c.y) + i64::from(Y_BIAS);
        let xz_range = 0..=i64::from(XZ_MASK);
        if !xz_range.contains(&x) || !xz_range.contains(&z) || !(0..=i64::from(Y_MASK)).contains(&y)
        {
            return Self::INVALID;
        }
        let packed = x as u32 | ((z as u32) << Z_SHIFT) | ((y as u32) << Y_SHIFT);
        if packed == Self::INVALID.0 {
            tracing::warn!("chunk ({}, {}, {}) collides with the invalid reference", c.x, c.y, c.z);
            return Self::INVALID;
        }
        ChunkRef(packed)
    }

    /// Returns the reference of the chunk containing world position `p`.
    pub fn for_world_position(p: IVec3) -> Self {
        Self::from_chunk_coords(Self::chunk_coords_of(p))
    }

    /// Floor-divides a world position by the chunk size.
    pub fn chunk_coords_of(p: IVec3) -> IVec3 {
        let size = CHUNK_SIZE as i32;
        IVec3::new(p.x.div_euclid(size), p.y.div_euclid(size), p.z.div_euclid(size))
    }

    /// Unpacks the chunk-grid coordinates, or `None` for the invalid reference.
    pub fn to_chunk_coords(self) -> Option<IVec3> {
        if !self.is_valid() {
            return None;
        }
        Some(IVec3::new(
            (self.0 & XZ_MASK) as i32 - XZ_BIAS,
            ((self.0 >> Y_SHIFT) & Y_MASK) as i32 - Y_BIAS,
            ((self.0 >> Z_SHIFT) & XZ_MASK) as i32 - XZ_BIAS,
        ))
    }

    /// World coordinate of the referenced chunk's bottom-north-west corner.
    pub fn origin(self) -> Option<IVec3> {
        self.to_chunk_coords().map(|c| c * CHUNK_SIZE as i32)
    }

    /// Returns `true` unless this is [`ChunkRef::INVALID`].
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// The raw packed value.
    pub fn to_bits(self) -> u32 {
        self.0
    }
}
