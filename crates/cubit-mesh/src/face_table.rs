//! Per-facing quad geometry: corner offsets, UV extents, and shading levels.

use cubit_voxel::Facing;
use glam::IVec3;

use crate::cube_mesh::{CubeVertex, MeshAccumulator};

/// Fixed light level per world side, indexed by [`Facing::index`].
///
/// The renderer multiplies face colour by this value; it is looked up through
/// the facing byte of each [`CubeVertex`].
pub const FACING_LIGHT_LEVELS: [f32; 6] = [0.8, 0.8, 0.9, 0.7, 1.0, 0.5];

/// Corners of a quad covering the `facing` side of the box at `p` with extent `d`.
///
/// Returns the corners as `[top-left, top-right, bottom-left, bottom-right]`
/// seen from outside the box, and the UV extent of the quad.
pub(crate) fn quad_corners(facing: Facing, p: IVec3, d: IVec3) -> ([IVec3; 4], [i32; 2]) {
    let (x, y, z) = (p.x, p.y, p.z);
    let v = IVec3::new;
    match facing {
        Facing::North => (
            [v(x + d.x, y + d.y, z), v(x, y + d.y, z), v(x + d.x, y, z), v(x, y, z)],
            [d.x, d.y],
        ),
        Facing::South => (
            [
                v(x, y + d.y, z + 1),
                v(x + d.x, y + d.y, z + 1),
                v(x, y, z + 1),
                v(x + d.x, y, z + 1),
            ],
            [d.x, d.y],
        ),
        Facing::East => (
            [
                v(x + 1, y + d.y, z + d.z),
                v(x + 1, y + d.y, z),
                v(x + 1, y, z + d.z),
                v(x + 1, y, z),
            ],
            [d.z, d.y],
        ),
        Facing::West => (
            [v(x, y + d.y, z), v(x, y + d.y, z + d.z), v(x, y, z), v(x, y, z + d.z)],
            [d.z, d.y],
        ),
        Facing::Top => (
            [
                v(x, y + 1, z),
                v(x + d.x, y + 1, z),
                v(x, y + 1, z + d.z),
                v(x + d.x, y + 1, z + d.z),
            ],
            [d.x, d.z],
        ),
        Facing::Bottom => (
            [v(x + d.x, y, z), v(x, y, z), v(x + d.x, y, z + d.z), v(x, y, z + d.z)],
            [d.x, d.z],
        ),
    }
}

fn to_u8(c: IVec3) -> Option<[u8; 3]> {
    Some([
        u8::try_from(c.x).ok()?,
        u8::try_from(c.y).ok()?,
        u8::try_from(c.z).ok()?,
    ])
}

/// Appends the two triangles of one quad.
///
/// `p` is the minimum cell of the merged rectangle and `d` its extent in cells
/// (1 along the axis perpendicular to `facing`). Vertices are appended in the
/// order TL, TR, BL, BL, TR, BR.
///
/// Returns `false` without appending anything if a corner or the UV extent
/// does not fit the vertex's 8-bit fields.
pub fn push_face<M: MeshAccumulator + ?Sized>(
    mesh: &mut M,
    facing: Facing,
    p: IVec3,
    d: IVec3,
    atlas: (u16, u16),
) -> bool {
    let (corners, [u, v]) = quad_corners(facing, p, d);
    let (Ok(u), Ok(v)) = (u8::try_from(u), u8::try_from(v)) else {
        return false;
    };
    let [Some(tl), Some(tr), Some(bl), Some(br)] = corners.map(to_u8) else {
        return false;
    };
    let vert = |corner: [u8; 3], uv: [u8; 2]| CubeVertex::new(corner, facing, uv, atlas);

    mesh.append_vertex(vert(tl, [0, 0]));
    mesh.append_vertex(vert(tr, [u, 0]));
    mesh.append_vertex(vert(bl, [0, v]));
    mesh.append_vertex(vert(bl, [0, v]));
    mesh.append_vertex(vert(tr, [u, 0]));
    mesh.append_vertex(vert(br, [u, v]));
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
