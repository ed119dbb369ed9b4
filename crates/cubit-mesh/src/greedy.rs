//! Greedy meshing: merges coplanar, identically tagged faces into larger
//! rectangles before emitting them.
//!
//! Each facing is processed independently. The source is swept one plane at a
//! time along the axis perpendicular to the facing. In each plane, visible
//! faces are collected into a 2D grid tagged with the full cell value and then
//! merged row-major: first along the minor axis, then along the major axis.

use cubit_voxel::{Cell, Facing};
use glam::IVec3;

use crate::cube_mesh::MeshAccumulator;
use crate::face_graphics::FaceGraphics;
use crate::face_table::push_face;
use crate::voxel_source::VoxelSource;

/// One merged rectangle of faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceQuad {
    /// World side the rectangle faces.
    pub facing: Facing,
    /// Cell value shared by every face in the rectangle.
    pub cell: Cell,
    /// Minimum cell covered.
    pub origin: IVec3,
    /// Extent in cells, 1 along the axis perpendicular to `facing`.
    pub size: IVec3,
}

impl FaceQuad {
    /// Number of unit faces the rectangle covers.
    pub fn area(&self) -> i32 {
        self.size.x * self.size.y * self.size.z
    }

    /// Returns `true` if the cell at `p` contributes a face to this rectangle.
    pub fn covers(&self, p: IVec3) -> bool {
        p.cmpge(self.origin).all() && p.cmplt(self.origin + self.size).all()
    }
}

/// Returns `(layer_axis, minor_axis, major_axis)` for a facing, each 0=X, 1=Y, 2=Z.
///
/// North/South sweep planes of constant Z, East/West constant X and
/// Top/Bottom constant Y.
fn sweep_axes(facing: Facing) -> (usize, usize, usize) {
    match facing {
        Facing::North | Facing::South => (2, 0, 1), // layer=Z, minor=X, major=Y
        Facing::East | Facing::West => (0, 2, 1),   // layer=X, minor=Z, major=Y
        Facing::Top | Facing::Bottom => (1, 0, 2),  // layer=Y, minor=X, major=Z
    }
}

/// Converts sweep coordinates back to `(x, y, z)`.
fn axes_to_xyz(axes: (usize, usize, usize), layer: usize, minor: usize, major: usize) -> IVec3 {
    let mut coords = [0i32; 3];
    coords[axes.0] = layer as i32;
    coords[axes.1] = minor as i32;
    coords[axes.2] = major as i32;
    IVec3::from_array(coords)
}

/// Returns `true` if the `facing` side of the cell at `p` is exposed.
///
/// Neighbours outside the source count as empty.
fn face_visible<S>(source: &S, dims: IVec3, p: IVec3, facing: Facing) -> bool
where
    S: VoxelSource + ?Sized,
{
    if source.is_empty(source.get(p.x, p.y, p.z)) {
        return false;
    }
    let n = p + facing.offset();
    if n.cmplt(IVec3::ZERO).any() || n.cmpge(dims).any() {
        return true;
    }
    source.is_empty(source.get(n.x, n.y, n.z))
}

/// Computes the merged face rectangles of one facing.
///
/// Rectangles come out ordered by plane, then row-major within each plane.
pub fn greedy_quads<S: VoxelSource + ?Sized>(source: &S, facing: Facing) -> Vec<FaceQuad> {
    let (w, h, d) = source.dimensions();
    let dims = [w, h, d];
    let dims_v = IVec3::new(w as i32, h as i32, d as i32);
    let axes = sweep_axes(facing);
    let (layers, minor_n, major_n) = (dims[axes.0], dims[axes.1], dims[axes.2]);

    let mut quads = Vec::new();
    let mut pending: Vec<Option<Cell>> = vec![None; minor_n * major_n];

    for layer in 0..layers {
        for major in 0..major_n {
            for minor in 0..minor_n {
                let p = axes_to_xyz(axes, layer, minor, major);
                pending[major * minor_n + minor] = face_visible(source, dims_v, p, facing)
                    .then(|| source.get(p.x, p.y, p.z));
            }
        }

        for major in 0..major_n {
            for minor in 0..minor_n {
                let Some(tag) = pending[major * minor_n + minor] else {
                    continue;
                };

                // Extend along the minor axis.
                let mut width = 1;
                while minor + width < minor_n
                    && pending[major * minor_n + minor + width] == Some(tag)
                {
                    width += 1;
                }

                // Extend along the major axis while the whole run matches.
                let mut height = 1;
                'grow: while major + height < major_n {
                    let row = (major + height) * minor_n;
                    for m in minor..minor + width {
                        if pending[row + m] != Some(tag) {
                            break 'grow;
                        }
                    }
                    height += 1;
                }

                for dm in 0..height {
                    let row = (major + dm) * minor_n;
                    pending[row + minor..row + minor + width].fill(None);
                }

                let mut size = [1i32; 3];
                size[axes.1] = width as i32;
                size[axes.2] = height as i32;
                quads.push(FaceQuad {
                    facing,
                    cell: tag,
                    origin: axes_to_xyz(axes, layer, minor, major),
                    size: IVec3::from_array(size),
                });
            }
        }
    }

    quads
}

/// Largest source extent, per axis, whose vertices fit [`crate::CubeVertex`].
pub const MAX_SOURCE_EXTENT: usize = u8::MAX as usize;

/// Compiles `source` into `mesh`, replacing its previous contents.
///
/// Each rectangle takes its atlas tile from the cube face that the cell's
/// facing rotates onto the rectangle's world side. Rectangles whose tile
/// cannot be resolved are skipped. A source larger than
/// [`MAX_SOURCE_EXTENT`] along any axis leaves `mesh` empty. Returns the
/// number of quads emitted.
pub fn compile<S, G, M>(source: &S, graphics: &G, mesh: &mut M) -> usize
where
    S: VoxelSource + ?Sized,
    G: FaceGraphics + ?Sized,
    M: MeshAccumulator + ?Sized,
{
    mesh.reset();
    let (w, h, d) = source.dimensions();
    if w.max(h).max(d) > MAX_SOURCE_EXTENT {
        tracing::warn!("refusing to mesh a {w}x{h}x{d} source, limit is {MAX_SOURCE_EXTENT}");
        return 0;
    }
    let mut emitted = 0;
    for facing in Facing::ALL {
        for quad in greedy_quads(source, facing) {
            let d = quad.cell.decompose();
            let Some(cube) = d.cube else {
                continue;
            };
            let local_face = facing.cube_local_face(d.facing);
            let Some(atlas) = graphics.resolve_face_graphic(cube, local_face) else {
                tracing::trace!(
                    "no face graphic for cube {} face {local_face:?}, skipping quad at {}",
                    cube.0,
                    quad.origin
                );
                continue;
            };
            if push_face(mesh, facing, quad.origin, quad.size, atlas) {
                emitted += 1;
            }
        }
    }
    emitted
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use cubit_voxel::{CHUNK_SIZE, Chunk, CubeDef, CubeRef, CubeRegistry, FaceIndex, VoxRef};

    use super::*;
    use crate::cube_mesh::CubeMesh;

    const STONE: Cell = Cell::cube(CubeRef(0), Facing::North);
    const DIRT: Cell = Cell::cube(CubeRef(1), Facing::North);

    fn test_registry() -> CubeRegistry {
        let mut reg = CubeRegistry::new();
        reg.register(CubeDef::uniform("stone", FaceIndex(1)))
            .expect("register stone");
        reg.register(CubeDef::uniform("dirt", FaceIndex(2)))
            .expect("register dirt");
        reg
    }

    fn chunk() -> Chunk {
        Chunk::new_empty(IVec3::ZERO)
    }

    #[test]
    fn test_flat_surface_single_type_produces_one_quad() {
        let mut chunk = chunk();
        for z in 0..16 {
            for x in 0..16 {
                chunk.set(IVec3::new(x, 0, z), STONE);
            }
        }
        let top = greedy_quads(&chunk, Facing::Top);
        assert_eq!(top.len(), 1, "flat 16x16 surface should merge to 1 quad");
        assert_eq!(top[0].origin, IVec3::ZERO);
        assert_eq!(top[0].size, IVec3::new(16, 1, 16));
    }

    #[test]
    fn test_checkerboard_produces_many_quads() {
        let mut chunk = chunk();
        for z in 0..16 {
            for x in 0..16 {
                let cell = if (x + z) % 2 == 0 { STONE } else { DIRT };
                chunk.set(IVec3::new(x, 0, z), cell);
            }
        }
        assert_eq!(greedy_quads(&chunk, Facing::Top).len(), CHUNK_SIZE * CHUNK_SIZE);
    }

    #[test]
    fn test_l_shaped_surface_produces_two_quads() {
        let mut chunk = chunk();
        for x in 0..8 {
            chunk.set(IVec3::new(x, 0, 0), STONE);
        }
        for z in 1..8 {
            chunk.set(IVec3::new(0, 0, z), STONE);
        }
        let top = greedy_quads(&chunk, Facing::Top);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].size, IVec3::new(8, 1, 1), "minor axis is grown first");
        assert_eq!(top[1].origin, IVec3::new(0, 0, 1));
        assert_eq!(top[1].size, IVec3::new(1, 1, 7));
    }

    #[test]
    fn test_different_types_not_merged() {
        let mut chunk = chunk();
        for x in 0..8 {
            chunk.set(IVec3::new(x, 0, 0), STONE);
        }
        for x in 8..16 {
            chunk.set(IVec3::new(x, 0, 0), DIRT);
        }
        let top = greedy_quads(&chunk, Facing::Top);
        assert_eq!(top.len(), 2);
        assert!(top.iter().any(|q| q.cell == STONE && q.size.x == 8));
        assert!(top.iter().any(|q| q.cell == DIRT && q.size.x == 8));
    }

    #[test]
    fn test_different_facings_not_merged() {
        let mut chunk = chunk();
        chunk.set(IVec3::new(0, 0, 0), STONE);
        chunk.set(IVec3::new(1, 0, 0), Cell::cube(CubeRef(0), Facing::East));
        assert_eq!(greedy_quads(&chunk, Facing::Top).len(), 2);
    }

    #[test]
    fn test_empty_chunk_produces_nothing() {
        let mut mesh = CubeMesh::new();
        assert_eq!(compile(&chunk(), &test_registry(), &mut mesh), 0);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_solid_chunk_produces_six_face_quads() {
        let chunk = Chunk::new(IVec3::ZERO, STONE);
        let mut mesh = CubeMesh::new();
        assert_eq!(compile(&chunk, &test_registry(), &mut mesh), 6);
        for facing in Facing::ALL {
            assert_eq!(mesh.count_quads_for_facing(facing), 1, "{facing:?}");
        }
    }

    #[test]
    fn test_vox_cells_do_not_hide_or_draw_faces() {
        let mut chunk = chunk();
        chunk.set(IVec3::new(4, 4, 4), STONE);
        chunk.set(IVec3::new(5, 4, 4), Cell::vox(VoxRef(0), Facing::North));
        let east = greedy_quads(&chunk, Facing::East);
        assert_eq!(east.len(), 1);
        assert_eq!(east[0].origin, IVec3::new(4, 4, 4));
        assert!(greedy_quads(&chunk, Facing::West).iter().all(|q| q.cell == STONE));
    }

    #[test]
    fn test_unresolved_graphics_skip_quads() {
        let mut chunk = chunk();
        chunk.set(IVec3::new(0, 0, 0), STONE);
        chunk.set(IVec3::new(8, 8, 8), Cell::cube(CubeRef(42), Facing::North));
        let mut mesh = CubeMesh::new();
        assert_eq!(compile(&chunk, &test_registry(), &mut mesh), 6);
        assert!(mesh.vertices.iter().all(|v| v.atlas == [1, 0]));
    }

    #[test]
    fn test_rotated_cube_uses_rotated_face_tile() {
        let mut reg = CubeRegistry::new();
        let mut def = CubeDef::uniform("furnace", FaceIndex(1));
        def.faces[Facing::North.index()] = FaceIndex(9);
        let furnace = reg.register(def).unwrap();

        let mut chunk = chunk();
        chunk.set(IVec3::new(3, 3, 3), Cell::cube(furnace, Facing::East));
        let mut mesh = CubeMesh::new();
        compile(&chunk, &reg, &mut mesh);

        for quad in mesh.vertices.chunks_exact(6) {
            let expected = if quad[0].facing() == Facing::East { [9, 0] } else { [1, 0] };
            assert_eq!(quad[0].atlas, expected, "{:?}", quad[0].facing());
        }
    }

    /// A single row of cells along X.
    struct Strip {
        cells: Vec<Cell>,
    }

    impl VoxelSource for Strip {
        fn dimensions(&self) -> (usize, usize, usize) {
            (self.cells.len(), 1, 1)
        }

        fn get(&self, x: i32, _y: i32, _z: i32) -> Cell {
            self.cells[x as usize]
        }

        fn is_empty(&self, cell: Cell) -> bool {
            cell.is_empty()
        }
    }

    fn strip_with_last_cube(len: usize) -> Strip {
        let mut cells = vec![Cell::EMPTY; len];
        cells[len - 1] = STONE;
        Strip { cells }
    }

    #[test]
    fn test_oversized_source_is_not_meshed() {
        let reg = test_registry();
        let mut mesh = CubeMesh::new();
        compile(&Chunk::new(IVec3::ZERO, STONE), &reg, &mut mesh);

        let strip = strip_with_last_cube(300);
        assert_eq!(compile(&strip, &reg, &mut mesh), 0);
        assert!(mesh.is_empty(), "previous contents are cleared as well");
        // The rectangles themselves are still computed in full.
        assert_eq!(greedy_quads(&strip, Facing::East)[0].origin, IVec3::new(299, 0, 0));
    }

    #[test]
    fn test_source_at_extent_limit_reaches_far_corner() {
        let strip = strip_with_last_cube(MAX_SOURCE_EXTENT);
        let mut mesh = CubeMesh::new();
        assert_eq!(compile(&strip, &test_registry(), &mut mesh), 6);
        let max_x = mesh.vertices.iter().map(|v| v.position[0]).max();
        assert_eq!(max_x, Some(255));
    }

    #[test]
    fn test_compile_replaces_previous_contents() {
        let chunk = Chunk::new(IVec3::ZERO, STONE);
        let reg = test_registry();
        let mut mesh = CubeMesh::new();
        compile(&chunk, &reg, &mut mesh);
        let first = mesh.clone();
        compile(&chunk, &reg, &mut mesh);
        assert_eq!(mesh, first);
    }
}
