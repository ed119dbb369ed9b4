//! End-to-end meshing checks over whole chunks.

use std::collections::HashSet;

use cubit_mesh::{CubeMesh, FaceQuad, VoxelSource, compile, greedy_quads};
use cubit_voxel::{
    Cell, Chunk, ChunkGenerator, CubeDef, CubeRef, CubeRegistry, FaceIndex, Facing, FlatGenerator,
    VoxRef,
};
use glam::IVec3;

fn registry_with(count: u16) -> CubeRegistry {
    let mut reg = CubeRegistry::new();
    for i in 0..count {
        reg.register(CubeDef::uniform(format!("cube_{i}"), FaceIndex(i)))
            .expect("register cube");
    }
    reg
}

/// Every `(cell, side)` pair the visibility rule says must be drawn.
fn expected_faces(chunk: &Chunk) -> HashSet<(IVec3, Facing)> {
    let mut faces = HashSet::new();
    for z in 0..16 {
        for y in 0..16 {
            for x in 0..16 {
                let p = IVec3::new(x, y, z);
                if chunk.is_empty(chunk.get(p)) {
                    continue;
                }
                for side in Facing::ALL {
                    // Chunk::get reads out-of-range neighbours as empty.
                    if chunk.is_empty(chunk.get(p + side.offset())) {
                        faces.insert((p, side));
                    }
                }
            }
        }
    }
    faces
}

/// Unit faces covered by the merged quads, asserting none is covered twice.
fn covered_faces(chunk: &Chunk) -> HashSet<(IVec3, Facing)> {
    let mut faces = HashSet::new();
    for side in Facing::ALL {
        for quad in greedy_quads(chunk, side) {
            for z in quad.origin.z..quad.origin.z + quad.size.z {
                for y in quad.origin.y..quad.origin.y + quad.size.y {
                    for x in quad.origin.x..quad.origin.x + quad.size.x {
                        let p = IVec3::new(x, y, z);
                        assert!(quad.covers(p));
                        assert_eq!(chunk.get(p), quad.cell, "quad mixes tags at {p}");
                        assert!(faces.insert((p, side)), "{side:?} face of {p} emitted twice");
                    }
                }
            }
        }
    }
    faces
}

/// Deterministic scatter of a few cube types, empties and vox cells.
fn scattered_chunk(seed: u32) -> Chunk {
    let mut chunk = Chunk::new_empty(IVec3::ZERO);
    let mut state = seed;
    for i in 0..4096 {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let p = IVec3::new(i % 16, (i / 16) % 16, i / 256);
        let cell = match state >> 29 {
            0..=2 => Cell::EMPTY,
            3 => Cell::vox(VoxRef(0), Facing::North),
            4 => Cell::cube(CubeRef(1), Facing::East),
            _ => Cell::cube(CubeRef(0), Facing::North),
        };
        chunk.set(p, cell);
    }
    chunk
}

fn quads_for(chunk: &Chunk, side: Facing) -> Vec<FaceQuad> {
    greedy_quads(chunk, side)
}

#[test]
fn carve_single_cell_from_solid_chunk() {
    let stone = Cell::cube(CubeRef(7), Facing::North);
    let mut chunk = Chunk::new_empty(IVec3::ZERO);
    let start = chunk.revision();

    assert!(chunk.fill(stone));
    assert!(chunk.set(IVec3::ZERO, Cell::EMPTY));
    assert_eq!(chunk.revision(), start + 2);
    assert_eq!(chunk.get(IVec3::ZERO), Cell::EMPTY);
    assert_eq!(chunk.get(IVec3::new(1, 0, 0)), stone);

    let faces = covered_faces(&chunk);
    assert_eq!(faces, expected_faces(&chunk));
    assert_eq!(faces.len(), 6 * 256);

    // The three newly exposed interior faces around the hole.
    assert!(faces.contains(&(IVec3::new(1, 0, 0), Facing::West)));
    assert!(faces.contains(&(IVec3::new(0, 1, 0), Facing::Bottom)));
    assert!(faces.contains(&(IVec3::new(0, 0, 1), Facing::North)));
    // The hole's outward sides are gone.
    assert!(!faces.contains(&(IVec3::ZERO, Facing::West)));
    assert!(!faces.contains(&(IVec3::ZERO, Facing::Bottom)));
    assert!(!faces.contains(&(IVec3::ZERO, Facing::North)));

    // Untouched sides still merge into a single rectangle.
    for side in [Facing::East, Facing::South, Facing::Top] {
        let quads = quads_for(&chunk, side);
        assert_eq!(quads.len(), 1, "{side:?}");
        assert_eq!(quads[0].area(), 256);
    }

    // The outer plane splits around the hole; the interior face stands alone.
    let west = quads_for(&chunk, Facing::West);
    assert_eq!(west.len(), 3);
    assert!(west.iter().all(|q| !q.covers(IVec3::ZERO)));
    assert!(west[2].covers(IVec3::new(1, 0, 0)));
    assert_eq!((west[0].origin, west[0].size), (IVec3::new(0, 0, 1), IVec3::new(1, 16, 15)));
    assert_eq!((west[1].origin, west[1].size), (IVec3::new(0, 1, 0), IVec3::new(1, 15, 1)));
    assert_eq!((west[2].origin, west[2].size), (IVec3::new(1, 0, 0), IVec3::ONE));
    assert_eq!(quads_for(&chunk, Facing::Bottom).len(), 3);
    assert_eq!(quads_for(&chunk, Facing::North).len(), 3);

    let mut mesh = CubeMesh::new();
    assert_eq!(compile(&chunk, &registry_with(8), &mut mesh), 12);
    assert_eq!(mesh.vertices.len(), 12 * 6);
}

#[test]
fn merged_quads_cover_exactly_the_visible_faces() {
    for seed in [1, 7, 42, 1234] {
        let chunk = scattered_chunk(seed);
        assert_eq!(covered_faces(&chunk), expected_faces(&chunk), "seed {seed}");
    }
}

#[test]
fn generated_terrain_meshes_completely() {
    let chunk = FlatGenerator::new(CubeRef(0), CubeRef(1)).generate(IVec3::ZERO);
    assert_eq!(covered_faces(&chunk), expected_faces(&chunk));

    // The grass surface is split by the hut, nothing else.
    let top: Vec<_> = quads_for(&chunk, Facing::Top)
        .into_iter()
        .filter(|q| q.cell.decompose().cube == Some(CubeRef(1)))
        .collect();
    assert!(top.len() > 1);
    assert!(top.iter().all(|q| q.origin.y == 11));
}

#[test]
fn recompiling_is_bit_identical() {
    let chunk = scattered_chunk(99);
    let reg = registry_with(2);
    let mut mesh = CubeMesh::new();
    compile(&chunk, &reg, &mut mesh);
    let first = mesh.vertex_bytes().to_vec();
    compile(&chunk, &reg, &mut mesh);
    assert_eq!(mesh.vertex_bytes(), first.as_slice());
}

#[test]
fn faces_with_different_tags_never_merge() {
    let mut chunk = Chunk::new_empty(IVec3::ZERO);
    // A row of the same cube alternating its facing.
    for x in 0..16 {
        let facing = if x % 2 == 0 { Facing::North } else { Facing::South };
        chunk.set(IVec3::new(x, 0, 0), Cell::cube(CubeRef(0), facing));
    }
    for side in Facing::ALL {
        for quad in quads_for(&chunk, side) {
            if matches!(side, Facing::West | Facing::East) {
                continue;
            }
            assert_eq!(quad.size.x, 1, "{side:?} merged across a facing change");
        }
    }
    assert_eq!(quads_for(&chunk, Facing::Top).len(), 16);
}
