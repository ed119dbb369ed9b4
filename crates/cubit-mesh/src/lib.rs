//! Chunk meshing: greedy quad merging, packed cube vertices, and revision-driven recompilation.

pub mod compiled_chunk;
pub mod cube_mesh;
pub mod face_graphics;
pub mod face_table;
pub mod greedy;
pub mod invalidation;
pub mod voxel_source;

pub use compiled_chunk::{CompiledChunk, VoxPlacement, collect_vox_placements};
pub use cube_mesh::{CubeMesh, CubeVertex, MeshAccumulator};
pub use face_graphics::FaceGraphics;
pub use face_table::{FACING_LIGHT_LEVELS, push_face};
pub use greedy::{FaceQuad, MAX_SOURCE_EXTENT, compile, greedy_quads};
pub use invalidation::{affected_chunks, boundary_neighbors};
pub use voxel_source::VoxelSource;
