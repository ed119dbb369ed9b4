//! Voxel world data model: packed cells, solid/dense chunks, and the sparse world index.

pub mod cell;
pub mod chunk;
pub mod chunk_ref;
pub mod facing;
pub mod generator;
pub mod registry;
pub mod world;

pub use cell::{Cell, CellContent, CubeRef, Decomposed, VoxRef};
pub use chunk::{CHUNK_SIZE, CHUNK_VOLUME, Chunk};
pub use chunk_ref::ChunkRef;
pub use facing::Facing;
pub use generator::{ChunkGenerator, EmptyGenerator, FlatGenerator};
pub use registry::{ATLAS_DIMS, CubeDef, CubeRegistry, FaceIndex, RegistryError};
pub use world::World;
