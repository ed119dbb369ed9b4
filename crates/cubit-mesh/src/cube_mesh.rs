//! Packed cube vertices and the mesh accumulator they are appended to.
//!
//! [`CubeVertex`] is a 12-byte vertex uploaded as-is to the GPU.

use cubit_voxel::Facing;

/// A single cube-mesh vertex, packed to 12 bytes.
///
/// Layout (12 bytes total):
///   - `[0..3]`   position `[u8; 3]`, chunk-local corner (0..=16)
///   - `[3]`      facing `u8`, world side index (0..=5), selects the light level
///   - `[4..6]`   uv `[u8; 2]`, tile repeats across a merged quad
///   - `[6..8]`   padding
///   - `[8..12]`  atlas `[u16; 2]`, tile column and row in the face atlas
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    pub position: [u8; 3],
    pub facing: u8,
    pub uv: [u8; 2],
    pub _pad: [u8; 2],
    pub atlas: [u16; 2],
}

static_assertions::assert_eq_size!(CubeVertex, [u8; 12]);

impl CubeVertex {
    pub fn new(position: [u8; 3], facing: Facing, uv: [u8; 2], atlas: (u16, u16)) -> Self {
        Self {
            position,
            facing: facing as u8,
            uv,
            _pad: [0; 2],
            atlas: [atlas.0, atlas.1],
        }
    }

    /// Decodes the facing byte. Corrupt values decode as North.
    pub fn facing(&self) -> Facing {
        Facing::from_bits(u32::from(self.facing))
    }
}

/// Destination for compiled vertices, usually a renderer-owned buffer.
pub trait MeshAccumulator {
    /// Drops all vertices.
    fn reset(&mut self);

    /// Appends one vertex. Every six consecutive vertices form one quad.
    fn append_vertex(&mut self, vertex: CubeVertex);

    /// Number of vertices appended since the last reset.
    fn vertex_count(&self) -> usize;
}

/// In-memory [`MeshAccumulator`] holding plain triangle-list vertices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CubeMesh {
    pub vertices: Vec<CubeVertex>,
}

impl CubeMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the mesh contains no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of quads (six vertices each).
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 6
    }

    /// Number of quads facing the given world side.
    pub fn count_quads_for_facing(&self, facing: Facing) -> usize {
        self.vertices
            .chunks_exact(6)
            .filter(|quad| quad[0].facing() == facing)
            .count()
    }

    /// Returns the vertex data as a byte slice for GPU upload (zero-copy).
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl MeshAccumulator for CubeMesh {
    fn reset(&mut self) {
        self.vertices.clear();
    }

    fn append_vertex(&mut self, vertex: CubeVertex) {
        self.vertices.push(vertex);
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
