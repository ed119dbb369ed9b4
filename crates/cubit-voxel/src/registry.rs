//! Cube definition registry: maps compact [`CubeRef`] values to [`CubeDef`]
//! metadata such as per-face atlas tiles.
//!
//! The registry is built once at startup. References are handed out
//! sequentially from 0; `0xFFFF` is reserved for [`CubeRef::INVALID`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::CubeRef;
use crate::facing::Facing;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Width and height of the face atlas in tiles (2048 px atlas, 16 px faces).
pub const ATLAS_DIMS: u16 = 2048 / 16;

/// Index of one 16×16 tile in the face atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceIndex(pub u16);

impl FaceIndex {
    /// No tile assigned. Faces using it are not drawn.
    pub const INVALID: FaceIndex = FaceIndex(0xFFFF);

    /// Returns `true` unless this is [`FaceIndex::INVALID`].
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// Tile column and row inside the atlas.
    pub fn to_atlas_xy(self) -> (u16, u16) {
        (self.0 % ATLAS_DIMS, self.0 / ATLAS_DIMS)
    }
}

/// Full descriptor for a cube type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CubeDef {
    /// Human-readable name (e.g. "dirt", "grass").
    pub name: String,
    /// Atlas tile per cube-local face, indexed by [`Facing::index`].
    pub faces: [FaceIndex; 6],
    /// Whether the cube can be seen through. Carried for renderers; face
    /// culling treats every cube as opaque.
    pub transparent: bool,
}

impl CubeDef {
    /// A cube showing the same tile on all six faces.
    pub fn uniform(name: impl Into<String>, face: FaceIndex) -> Self {
        Self {
            name: name.into(),
            faces: [face; 6],
            transparent: false,
        }
    }

    /// Tile for one of the cube's own faces.
    pub fn face(&self, local_face: Facing) -> FaceIndex {
        self.faces[local_face.index()]
    }
}

/// Errors that can occur during cube registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A cube with the same name has already been registered.
    #[error("duplicate cube name: {0}")]
    DuplicateName(String),
    /// Every reference below the invalid sentinel is taken.
    #[error("cube registry is full (max 65535 cubes)")]
    RegistryFull,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps [`CubeRef`] → [`CubeDef`] with O(1) lookup by index and by name.
#[derive(Default)]
pub struct CubeRegistry {
    /// Dense array where `index == CubeRef.0`.
    cubes: Vec<CubeDef>,
    name_to_ref: FxHashMap<String, CubeRef>,
}

impl CubeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a cube and returns its reference.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if a cube with the same name
    /// exists, or [`RegistryError::RegistryFull`] once 65 535 cubes are
    /// registered.
    pub fn register(&mut self, def: CubeDef) -> Result<CubeRef, RegistryError> {
        if self.name_to_ref.contains_key(&def.name) {
            return Err(RegistryError::DuplicateName(def.name));
        }
        if self.cubes.len() >= CubeRef::INVALID.0 as usize {
            return Err(RegistryError::RegistryFull);
        }

        let r = CubeRef(self.cubes.len() as u16);
        tracing::debug!("registered cube {:?} as {}", def.name, r.0);
        self.name_to_ref.insert(def.name.clone(), r);
        self.cubes.push(def);
        Ok(r)
    }

    /// Returns the definition for a reference, or `None` if it is unknown.
    ///
    /// Cells loaded from elsewhere may carry references this registry never
    /// issued, so this does not panic.
    pub fn get(&self, r: CubeRef) -> Option<&CubeDef> {
        self.cubes.get(r.0 as usize)
    }

    /// Returns the reference for a named cube.
    pub fn lookup_by_name(&self, name: &str) -> Option<CubeRef> {
        self.name_to_ref.get(name).copied()
    }

    /// Number of registered cubes.
    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
