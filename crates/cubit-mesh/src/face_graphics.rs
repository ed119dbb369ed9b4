//! Resolution of cube faces to atlas tiles.

use cubit_voxel::{CubeRef, CubeRegistry, Facing};

/// Maps one of a cube's own faces to its tile in the face atlas.
pub trait FaceGraphics {
    /// Returns the atlas `(column, row)` for `local_face` of `cube`, or `None`
    /// if the cube is unknown or has no tile for that face.
    fn resolve_face_graphic(&self, cube: CubeRef, local_face: Facing) -> Option<(u16, u16)>;
}

impl FaceGraphics for CubeRegistry {
    fn resolve_face_graphic(&self, cube: CubeRef, local_face: Facing) -> Option<(u16, u16)> {
        let face = self.get(cube)?.face(local_face);
        face.is_valid().then(|| face.to_atlas_xy())
    }
}
