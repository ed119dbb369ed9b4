//! A bounded ray in world space.

use glam::Vec3;

/// A ray segment starting at `origin` and running `length` world units along `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction, or zero for a degenerate ray.
    pub direction: Vec3,
    pub length: f32,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// A zero or non-finite direction becomes `Vec3::ZERO`; such a ray only
    /// ever tests its origin cell.
    pub fn new(origin: Vec3, direction: Vec3, length: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            length,
        }
    }

    /// Returns `true` if the ray cannot leave its origin cell.
    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec3::ZERO || !self.length.is_finite() || self.length <= 0.0
    }

    /// The full displacement from origin to far end.
    pub fn span(&self) -> Vec3 {
        self.direction * self.length
    }
}
