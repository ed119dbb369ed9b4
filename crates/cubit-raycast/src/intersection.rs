//! Grid traversal (Amanatides & Woo) against the cell world.
//!
//! The ray is parameterized over its length: `t = 0` at the origin and
//! `t = 1` at the far end. Cells are visited in strict order of entry.

use cubit_voxel::{Cell, CubeRef, Facing, VoxRef, World};
use glam::{IVec3, Vec3};

use crate::ray::Ray;

/// Read access to cells by world position.
pub trait CellLookup {
    /// Returns the cell at `p`; unloaded positions read as [`Cell::EMPTY`].
    fn cell_at(&self, p: IVec3) -> Cell;
}

impl CellLookup for World {
    fn cell_at(&self, p: IVec3) -> Cell {
        self.get_cell(p)
    }
}

/// The first occupied cell along a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldIntersection {
    /// World position of the hit cell.
    pub position: IVec3,
    /// Side of the hit cell the ray entered through, `None` when the ray
    /// started inside the cell.
    pub face: Option<Facing>,
    pub cube: Option<CubeRef>,
    pub vox: Option<VoxRef>,
    /// Facing stored in the hit cell.
    pub facing: Facing,
    /// Distance from the ray origin to the entry point, in world units.
    pub distance: f32,
}

impl WorldIntersection {
    /// The empty cell in front of the entered face, where a new cell would be placed.
    pub fn adjacent_position(&self) -> Option<IVec3> {
        self.face.map(|f| self.position + f.offset())
    }

    fn new(position: IVec3, face: Option<Facing>, cell: Cell, distance: f32) -> Option<Self> {
        let d = cell.decompose();
        if d.cube.is_none() && d.vox.is_none() {
            return None;
        }
        Some(Self {
            position,
            face,
            cube: d.cube,
            vox: d.vox,
            facing: d.facing,
            distance,
        })
    }
}

/// Safely compute 1.0 / x, clamping to `f32::MAX` when x ≈ 0.
fn safe_inv(x: f32) -> f32 {
    if x.abs() < f32::EPSILON {
        f32::MAX
    } else {
        1.0 / x
    }
}

/// Parametric distance to the first cell boundary along one axis.
fn initial_t_max(origin: f32, cell: i32, span: f32, t_delta: f32) -> f32 {
    if span > 0.0 {
        (cell as f32 + 1.0 - origin) * t_delta
    } else if span < 0.0 {
        (origin - cell as f32) * t_delta
    } else {
        f32::MAX
    }
}

/// Face entered when stepping along an axis with sign `step`.
fn entered_face(axis: usize, step: i32) -> Facing {
    match (axis, step > 0) {
        (0, true) => Facing::West,
        (0, false) => Facing::East,
        (1, true) => Facing::Bottom,
        (1, false) => Facing::Top,
        (_, true) => Facing::North,
        (_, false) => Facing::South,
    }
}

/// Returns the first cube or vox cell along `ray`, or `None` if the whole
/// length passes through empty cells.
///
/// The origin cell is tested first. A degenerate ray tests nothing else.
pub fn cast_ray<W: CellLookup + ?Sized>(ray: &Ray, world: &W) -> Option<WorldIntersection> {
    if !ray.origin.is_finite() {
        return None;
    }
    let mut cell = ray.origin.floor().as_ivec3();
    if let Some(hit) = WorldIntersection::new(cell, None, world.cell_at(cell), 0.0) {
        return Some(hit);
    }
    if ray.is_degenerate() {
        return None;
    }

    let span = ray.span();
    let step = IVec3::new(
        if span.x >= 0.0 { 1 } else { -1 },
        if span.y >= 0.0 { 1 } else { -1 },
        if span.z >= 0.0 { 1 } else { -1 },
    );
    let t_delta = Vec3::new(
        safe_inv(span.x.abs()),
        safe_inv(span.y.abs()),
        safe_inv(span.z.abs()),
    );
    let mut t_max = Vec3::new(
        initial_t_max(ray.origin.x, cell.x, span.x, t_delta.x),
        initial_t_max(ray.origin.y, cell.y, span.y, t_delta.y),
        initial_t_max(ray.origin.z, cell.z, span.z, t_delta.z),
    );

    loop {
        // Advance along the axis with the smallest t_max.
        let axis = if t_max.x < t_max.y && t_max.x < t_max.z {
            0
        } else if t_max.y < t_max.z {
            1
        } else {
            2
        };
        let t = t_max[axis];
        if t > 1.0 {
            return None;
        }
        t_max[axis] += t_delta[axis];
        // Stepping past the i32 range leaves the addressable world.
        cell[axis] = cell[axis].checked_add(step[axis])?;

        let face = entered_face(axis, step[axis]);
        let distance = t * ray.length;
        if let Some(hit) = WorldIntersection::new(cell, Some(face), world.cell_at(cell), distance) {
            tracing::trace!("ray hit {} through {face:?} at t={t}", hit.position);
            return Some(hit);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
