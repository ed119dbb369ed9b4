//! Cell picking: walks a ray through the world grid and reports the first occupied cell.

pub mod intersection;
pub mod ray;

pub use intersection::{CellLookup, WorldIntersection, cast_ray};
pub use ray::Ray;
