//! Procedural mesh builders
//!
//! Pure functions from shape parameters and a color to a flat vertex list.
//! Triangle lists use 3 vertices per triangle with counter-clockwise winding
//! seen from the outside; line lists use 2 vertices per segment. Nothing is
//! indexed, so a buffer can be rebuilt wholesale whenever a parameter changes.

mod cube;
mod plane;
mod ray;
mod sphere;
mod triangle;
mod wire;

pub use cube::{cube_vertices, oriented_cube_vertices};
pub use plane::{plane_basis, plane_vertices};
pub use ray::ray_vertices;
pub use sphere::{sphere_line_vertices, sphere_vertices};
pub use triangle::{triangle_vertices, TriangleGeometry};
pub use wire::{box_edge_vertices, line_vertices};

/// Default sphere longitude subdivision
pub const DEFAULT_SPHERE_SECTORS: u32 = 36;

/// Default sphere latitude subdivision
pub const DEFAULT_SPHERE_STACKS: u32 = 18;

/// Default segment count for debug circles
pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 32;

use crate::foundation::math::{utils, Vec3};
use crate::geometry::{GeometryError, GeometryResult};

/// Reject non-finite vectors
pub(crate) fn check_finite(v: &Vec3, what: &str) -> GeometryResult<()> {
    if utils::is_finite(v) {
        Ok(())
    } else {
        Err(GeometryError::InvalidInput(format!(
            "{what} has non-finite components: {v:?}"
        )))
    }
}

/// Reject negative or non-finite scalars
pub(crate) fn check_non_negative(value: f32, what: &str) -> GeometryResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidInput(format!(
            "{what} must be finite and non-negative, got {value}"
        )))
    }
}
