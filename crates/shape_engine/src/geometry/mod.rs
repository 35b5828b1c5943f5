//! Geometric primitives and bounding volumes
//!
//! Pure value types used by the mesh builders, the collision system and the
//! debug visualizer:
//!
//! - [`Aabb`] - axis-aligned box with overlap and transform support
//! - [`Sphere`] - bounding sphere
//! - [`Obb`] - oriented box with explicit axes
//! - [`Ray`] - finite ray with a validated unit direction
//!
//! Invalid geometric input (zero-length directions, degenerate triangles,
//! negative radii) is rejected with [`GeometryError::InvalidInput`] instead of
//! being allowed to produce NaNs further down the pipeline.

pub mod bounds;
pub mod ray;

pub use bounds::{Aabb, Obb, Sphere};
pub use ray::Ray;

use crate::foundation::math::{constants::LENGTH_EPSILON, utils, Vec3};
use thiserror::Error;

/// Errors produced by geometry construction and mesh building
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Input parameters cannot describe a valid shape
    #[error("Invalid geometric input: {0}")]
    InvalidInput(String),
}

/// Result type for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Normalize a vector, rejecting zero-length and non-finite input
///
/// `what` names the parameter in the error message.
pub fn normalize_checked(v: &Vec3, what: &str) -> GeometryResult<Vec3> {
    if !utils::is_finite(v) {
        return Err(GeometryError::InvalidInput(format!(
            "{what} has non-finite components: {v:?}"
        )));
    }
    let length = v.norm();
    if length <= LENGTH_EPSILON {
        return Err(GeometryError::InvalidInput(format!(
            "{what} has zero length"
        )));
    }
    Ok(v / length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_checked_rejects_zero() {
        let err = normalize_checked(&Vec3::zeros(), "direction").unwrap_err();
        assert!(matches!(err, GeometryError::InvalidInput(msg) if msg.contains("direction")));
    }

    #[test]
    fn test_normalize_checked_rejects_nan() {
        assert!(normalize_checked(&Vec3::new(f32::NAN, 0.0, 1.0), "normal").is_err());
    }

    #[test]
    fn test_normalize_checked_unit_length() {
        let n = normalize_checked(&Vec3::new(0.0, 3.0, 4.0), "normal").unwrap();
        assert!((n.norm() - 1.0).abs() < 1e-6);
    }
}
