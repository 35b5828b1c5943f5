//! Finite rays

use crate::foundation::math::{utils, Vec3};
use crate::geometry::{normalize_checked, Aabb, GeometryError, GeometryResult};

/// Ray with an origin, a unit direction and a finite length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
    /// Length of the visible / queryable segment
    pub length: f32,
}

impl Ray {
    /// Create a ray; the direction is normalized here
    pub fn new(origin: Vec3, direction: Vec3, length: f32) -> GeometryResult<Self> {
        if !utils::is_finite(&origin) {
            return Err(GeometryError::InvalidInput(format!(
                "ray origin must be finite, got {origin:?}"
            )));
        }
        let direction = normalize_checked(&direction, "ray direction")?;
        if !length.is_finite() || length < 0.0 {
            return Err(GeometryError::InvalidInput(format!(
                "ray length must be finite and non-negative, got {length}"
            )));
        }
        Ok(Self {
            origin,
            direction,
            length,
        })
    }

    /// End point `origin + direction * length`
    pub fn end(&self) -> Vec3 {
        self.point_at(self.length)
    }

    /// Point at distance `t` along the ray
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test against a box
    ///
    /// Returns the entry distance (0 when the origin is inside) if the hit
    /// lies within `[0, length]`.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = self.length;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let direction = self.direction[axis];

            if direction.abs() < f32::EPSILON {
                // parallel to this slab: must already be between its planes
                if origin < aabb.min[axis] || origin > aabb.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let mut t0 = (aabb.min[axis] - origin) * inv;
            let mut t1 = (aabb.max[axis] - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_direction_is_normalized() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 3.0), 2.0).unwrap();
        assert_relative_eq!(ray.direction, Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(ray.end(), Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_invalid_rays_rejected() {
        assert!(Ray::new(Vec3::zeros(), Vec3::zeros(), 1.0).is_err());
        assert!(Ray::new(Vec3::zeros(), Vec3::x(), -1.0).is_err());
        assert!(Ray::new(Vec3::zeros(), Vec3::x(), f32::NAN).is_err());
        assert!(Ray::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::x(), 1.0).is_err());
        assert!(Ray::new(Vec3::new(0.0, f32::INFINITY, 0.0), Vec3::x(), 1.0).is_err());
    }

    #[test]
    fn test_slab_hit_and_miss() {
        let aabb = Aabb::new(Vec3::new(2.0, -1.0, -1.0), Vec3::new(4.0, 1.0, 1.0));

        let hit = Ray::new(Vec3::zeros(), Vec3::x(), 10.0).unwrap();
        assert_relative_eq!(hit.intersect_aabb(&aabb).unwrap(), 2.0);

        let too_short = Ray::new(Vec3::zeros(), Vec3::x(), 1.5).unwrap();
        assert!(too_short.intersect_aabb(&aabb).is_none());

        let pointing_away = Ray::new(Vec3::zeros(), -Vec3::x(), 10.0).unwrap();
        assert!(pointing_away.intersect_aabb(&aabb).is_none());

        let parallel_outside = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::x(), 10.0).unwrap();
        assert!(parallel_outside.intersect_aabb(&aabb).is_none());
    }

    #[test]
    fn test_origin_inside_box() {
        let aabb = Aabb::new(Vec3::repeat(-1.0), Vec3::repeat(1.0));
        let ray = Ray::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 0.0), 0.1).unwrap();
        assert_eq!(ray.intersect_aabb(&aabb), Some(0.0));
    }
}
