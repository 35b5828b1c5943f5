//! Bounding volumes: axis-aligned boxes, spheres and oriented boxes
//!
//! All three are plain `Copy` values. None of them enforce their invariants
//! defensively (`min <= max`, orthonormal axes); callers are expected to
//! maintain them, which keeps the hot overlap tests branch-free.

use crate::foundation::math::{utils, Mat3, Mat4, Transform, Vec3};
use crate::geometry::{GeometryError, GeometryResult, Ray};

/// Sign pattern of the eight box corners
///
/// Bit 0 of the index selects +x, bit 1 selects +y, bit 2 selects +z. The
/// cube mesh builder and the debug edge builder index corners with this same
/// table, so the ordering is part of the module contract.
pub const BOX_CORNER_SIGNS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
];

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from its minimum and maximum corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a box from a center point and half extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Smallest box containing every point, or `None` for an empty input
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.inf(p),
            max: acc.max.sup(p),
        }))
    }

    /// Center point `(min + max) / 2`
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half extents `(max - min) / 2`
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Full size along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Move the box so that it is centered on `center`, keeping its extents
    pub fn set_center(&mut self, center: Vec3) {
        let extents = self.extents();
        self.min = center - extents;
        self.max = center + extents;
    }

    /// Closed-interval overlap test; boxes that only touch do overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Whether the point lies inside or on the boundary
    pub fn contains_point(&self, point: &Vec3) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Point of the box closest to `point`
    pub fn closest_point(&self, point: &Vec3) -> Vec3 {
        point.sup(&self.min).inf(&self.max)
    }

    /// The eight corners, ordered by [`BOX_CORNER_SIGNS`]
    pub fn corners(&self) -> [Vec3; 8] {
        let center = self.center();
        let extents = self.extents();
        BOX_CORNER_SIGNS.map(|s| center + Vec3::from(s).component_mul(&extents))
    }

    /// Box covering both `self` and `other`
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Enclosing box of this box after an arbitrary affine transform
    ///
    /// All eight corners are transformed and the componentwise min/max taken,
    /// so rotation and non-uniform scale grow the box as needed instead of
    /// only translating `min` and `max`.
    pub fn transform(&self, matrix: &Mat4) -> Aabb {
        let corners = self.corners().map(|c| utils::transform_point(matrix, &c));
        let first = corners[0];
        corners[1..].iter().fold(Aabb::new(first, first), |acc, p| Aabb {
            min: acc.min.inf(p),
            max: acc.max.sup(p),
        })
    }
}

/// Bounding sphere
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sphere {
    /// Center position
    pub center: Vec3,
    /// Radius (never negative)
    pub radius: f32,
}

impl Sphere {
    /// Create a sphere, rejecting negative or non-finite radii
    pub fn new(center: Vec3, radius: f32) -> GeometryResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeometryError::InvalidInput(format!(
                "sphere radius must be finite and non-negative, got {radius}"
            )));
        }
        if !utils::is_finite(&center) {
            return Err(GeometryError::InvalidInput(format!(
                "sphere center has non-finite components: {center:?}"
            )));
        }
        Ok(Self { center, radius })
    }

    /// Check if this sphere intersects another (touching counts)
    pub fn intersects(&self, other: &Sphere) -> bool {
        let distance_squared = (self.center - other.center).norm_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Check if this sphere overlaps an axis-aligned box
    pub fn overlaps_aabb(&self, aabb: &Aabb) -> bool {
        let closest = aabb.closest_point(&self.center);
        (closest - self.center).norm_squared() <= self.radius * self.radius
    }

    /// Sphere enclosing this one after an affine transform
    ///
    /// The radius is scaled by the largest axis scale of the matrix so the
    /// result stays conservative under non-uniform scale.
    pub fn transform(&self, matrix: &Mat4) -> Sphere {
        let linear: Mat3 = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let max_scale = (0..3)
            .map(|i| linear.column(i).norm())
            .fold(0.0_f32, f32::max);
        Sphere {
            center: utils::transform_point(matrix, &self.center),
            radius: self.radius * max_scale,
        }
    }

    /// Axis-aligned box enclosing the sphere
    pub fn to_aabb(&self) -> Aabb {
        Aabb::from_center_extents(self.center, Vec3::repeat(self.radius))
    }

    /// Distance along the ray to the first intersection, if within its length
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;

        // direction is unit length, so the quadratic's `a` term is 1
        let b = 2.0 * oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) * 0.5;
        let t2 = (-b + sqrt_discriminant) * 0.5;
        let t = if t1 >= 0.0 {
            t1
        } else if t2 >= 0.0 {
            t2
        } else {
            return None;
        };

        (t <= ray.length).then_some(t)
    }
}

/// Oriented bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    /// Center position
    pub center: Vec3,
    /// Local axes; expected to be unit length and mutually orthogonal
    pub axes: [Vec3; 3],
    /// Half size along each local axis
    pub half_extents: Vec3,
}

impl Default for Obb {
    fn default() -> Self {
        Self {
            center: Vec3::zeros(),
            axes: [Vec3::x(), Vec3::y(), Vec3::z()],
            half_extents: Vec3::zeros(),
        }
    }
}

impl Obb {
    /// Create an oriented box from explicit axes
    pub fn new(center: Vec3, axes: [Vec3; 3], half_extents: Vec3) -> Self {
        Self {
            center,
            axes,
            half_extents,
        }
    }

    /// Oriented box covering a local-space `Aabb` placed by `transform`
    pub fn from_aabb_transform(aabb: &Aabb, transform: &Transform) -> Self {
        let rotation = transform.rotation;
        Self {
            center: transform.transform_point(&aabb.center()),
            axes: [rotation * Vec3::x(), rotation * Vec3::y(), rotation * Vec3::z()],
            half_extents: aabb.extents().component_mul(&transform.scale.abs()),
        }
    }

    /// The eight corners, ordered by [`BOX_CORNER_SIGNS`]
    pub fn corners(&self) -> [Vec3; 8] {
        BOX_CORNER_SIGNS.map(|s| {
            self.center
                + self.axes[0] * (s[0] * self.half_extents.x)
                + self.axes[1] * (s[1] * self.half_extents.y)
                + self.axes[2] * (s[2] * self.half_extents.z)
        })
    }

    /// Tightest axis-aligned box around this oriented box
    pub fn enclosing_aabb(&self) -> Aabb {
        let extents = Vec3::from_fn(|i, _| {
            (0..3)
                .map(|j| self.axes[j][i].abs() * self.half_extents[j])
                .sum()
        });
        Aabb::from_center_extents(self.center, extents)
    }

    /// Whether the axes are unit length and mutually orthogonal
    pub fn is_orthonormal(&self) -> bool {
        const EPSILON: f32 = 1.0e-4;
        let [a, b, c] = &self.axes;
        [a, b, c]
            .iter()
            .all(|axis| approx::abs_diff_eq!(axis.norm(), 1.0, epsilon = EPSILON))
            && approx::abs_diff_eq!(a.dot(b), 0.0, epsilon = EPSILON)
            && approx::abs_diff_eq!(b.dot(c), 0.0, epsilon = EPSILON)
            && approx::abs_diff_eq!(a.dot(c), 0.0, epsilon = EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants::PI, Quat};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn sample_boxes() -> Vec<Aabb> {
        vec![
            Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)),
            Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0)),
            Aabb::new(Vec3::new(0.5, 0.5, 0.5), Vec3::new(3.0, 3.0, 3.0)),
            Aabb::new(Vec3::new(-4.0, -4.0, -4.0), Vec3::new(-3.0, -3.0, -3.0)),
            Aabb::new(Vec3::new(0.2, 5.0, 0.2), Vec3::new(0.8, 6.0, 0.8)),
            Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)),
        ]
    }

    #[test]
    fn test_center_and_extents() {
        let aabb = Aabb::new(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(3.0, 4.0, 1.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 3.0, 0.5));
        assert_eq!(aabb.extents(), Vec3::new(2.0, 1.0, 0.5));

        let rebuilt = Aabb::from_center_extents(aabb.center(), aabb.extents());
        assert_eq!(rebuilt, aabb);
    }

    #[test]
    fn test_set_center_preserves_extents() {
        let mut aabb = Aabb::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        let before = aabb.extents();

        aabb.set_center(Vec3::new(10.0, -5.0, 0.25));

        assert_relative_eq!(aabb.extents(), before, epsilon = EPSILON);
        assert_relative_eq!(aabb.center(), Vec3::new(10.0, -5.0, 0.25), epsilon = EPSILON);
    }

    #[test]
    fn test_overlaps_symmetric_and_reflexive() {
        let boxes = sample_boxes();
        for a in &boxes {
            assert!(a.overlaps(a));
            for b in &boxes {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_touching_boxes_overlap() {
        let a = Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_disjoint_on_single_axis() {
        let a = Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        // overlapping on x and z, separated on y only
        let b = Aabb::new(Vec3::new(0.2, 5.0, 0.2), Vec3::new(0.8, 6.0, 0.8));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_transform_pure_translation() {
        let aabb = Aabb::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 4.0, 3.0));
        let offset = Vec3::new(5.0, -2.0, 7.5);

        let moved = aabb.transform(&Mat4::new_translation(&offset));

        assert_relative_eq!(moved.center(), aabb.center() + offset, epsilon = EPSILON);
        assert_relative_eq!(moved.extents(), aabb.extents(), epsilon = EPSILON);
    }

    #[test]
    fn test_transform_rotation_encloses_corners() {
        let aabb = Aabb::new(Vec3::new(-1.0, -0.5, -0.25), Vec3::new(1.0, 0.5, 0.25));
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), PI / 4.0);
        let matrix = Mat4::new_translation(&Vec3::new(0.0, 1.0, 0.0)) * rotation.to_homogeneous();

        let enclosing = aabb.transform(&matrix);

        for corner in aabb.corners() {
            let p = utils::transform_point(&matrix, &corner);
            let grown = Aabb::from_center_extents(enclosing.center(), enclosing.extents() + Vec3::repeat(EPSILON));
            assert!(grown.contains_point(&p), "{p:?} outside {enclosing:?}");
        }

        // a 45 degree turn about z mixes x and y extents equally
        let expected = (1.0 + 0.5) * (PI / 4.0).cos();
        assert_relative_eq!(enclosing.extents().x, expected, epsilon = EPSILON);
        assert_relative_eq!(enclosing.extents().y, expected, epsilon = EPSILON);
        assert_relative_eq!(enclosing.extents().z, 0.25, epsilon = EPSILON);
    }

    #[test]
    fn test_transform_matches_obb_row_sum() {
        let aabb = Aabb::new(Vec3::new(-2.0, -1.0, -0.5), Vec3::new(2.0, 1.0, 0.5));
        let transform = Transform {
            position: Vec3::new(3.0, 0.0, -1.0),
            rotation: Quat::from_euler_angles(0.3, -0.7, 1.1),
            scale: Vec3::new(1.0, 2.0, 0.5),
        };

        let by_corners = aabb.transform(&transform.to_matrix());
        let by_row_sum = Obb::from_aabb_transform(&aabb, &transform).enclosing_aabb();

        assert_relative_eq!(by_corners.min, by_row_sum.min, epsilon = 1e-4);
        assert_relative_eq!(by_corners.max, by_row_sum.max, epsilon = 1e-4);
    }

    #[test]
    fn test_sphere_and_obb_defaults() {
        let sphere = Sphere::default();
        assert_eq!(sphere.center, Vec3::zeros());
        assert_eq!(sphere.radius, 0.0);

        let obb = Obb::default();
        assert_eq!(obb.center, Vec3::zeros());
        assert_eq!(obb.half_extents, Vec3::zeros());
        assert_eq!(obb.axes, [Vec3::x(), Vec3::y(), Vec3::z()]);
        assert!(obb.is_orthonormal());
    }

    #[test]
    fn test_sphere_rejects_negative_radius() {
        assert!(Sphere::new(Vec3::zeros(), -1.0).is_err());
        assert!(Sphere::new(Vec3::zeros(), f32::INFINITY).is_err());
        assert!(Sphere::new(Vec3::zeros(), 0.0).is_ok());
    }

    #[test]
    fn test_sphere_overlaps() {
        let a = Sphere::new(Vec3::zeros(), 1.0).unwrap();
        let b = Sphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0).unwrap();
        let c = Sphere::new(Vec3::new(2.5, 0.0, 0.0), 1.0).unwrap();
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));

        let aabb = Aabb::new(Vec3::new(1.5, -1.0, -1.0), Vec3::new(3.0, 1.0, 1.0));
        assert!(!a.overlaps_aabb(&aabb));
        assert!(b.overlaps_aabb(&aabb));
    }

    #[test]
    fn test_sphere_transform_uses_largest_scale() {
        let sphere = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 2.0).unwrap();
        let matrix = Mat4::new_translation(&Vec3::new(0.0, 3.0, 0.0))
            * Mat4::new_nonuniform_scaling(&Vec3::new(1.0, 3.0, 0.5));

        let moved = sphere.transform(&matrix);
        assert_relative_eq!(moved.center, Vec3::new(1.0, 3.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(moved.radius, 6.0, epsilon = EPSILON);
    }

    #[test]
    fn test_sphere_ray_hit_within_length() {
        let sphere = Sphere::new(Vec3::new(5.0, 0.0, 0.0), 1.0).unwrap();
        let long = Ray::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), 10.0).unwrap();
        let short = Ray::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), 3.0).unwrap();

        assert_relative_eq!(sphere.intersect_ray(&long).unwrap(), 4.0, epsilon = EPSILON);
        assert!(sphere.intersect_ray(&short).is_none());
    }

    #[test]
    fn test_obb_corners_match_aabb_when_axis_aligned() {
        let aabb = Aabb::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        let obb = Obb::new(aabb.center(), [Vec3::x(), Vec3::y(), Vec3::z()], aabb.extents());
        assert_eq!(obb.corners(), aabb.corners());
        assert_eq!(obb.enclosing_aabb(), aabb);
    }

    #[test]
    fn test_non_orthonormal_axes_detected() {
        let obb = Obb::new(
            Vec3::zeros(),
            [Vec3::x(), Vec3::new(1.0, 1.0, 0.0), Vec3::z()],
            Vec3::repeat(1.0),
        );
        assert!(!obb.is_orthonormal());
    }
}
