use super::check_finite;
use crate::foundation::math::{constants::LENGTH_EPSILON, Color, Vec2, Vec3};
use crate::geometry::{Aabb, GeometryError, GeometryResult};
use crate::render::Vertex;

/// Triangle stored relative to its centroid
///
/// The owning transform places the centroid in the world, so moving a
/// triangle never requires rebuilding its vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleGeometry {
    /// Corners relative to the centroid
    pub local_points: [Vec3; 3],
    /// Centroid of the original world-space corners
    pub centroid: Vec3,
    /// Unit face normal, `(b - a) x (c - a)` normalized
    pub normal: Vec3,
}

impl TriangleGeometry {
    /// Recenter three points and compute the face normal
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> GeometryResult<Self> {
        for p in [&a, &b, &c] {
            check_finite(p, "triangle corner")?;
        }

        let cross = (b - a).cross(&(c - a));
        let doubled_area = cross.norm();
        if doubled_area <= LENGTH_EPSILON {
            return Err(GeometryError::InvalidInput(format!(
                "triangle {a:?}, {b:?}, {c:?} has zero area"
            )));
        }

        let centroid = (a + b + c) / 3.0;
        Ok(Self {
            local_points: [a - centroid, b - centroid, c - centroid],
            centroid,
            normal: cross / doubled_area,
        })
    }

    /// World-space corners
    pub fn world_points(&self) -> [Vec3; 3] {
        self.local_points.map(|p| p + self.centroid)
    }

    /// Local-space bounds
    pub fn local_bounds(&self) -> Aabb {
        let [a, b, c] = self.local_points;
        Aabb::new(a.inf(&b).inf(&c), a.sup(&b).sup(&c))
    }
}

/// Three local-space vertices sharing the flat normal
pub fn triangle_vertices(triangle: &TriangleGeometry, color: Color) -> Vec<Vertex> {
    const UVS: [[f32; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]];

    triangle
        .local_points
        .iter()
        .zip(UVS)
        .map(|(p, uv)| Vertex::new(*p, color, triangle.normal, Vec2::from(uv)))
        .collect()
}
