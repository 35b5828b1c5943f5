use crate::foundation::math::{Color, Vec2};
use crate::geometry::Ray;
use crate::render::Vertex;

/// Single line segment from the origin to the end of the ray
///
/// The normal slot carries the ray direction.
pub fn ray_vertices(ray: &Ray, color: Color) -> Vec<Vertex> {
    vec![
        Vertex::new(ray.origin, color, ray.direction, Vec2::new(0.0, 0.0)),
        Vertex::new(ray.end(), color, ray.direction, Vec2::new(1.0, 0.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_segment_endpoints() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), 5.0).unwrap();
        let vertices = ray_vertices(&ray, Vec3::new(1.0, 1.0, 0.0));

        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(vertices[1].position, [5.0, 0.0, 0.0]);
        assert!(vertices.iter().all(|v| v.normal == [1.0, 0.0, 0.0]));
    }
}
