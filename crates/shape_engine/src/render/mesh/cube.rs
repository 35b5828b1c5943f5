use super::{check_finite, check_non_negative};
use crate::foundation::math::{Color, Vec2, Vec3};
use crate::geometry::{GeometryResult, Obb};
use crate::render::Vertex;

/// One box face: the axis its normal follows, the sign of that axis, and
/// four corner indices in counter-clockwise order seen from outside.
struct Face {
    axis: usize,
    sign: f32,
    quad: [usize; 4],
}

/// Corner indices follow `bounds::BOX_CORNER_SIGNS` (bit 0 = +x, bit 1 = +y, bit 2 = +z)
const FACES: [Face; 6] = [
    Face { axis: 0, sign: 1.0, quad: [5, 1, 3, 7] },
    Face { axis: 0, sign: -1.0, quad: [0, 4, 6, 2] },
    Face { axis: 1, sign: 1.0, quad: [6, 7, 3, 2] },
    Face { axis: 1, sign: -1.0, quad: [0, 1, 5, 4] },
    Face { axis: 2, sign: 1.0, quad: [4, 5, 7, 6] },
    Face { axis: 2, sign: -1.0, quad: [1, 0, 2, 3] },
];

const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Two triangles per quad
const QUAD_TRIANGLES: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// Axis-aligned cube spanning `center +- size / 2`
///
/// 36 vertices with one flat normal per face.
pub fn cube_vertices(center: Vec3, size: Vec3, color: Color) -> GeometryResult<Vec<Vertex>> {
    check_finite(&center, "cube center")?;
    for i in 0..3 {
        check_non_negative(size[i], "cube size")?;
    }

    let obb = Obb::new(center, [Vec3::x(), Vec3::y(), Vec3::z()], size * 0.5);
    Ok(box_vertices(&obb, color))
}

/// Cube following an oriented box's axes
pub fn oriented_cube_vertices(obb: &Obb, color: Color) -> GeometryResult<Vec<Vertex>> {
    check_finite(&obb.center, "box center")?;
    for axis in &obb.axes {
        check_finite(axis, "box axis")?;
    }
    for i in 0..3 {
        check_non_negative(obb.half_extents[i], "box half extent")?;
    }
    if !obb.is_orthonormal() {
        log::warn!("Building cube from non-orthonormal axes {:?}", obb.axes);
    }

    Ok(box_vertices(obb, color))
}

fn box_vertices(obb: &Obb, color: Color) -> Vec<Vertex> {
    let corners = obb.corners();

    let mut vertices = Vec::with_capacity(FACES.len() * QUAD_TRIANGLES.len());
    for face in &FACES {
        let normal = obb.axes[face.axis] * face.sign;
        for &k in &QUAD_TRIANGLES {
            vertices.push(Vertex::new(
                corners[face.quad[k]],
                color,
                normal,
                Vec2::from(QUAD_UVS[k]),
            ));
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants::PI, Quat, Transform};
    use crate::geometry::Aabb;
    use crate::render::mesh::test_support::winding_normals;
    use approx::assert_relative_eq;

    fn white() -> Vec3 {
        Vec3::repeat(1.0)
    }

    #[test]
    fn test_unit_cube_layout() {
        let vertices = cube_vertices(Vec3::zeros(), Vec3::repeat(2.0), white()).unwrap();
        assert_eq!(vertices.len(), 36);

        let canonical = [Vec3::x(), -Vec3::x(), Vec3::y(), -Vec3::y(), Vec3::z(), -Vec3::z()];
        for v in &vertices {
            assert!(v.position.iter().all(|c| (-1.0..=1.0).contains(c)));
            assert!(canonical.contains(&v.normal()), "unexpected normal {:?}", v.normal);
            assert_eq!(v.color, [1.0, 1.0, 1.0]);
        }
    }

    #[test]
    fn test_faces_wind_outward() {
        let vertices = cube_vertices(Vec3::new(3.0, -1.0, 2.0), Vec3::new(1.0, 2.0, 3.0), white()).unwrap();
        for (tri, winding) in vertices.chunks_exact(3).zip(winding_normals(&vertices)) {
            assert!(winding.dot(&tri[0].normal()) > 0.0);
        }
    }

    #[test]
    fn test_vertices_lie_on_their_face() {
        let vertices = cube_vertices(Vec3::zeros(), Vec3::new(2.0, 4.0, 6.0), white()).unwrap();
        let half = Vec3::new(1.0, 2.0, 3.0);
        for v in &vertices {
            let n = v.normal();
            // distance along the face normal equals the half extent on that axis
            assert_relative_eq!(v.position().dot(&n), half.dot(&n.abs()), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_oriented_cube_follows_axes() {
        let aabb = Aabb::from_center_extents(Vec3::zeros(), Vec3::repeat(1.0));
        let transform = Transform::from_position_rotation(
            Vec3::new(0.0, 1.0, 0.0),
            Quat::from_axis_angle(&Vec3::y_axis(), PI / 4.0),
        );
        let obb = Obb::from_aabb_transform(&aabb, &transform);

        let vertices = oriented_cube_vertices(&obb, white()).unwrap();
        assert_eq!(vertices.len(), 36);

        let corners = obb.corners();
        for v in &vertices {
            assert!(corners.iter().any(|c| (c - v.position()).norm() < 1e-5));
            assert_relative_eq!(v.normal().norm(), 1.0, epsilon = 1e-5);
        }
        for (tri, winding) in vertices.chunks_exact(3).zip(winding_normals(&vertices)) {
            assert!(winding.dot(&tri[0].normal()) > 0.0);
        }
    }

    #[test]
    fn test_negative_size_rejected() {
        assert!(cube_vertices(Vec3::zeros(), Vec3::new(1.0, -1.0, 1.0), white()).is_err());
        assert!(cube_vertices(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::repeat(1.0), white()).is_err());
    }
}
