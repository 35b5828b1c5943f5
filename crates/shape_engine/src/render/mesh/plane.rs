use super::check_non_negative;
use crate::foundation::math::{Color, Vec2, Vec3};
use crate::geometry::{normalize_checked, GeometryError, GeometryResult};
use crate::render::Vertex;

/// Orthonormal `(normal, tangent, bitangent)` frame for a plane normal
///
/// The reference axis is +Y when `|n.x| > |n.y|` and +X otherwise, which keeps
/// it far from parallel to the normal.
pub fn plane_basis(normal: &Vec3) -> GeometryResult<(Vec3, Vec3, Vec3)> {
    let n = normalize_checked(normal, "plane normal")?;
    let reference = if n.x.abs() > n.y.abs() { Vec3::y() } else { Vec3::x() };
    let tangent = reference.cross(&n).normalize();
    let bitangent = n.cross(&tangent);
    Ok((n, tangent, bitangent))
}

/// Square of side `size` on the plane `{p : p·n = distance}`
///
/// Two counter-clockwise triangles facing the normal, centered on
/// `normal * distance`.
pub fn plane_vertices(
    normal: Vec3,
    distance: f32,
    size: f32,
    color: Color,
) -> GeometryResult<Vec<Vertex>> {
    if !distance.is_finite() {
        return Err(GeometryError::InvalidInput(format!(
            "plane distance must be finite, got {distance}"
        )));
    }
    check_non_negative(size, "plane size")?;

    let (n, tangent, bitangent) = plane_basis(&normal)?;
    let center = n * distance;
    let half = size * 0.5;

    let corners = [
        (center - tangent * half - bitangent * half, Vec2::new(0.0, 0.0)),
        (center + tangent * half - bitangent * half, Vec2::new(1.0, 0.0)),
        (center + tangent * half + bitangent * half, Vec2::new(1.0, 1.0)),
        (center - tangent * half + bitangent * half, Vec2::new(0.0, 1.0)),
    ];

    Ok([0, 1, 2, 0, 2, 3]
        .iter()
        .map(|&i| Vertex::new(corners[i].0, color, n, corners[i].1))
        .collect())
}
