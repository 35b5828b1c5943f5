use super::{check_finite, check_non_negative};
use crate::foundation::math::{
    constants::{PI, TAU},
    Color, Vec2, Vec3,
};
use crate::geometry::{GeometryError, GeometryResult};
use crate::render::Vertex;

/// UV sphere as a triangle list
///
/// `stacks` divide the polar angle φ ∈ [0, π] from the +Y pole down, and
/// `sectors` divide the azimuth θ ∈ [0, 2π). A point is
/// `center + radius * (cos θ sin φ, cos φ, sin θ sin φ)` and its normal is the
/// unit direction from the center. The quads touching each pole collapse to a
/// single triangle, giving `6 * sectors * (stacks - 1)` vertices.
pub fn sphere_vertices(
    center: Vec3,
    radius: f32,
    sectors: u32,
    stacks: u32,
    color: Color,
) -> GeometryResult<Vec<Vertex>> {
    check_finite(&center, "sphere center")?;
    check_non_negative(radius, "sphere radius")?;
    if sectors < 3 || stacks < 2 {
        return Err(GeometryError::InvalidInput(format!(
            "sphere needs at least 3 sectors and 2 stacks, got {sectors}x{stacks}"
        )));
    }

    let point = |stack: u32, sector: u32| {
        let phi = PI * stack as f32 / stacks as f32;
        let theta = TAU * sector as f32 / sectors as f32;
        let direction = Vec3::new(theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
        let uv = Vec2::new(sector as f32 / sectors as f32, stack as f32 / stacks as f32);
        Vertex::new(center + direction * radius, color, direction, uv)
    };

    let capacity = 6 * sectors as usize * (stacks as usize - 1);
    let mut vertices = Vec::with_capacity(capacity);

    for i in 0..stacks {
        for j in 0..sectors {
            let k1 = point(i, j);
            let k1_next = point(i, j + 1);
            let k2 = point(i + 1, j);
            let k2_next = point(i + 1, j + 1);

            // the top row of the first stack is the pole itself
            if i != 0 {
                vertices.extend_from_slice(&[k1, k1_next, k2]);
            }
            // the bottom row of the last stack is the other pole
            if i != stacks - 1 {
                vertices.extend_from_slice(&[k1_next, k2_next, k2]);
            }
        }
    }

    debug_assert_eq!(vertices.len(), capacity);
    Ok(vertices)
}

/// Three great circles (XY, XZ and YZ planes) as a line list
///
/// Only used for debug outlines; solid spheres switch to wireframe through
/// the fill mode instead.
pub fn sphere_line_vertices(
    center: Vec3,
    radius: f32,
    segments: u32,
    color: Color,
) -> GeometryResult<Vec<Vertex>> {
    check_finite(&center, "sphere center")?;
    check_non_negative(radius, "sphere radius")?;
    if segments < 3 {
        return Err(GeometryError::InvalidInput(format!(
            "circle needs at least 3 segments, got {segments}"
        )));
    }

    let planes: [fn(f32, f32) -> Vec3; 3] = [
        |c, s| Vec3::new(c, s, 0.0),
        |c, s| Vec3::new(c, 0.0, s),
        |c, s| Vec3::new(0.0, c, s),
    ];

    let mut vertices = Vec::with_capacity(planes.len() * segments as usize * 2);
    for on_plane in planes {
        for k in 0..segments {
            for step in [k, k + 1] {
                let angle = TAU * step as f32 / segments as f32;
                let direction = on_plane(angle.cos(), angle.sin());
                let u = step as f32 / segments as f32;
                vertices.push(Vertex::new(
                    center + direction * radius,
                    color,
                    direction,
                    Vec2::new(u, 0.0),
                ));
            }
        }
    }
    Ok(vertices)
}
