use crate::foundation::math::{Color, Vec2, Vec3};
use crate::render::Vertex;

/// One line segment
pub fn line_vertices(start: Vec3, end: Vec3, color: Color) -> [Vertex; 2] {
    let direction = (end - start).try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros);
    [
        Vertex::new(start, color, direction, Vec2::new(0.0, 0.0)),
        Vertex::new(end, color, direction, Vec2::new(1.0, 0.0)),
    ]
}

/// The 12 edges of a box as a line list
///
/// `corners` must be ordered like `bounds::BOX_CORNER_SIGNS`, so two corners
/// share an edge exactly when their indices differ in one bit.
pub fn box_edge_vertices(corners: &[Vec3; 8], color: Color) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(24);
    for i in 0..8 {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                vertices.extend_from_slice(&line_vertices(corners[i], corners[i | bit], color));
            }
        }
    }
    vertices
}
