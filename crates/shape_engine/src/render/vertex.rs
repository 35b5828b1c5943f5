//! Interleaved vertex layout shared by every mesh builder

use crate::foundation::math::{Color, Vec2, Vec3};
use bytemuck::{Pod, Zeroable};

/// Vertex structure for rendering
///
/// Laid out as 11 consecutive floats so buffers can be uploaded with
/// `bytemuck::cast_slice` and described with fixed attribute offsets.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],

    /// Linear RGB color
    pub color: [f32; 3],

    /// Normal vector (direction for line primitives)
    pub normal: [f32; 3],

    /// Texture coordinates
    pub uv: [f32; 2],
}

impl Vertex {
    /// Byte size of one vertex
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// Attribute layout as `(location, component count, byte offset)`
    pub const ATTRIBUTES: [(u32, i32, usize); 4] = [
        (0, 3, 0),
        (1, 3, 12),
        (2, 3, 24),
        (3, 2, 36),
    ];

    /// Create a new vertex
    pub fn new(position: Vec3, color: Color, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.into(),
            color: color.into(),
            normal: normal.into(),
            uv: uv.into(),
        }
    }

    /// Position as a vector
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    /// Normal as a vector
    pub fn normal(&self) -> Vec3 {
        Vec3::from(self.normal)
    }
}
