//! Per-frame lighting uniforms

use crate::foundation::math::{Color, Vec3};

/// Lighting state shared by every lit draw in a frame
///
/// One directional light plus an ambient term. Point lights are folded into
/// a direction relative to the scene origin by the lighting system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingUniform {
    /// Direction the light travels (unit length)
    pub direction: Vec3,
    /// Light color premultiplied by intensity
    pub color: Color,
    /// Ambient color
    pub ambient: Color,
    /// Eye position for specular highlights
    pub view_position: Vec3,
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.3, -1.0, -0.5).normalize(),
            color: Vec3::repeat(1.0),
            ambient: Vec3::repeat(0.15),
            view_position: Vec3::zeros(),
        }
    }
}
