//! Simple demo motion

use crate::ecs::Component;
use crate::foundation::math::Vec3;

/// Constant rotation about an axis
#[derive(Debug, Clone, PartialEq)]
pub struct SpinComponent {
    /// Rotation axis (normalized on use)
    pub axis: Vec3,
    /// Angular speed in radians per second
    pub speed: f32,
}

impl Component for SpinComponent {}

impl SpinComponent {
    /// Spin around `axis` at `speed` radians per second
    pub fn new(axis: Vec3, speed: f32) -> Self {
        Self { axis, speed }
    }
}
