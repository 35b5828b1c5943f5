//! Transform component for the ECS system

use crate::ecs::Component;
use crate::foundation::math::{Mat4, Quat, Transform as MathTransform, Vec3};

/// ECS Transform component
///
/// World-space placement of an entity. Renderers draw their local-space
/// geometry through [`TransformComponent::to_matrix`], and colliders are moved
/// into world space with the same matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position (Y-up right-handed)
    pub position: Vec3,

    /// World space rotation quaternion
    pub rotation: Quat,

    /// World space scale factors
    pub scale: Vec3,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create from position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create from full transform specification
    pub fn from_transform(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Convert to foundation math Transform for calculations
    pub fn to_math_transform(&self) -> MathTransform {
        MathTransform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Convert to transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        self.to_math_transform().to_matrix()
    }

    /// Builder pattern: Set rotation from axis-angle (radians)
    pub fn with_rotation_axis_angle(mut self, axis: Vec3, angle: f32) -> Self {
        if let Some(axis) = nalgebra::Unit::try_new(axis, f32::EPSILON) {
            self.rotation = Quat::from_axis_angle(&axis, angle);
        }
        self
    }

    /// Builder pattern: Set uniform scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::repeat(scale);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants::HALF_PI, utils};
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_matrix() {
        assert_relative_eq!(TransformComponent::identity().to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_matrix_applies_scale_then_rotation_then_translation() {
        let transform = TransformComponent::from_position(Vec3::new(0.0, 1.0, 0.0))
            .with_rotation_axis_angle(Vec3::z(), HALF_PI)
            .with_uniform_scale(2.0);

        let p = utils::transform_point(&transform.to_matrix(), &Vec3::x());
        assert_relative_eq!(p, Vec3::new(0.0, 3.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_zero_axis_keeps_rotation() {
        let transform = TransformComponent::identity().with_rotation_axis_angle(Vec3::zeros(), 1.0);
        assert_eq!(transform.rotation, Quat::identity());
    }
}
