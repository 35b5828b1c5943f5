//! Lighting component for ECS

use crate::ecs::Component;
use crate::foundation::math::{Color, Vec3};

/// Pure data component for lights
#[derive(Debug, Clone, PartialEq)]
pub struct LightComponent {
    /// The type of light
    pub light_type: LightType,
    /// RGB color values for the light (0.0 to 1.0 range)
    pub color: Color,
    /// Light intensity multiplier
    pub intensity: f32,
    /// World-space direction the light travels (directional lights)
    pub direction: Vec3,
    /// World-space position (point lights); the entity transform wins if present
    pub position: Vec3,
    /// Whether the light is currently enabled
    pub enabled: bool,
}

/// Types of lights supported by the lighting system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// Parallel rays, like sunlight
    Directional,
    /// Radiates from a position
    Point,
}

impl Component for LightComponent {}

/// Factory functions for creating light components
pub struct LightFactory;

impl LightFactory {
    /// Directional light; a zero direction falls back to straight down
    pub fn directional(direction: Vec3, color: Color, intensity: f32) -> LightComponent {
        LightComponent {
            light_type: LightType::Directional,
            color,
            intensity,
            direction: direction.try_normalize(f32::EPSILON).unwrap_or_else(|| -Vec3::y()),
            position: Vec3::zeros(),
            enabled: true,
        }
    }

    /// Point light at a world-space position
    pub fn point(position: Vec3, color: Color, intensity: f32) -> LightComponent {
        LightComponent {
            light_type: LightType::Point,
            color,
            intensity,
            direction: -Vec3::y(),
            position,
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_directional_light_normalizes_direction() {
        let light = LightFactory::directional(Vec3::new(0.0, -4.0, 3.0), Vec3::repeat(1.0), 2.0);
        assert_eq!(light.light_type, LightType::Directional);
        assert_relative_eq!(light.direction, Vec3::new(0.0, -0.8, 0.6), epsilon = 1e-6);
        assert!(light.enabled);
    }

    #[test]
    fn test_degenerate_direction_points_down() {
        let light = LightFactory::directional(Vec3::zeros(), Vec3::repeat(1.0), 1.0);
        assert_relative_eq!(light.direction, -Vec3::y());
    }

    #[test]
    fn test_point_light_keeps_position() {
        let light = LightFactory::point(Vec3::new(1.0, 2.0, 3.0), Vec3::x(), 0.5);
        assert_eq!(light.light_type, LightType::Point);
        assert_eq!(light.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
