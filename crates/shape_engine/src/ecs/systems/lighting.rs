//! Lighting system for converting ECS entities to render data

use crate::ecs::components::{LightComponent, LightType, TransformComponent};
use crate::ecs::World;
use crate::foundation::math::{Color, Vec3};
use crate::render::LightingUniform;

/// Builds the per-frame [`LightingUniform`] from light entities
///
/// The shader has a single directional light. The first enabled light wins;
/// a point light contributes the direction from its position toward the
/// scene origin.
#[derive(Debug, Clone)]
pub struct LightingSystem {
    /// Ambient term applied to every lit draw
    pub ambient: Color,
}

impl Default for LightingSystem {
    fn default() -> Self {
        Self {
            ambient: LightingUniform::default().ambient,
        }
    }
}

impl LightingSystem {
    /// Creates a lighting system with the default ambient term
    pub fn new() -> Self {
        Self::default()
    }

    /// Lighting for this frame as seen from `view_position`
    ///
    /// Falls back to the default light when the world has none.
    pub fn build_uniform(&self, world: &World, view_position: Vec3) -> LightingUniform {
        let mut uniform = LightingUniform {
            ambient: self.ambient,
            view_position,
            ..LightingUniform::default()
        };

        let Some((entity, light)) = world
            .query::<LightComponent>()
            .into_iter()
            .find(|(_, light)| light.enabled)
        else {
            log::trace!("LightingSystem: no enabled lights, using default");
            return uniform;
        };

        let direction = match light.light_type {
            LightType::Directional => light.direction,
            LightType::Point => {
                let position = world
                    .get_component::<TransformComponent>(entity)
                    .map_or(light.position, |transform| transform.position);
                -position
            }
        };
        if let Some(direction) = direction.try_normalize(f32::EPSILON) {
            uniform.direction = direction;
        }
        uniform.color = light.color * light.intensity;

        log::trace!(
            "LightingSystem: {:?} light, direction {:?}, color {:?}",
            light.light_type,
            uniform.direction,
            uniform.color
        );
        uniform
    }
}
