//! Collider bounds visualization

use crate::debug::DebugDrawSystem;
use crate::ecs::components::{ColliderComponent, ColliderShape, CollisionStateComponent, TransformComponent};
use crate::ecs::World;
use crate::foundation::math::{Color, Mat4, Vec3};

/// Emits each collider's world bounds as a frame-only debug shape
#[derive(Debug, Clone)]
pub struct BoundsDebugSystem {
    /// Color for colliders with no contacts
    pub idle_color: Color,
    /// Color for colliders touching something
    pub colliding_color: Color,
}

impl Default for BoundsDebugSystem {
    fn default() -> Self {
        Self {
            idle_color: Vec3::new(0.1, 0.9, 0.2),
            colliding_color: Vec3::new(0.95, 0.1, 0.1),
        }
    }
}

impl BoundsDebugSystem {
    /// Create the system with green/red colors
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bounds for every collider with `debug_draw` set
    pub fn update(&self, world: &World, debug: &mut DebugDrawSystem) {
        for (entity, collider) in world.query::<ColliderComponent>() {
            if !collider.debug_draw {
                continue;
            }

            let model = world
                .get_component::<TransformComponent>(entity)
                .map_or_else(Mat4::identity, TransformComponent::to_matrix);
            let colliding = world
                .get_component::<CollisionStateComponent>(entity)
                .is_some_and(CollisionStateComponent::is_colliding);
            let color = if colliding {
                self.colliding_color
            } else {
                self.idle_color
            };

            match collider.world_shape(&model) {
                ColliderShape::Aabb(aabb) => debug.draw_aabb(aabb, color, 0.0),
                ColliderShape::Sphere(sphere) => debug.draw_sphere(sphere, color, 0.0),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::DebugPrimitive;
    use crate::ecs::systems::CollisionSystem;
    use crate::ecs::System;
    use crate::geometry::Aabb;

    #[test]
    fn test_colors_follow_collision_state() {
        let mut world = World::new();
        let shape = ColliderShape::Aabb(Aabb::new(Vec3::repeat(-1.0), Vec3::repeat(1.0)));
        for x in [0.0, 1.5, 10.0] {
            let entity = world.create_entity();
            world.add_component(entity, TransformComponent::from_position(Vec3::new(x, 0.0, 0.0))).unwrap();
            world.add_component(entity, ColliderComponent::new(shape)).unwrap();
        }
        let hidden = world.create_entity();
        world.add_component(hidden, ColliderComponent::new(shape).with_debug_draw(false)).unwrap();

        CollisionSystem::new().update(&mut world, 0.016);

        let system = BoundsDebugSystem::new();
        let mut debug = DebugDrawSystem::new();
        system.update(&world, &mut debug);

        let shapes: Vec<_> = debug.shapes().collect();
        assert_eq!(shapes.len(), 3);
        let red = shapes.iter().filter(|s| s.color == system.colliding_color).count();
        let green = shapes.iter().filter(|s| s.color == system.idle_color).count();
        assert_eq!((red, green), (2, 1));
        assert!(shapes.iter().all(|s| matches!(s.primitive, DebugPrimitive::Aabb(_))));
    }
}
