//! Bounding-volume overlap detection
//!
//! Brute-force pairwise test over every collider. Scenes here hold a handful
//! of primitives, so no broad phase is needed.

use crate::ecs::components::{
    ColliderComponent, ColliderShape, CollisionStateComponent, TransformComponent,
};
use crate::ecs::{Entity, System, World};
use crate::foundation::math::Mat4;
use std::collections::{HashMap, HashSet};

/// World-space collider of one entity
fn world_shape(world: &World, entity: Entity, collider: &ColliderComponent) -> ColliderShape {
    let model = world
        .get_component::<TransformComponent>(entity)
        .map_or_else(Mat4::identity, TransformComponent::to_matrix);
    collider.world_shape(&model)
}

/// Finds overlapping colliders and records them in `CollisionStateComponent`
///
/// Entities with a collider but no state component get one on their first
/// update.
#[derive(Debug, Default)]
pub struct CollisionSystem {
    pairs: Vec<(Entity, Entity)>,
}

impl CollisionSystem {
    /// Create the system
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlapping pairs found by the last update
    pub fn pairs(&self) -> &[(Entity, Entity)] {
        &self.pairs
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &'static str {
        "CollisionSystem"
    }

    fn update(&mut self, world: &mut World, _delta_time: f32) {
        let shapes: Vec<(Entity, ColliderShape)> = world
            .query::<ColliderComponent>()
            .into_iter()
            .map(|(entity, collider)| (entity, world_shape(world, entity, collider)))
            .collect();

        self.pairs.clear();
        let mut contacts: HashMap<Entity, HashSet<Entity>> = HashMap::new();
        for (i, (a, shape_a)) in shapes.iter().enumerate() {
            for (b, shape_b) in &shapes[i + 1..] {
                if shape_a.overlaps(shape_b) {
                    self.pairs.push((*a, *b));
                    contacts.entry(*a).or_default().insert(*b);
                    contacts.entry(*b).or_default().insert(*a);
                }
            }
        }

        for (entity, _) in shapes {
            let current = contacts.remove(&entity).unwrap_or_default();
            if !world.has_component::<CollisionStateComponent>(entity) {
                // entity came from the collider query, so it is alive
                let _ = world.add_component(entity, CollisionStateComponent::default());
            }
            if let Some(state) = world.get_component_mut::<CollisionStateComponent>(entity) {
                state.apply_contacts(current);
                for other in &state.collision_entered {
                    log::debug!("Collision started: {entity:?} <-> {other:?}");
                }
            }
        }

        log::trace!("{} overlapping collider pairs", self.pairs.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::geometry::{Aabb, Sphere};

    fn spawn(world: &mut World, position: Vec3, shape: ColliderShape) -> Entity {
        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::from_position(position)).unwrap();
        world.add_component(entity, ColliderComponent::new(shape)).unwrap();
        entity
    }

    fn unit_box() -> ColliderShape {
        ColliderShape::Aabb(Aabb::new(Vec3::repeat(-0.5), Vec3::repeat(0.5)))
    }

    #[test]
    fn test_overlap_uses_world_positions() {
        let mut world = World::new();
        let a = spawn(&mut world, Vec3::zeros(), unit_box());
        let b = spawn(&mut world, Vec3::new(0.75, 0.0, 0.0), unit_box());
        let far = spawn(&mut world, Vec3::new(10.0, 0.0, 0.0), unit_box());

        let mut system = CollisionSystem::new();
        system.update(&mut world, 0.016);

        assert_eq!(system.pairs().len(), 1);
        let state_a = world.get_component::<CollisionStateComponent>(a).unwrap();
        assert!(state_a.is_colliding_with(b));
        assert!(state_a.just_collided_with(b));
        assert!(!world.get_component::<CollisionStateComponent>(far).unwrap().is_colliding());
    }

    #[test]
    fn test_separation_clears_state() {
        let mut world = World::new();
        let a = spawn(&mut world, Vec3::zeros(), unit_box());
        let sphere = ColliderShape::Sphere(Sphere::new(Vec3::zeros(), 0.5).unwrap());
        let b = spawn(&mut world, Vec3::new(0.9, 0.0, 0.0), sphere);

        let mut system = CollisionSystem::new();
        system.update(&mut world, 0.016);
        assert!(world.get_component::<CollisionStateComponent>(b).unwrap().is_colliding_with(a));

        world.get_component_mut::<TransformComponent>(b).unwrap().position = Vec3::new(5.0, 0.0, 0.0);
        system.update(&mut world, 0.016);

        let state = world.get_component::<CollisionStateComponent>(b).unwrap();
        assert!(!state.is_colliding());
        assert_eq!(state.collision_exited, vec![a]);
        assert!(system.pairs().is_empty());
    }
}
