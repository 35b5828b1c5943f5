//! Demo motion

use crate::ecs::components::{SpinComponent, TransformComponent};
use crate::ecs::{System, World};
use crate::foundation::math::Quat;
use nalgebra::Unit;

/// Rotates every spinning entity about its axis
#[derive(Debug, Default)]
pub struct SpinSystem;

impl System for SpinSystem {
    fn name(&self) -> &'static str {
        "SpinSystem"
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        for entity in world.entities_with2::<SpinComponent, TransformComponent>() {
            let Some(spin) = world.get_component::<SpinComponent>(entity) else {
                continue;
            };
            let Some(axis) = Unit::try_new(spin.axis, f32::EPSILON) else {
                continue;
            };
            let step = Quat::from_axis_angle(&axis, spin.speed * delta_time);

            if let Some(transform) = world.get_component_mut::<TransformComponent>(entity) {
                transform.rotation = step * transform.rotation;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants::HALF_PI, Vec3};
    use approx::assert_relative_eq;

    #[test]
    fn test_spin_accumulates() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::identity()).unwrap();
        world.add_component(entity, SpinComponent::new(Vec3::y(), HALF_PI)).unwrap();

        let mut system = SpinSystem;
        system.update(&mut world, 0.5);
        system.update(&mut world, 0.5);

        let transform = world.get_component::<TransformComponent>(entity).unwrap();
        assert_relative_eq!(transform.rotation.angle(), HALF_PI, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_axis_does_nothing() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::identity()).unwrap();
        world.add_component(entity, SpinComponent::new(Vec3::zeros(), 1.0)).unwrap();

        SpinSystem.update(&mut world, 1.0);
        assert_eq!(
            world.get_component::<TransformComponent>(entity).unwrap().rotation,
            Quat::identity()
        );
    }
}
