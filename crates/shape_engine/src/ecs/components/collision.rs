//! Collision detection components for ECS

use crate::ecs::Entity;
use crate::foundation::math::Mat4;
use crate::geometry::{Aabb, Sphere};
use crate::render::PrimitiveRenderer;
use std::collections::HashSet;

/// Bounding volume in the entity's local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Axis-aligned box; re-fitted around the transformed corners
    Aabb(Aabb),
    /// Sphere; radius scaled by the largest axis scale
    Sphere(Sphere),
}

impl ColliderShape {
    /// Move the shape into world space
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        match self {
            Self::Aabb(aabb) => Self::Aabb(aabb.transform(matrix)),
            Self::Sphere(sphere) => Self::Sphere(sphere.transform(matrix)),
        }
    }

    /// Overlap test between two shapes in the same space
    ///
    /// Touching shapes count as overlapping.
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Aabb(a), Self::Aabb(b)) => a.overlaps(b),
            (Self::Sphere(a), Self::Sphere(b)) => a.intersects(b),
            (Self::Sphere(s), Self::Aabb(b)) | (Self::Aabb(b), Self::Sphere(s)) => {
                s.overlaps_aabb(b)
            }
        }
    }

    /// Box enclosing the shape
    pub fn bounds(&self) -> Aabb {
        match self {
            Self::Aabb(aabb) => *aabb,
            Self::Sphere(sphere) => sphere.to_aabb(),
        }
    }
}

/// Component that marks an entity as having collision detection enabled
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderComponent {
    /// Local-space bounding volume
    pub shape: ColliderShape,

    /// Should this collider be visualized in debug mode?
    pub debug_draw: bool,
}

impl crate::ecs::Component for ColliderComponent {}

impl ColliderComponent {
    /// Create a new collider with default settings
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            debug_draw: true,
        }
    }

    /// Fit a collider to a renderer's local geometry
    ///
    /// Spheres get a sphere collider, everything else its local box.
    pub fn from_renderer(renderer: &PrimitiveRenderer) -> Self {
        let shape = match renderer {
            PrimitiveRenderer::Sphere(sphere) => ColliderShape::Sphere(sphere.sphere()),
            other => ColliderShape::Aabb(other.local_bounds()),
        };
        Self::new(shape)
    }

    /// Enable debug visualization
    pub fn with_debug_draw(mut self, enabled: bool) -> Self {
        self.debug_draw = enabled;
        self
    }

    /// Shape in world space for the given model matrix
    pub fn world_shape(&self, model: &Mat4) -> ColliderShape {
        self.shape.transformed(model)
    }
}

/// Component that tracks the current collision state of an entity
///
/// Rewritten by the collision system every frame.
#[derive(Debug, Default, Clone)]
pub struct CollisionStateComponent {
    /// All entities we're currently colliding with
    pub colliding_with: HashSet<Entity>,

    /// Entities we started colliding with this frame
    pub collision_entered: Vec<Entity>,

    /// Entities we stopped colliding with this frame
    pub collision_exited: Vec<Entity>,
}

impl crate::ecs::Component for CollisionStateComponent {}

impl CollisionStateComponent {
    /// Check if we're currently colliding with any entity
    pub fn is_colliding(&self) -> bool {
        !self.colliding_with.is_empty()
    }

    /// Check if we're colliding with a specific entity
    pub fn is_colliding_with(&self, entity: Entity) -> bool {
        self.colliding_with.contains(&entity)
    }

    /// Get the number of entities we're colliding with
    pub fn collision_count(&self) -> usize {
        self.colliding_with.len()
    }

    /// Check if we just started colliding with a specific entity this frame
    pub fn just_collided_with(&self, entity: Entity) -> bool {
        self.collision_entered.contains(&entity)
    }

    /// Replace the contact set, recording what entered and exited
    pub(crate) fn apply_contacts(&mut self, contacts: HashSet<Entity>) {
        self.collision_entered = contacts.difference(&self.colliding_with).copied().collect();
        self.collision_exited = self.colliding_with.difference(&contacts).copied().collect();
        self.colliding_with = contacts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::{CubeRenderer, SphereRenderer};

    #[test]
    fn test_mixed_shape_overlap() {
        let sphere = ColliderShape::Sphere(Sphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0).unwrap());
        let touching = ColliderShape::Aabb(Aabb::new(Vec3::repeat(-1.0), Vec3::repeat(1.0)));
        let apart = ColliderShape::Aabb(Aabb::new(Vec3::repeat(5.0), Vec3::repeat(6.0)));

        assert!(sphere.overlaps(&touching));
        assert!(touching.overlaps(&sphere));
        assert!(!sphere.overlaps(&apart));
    }

    #[test]
    fn test_world_shape_follows_translation() {
        let collider = ColliderComponent::new(ColliderShape::Sphere(
            Sphere::new(Vec3::zeros(), 0.5).unwrap(),
        ));
        let moved = collider.world_shape(&Mat4::new_translation(&Vec3::new(3.0, 0.0, 0.0)));
        match moved {
            ColliderShape::Sphere(sphere) => {
                assert_eq!(sphere.center, Vec3::new(3.0, 0.0, 0.0));
                assert!((sphere.radius - 0.5).abs() < 1e-6);
            }
            ColliderShape::Aabb(_) => panic!("shape kind changed"),
        }
    }

    #[test]
    fn test_collider_fitted_to_renderer() {
        let sphere = PrimitiveRenderer::from(SphereRenderer::new(Vec3::zeros(), 2.0, Vec3::x()).unwrap());
        assert!(matches!(
            ColliderComponent::from_renderer(&sphere).shape,
            ColliderShape::Sphere(s) if (s.radius - 2.0).abs() < 1e-6
        ));

        let cube = PrimitiveRenderer::from(
            CubeRenderer::new(Vec3::zeros(), Vec3::repeat(2.0), Vec3::x()).unwrap(),
        );
        assert_eq!(
            ColliderComponent::from_renderer(&cube).shape,
            ColliderShape::Aabb(Aabb::new(Vec3::repeat(-1.0), Vec3::repeat(1.0)))
        );
    }

    #[test]
    fn test_contacts_track_enter_and_exit() {
        let mut world = crate::ecs::World::new();
        let a = world.create_entity();
        let b = world.create_entity();

        let mut state = CollisionStateComponent::default();
        state.apply_contacts(HashSet::from([a]));
        assert!(state.just_collided_with(a));

        state.apply_contacts(HashSet::from([b]));
        assert_eq!(state.collision_entered, vec![b]);
        assert_eq!(state.collision_exited, vec![a]);
        assert!(state.is_colliding_with(b));
        assert_eq!(state.collision_count(), 1);
    }
}
