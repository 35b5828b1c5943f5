//! ECS World implementation

use super::{Component, Entity};
use slotmap::{SecondaryMap, SlotMap};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use thiserror::Error;

/// ECS errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcsError {
    /// The entity was destroyed or never belonged to this world
    #[error("Entity {0:?} is not alive")]
    DeadEntity(Entity),

    /// The table registered for a component type holds a different type
    #[error("Component table for {0} has the wrong type")]
    TableTypeMismatch(&'static str),
}

/// Type-erased view of one component table, for entity-wide operations
trait ComponentTable {
    fn remove_entity(&mut self, entity: Entity);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ComponentTable for SecondaryMap<Entity, T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// ECS World containing all entities and components
#[derive(Default)]
pub struct World {
    entities: SlotMap<Entity, ()>,
    tables: HashMap<TypeId, Box<dyn ComponentTable>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Destroy an entity and every component attached to it
    ///
    /// Returns `false` if the entity was already dead.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        for table in self.tables.values_mut() {
            table.remove_entity(entity);
        }
        true
    }

    /// Whether the entity exists
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate over all live entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    fn table<T: Component>(&self) -> Option<&SecondaryMap<Entity, T>> {
        self.tables
            .get(&TypeId::of::<T>())
            .and_then(|table| table.as_any().downcast_ref())
    }

    fn table_mut<T: Component>(&mut self) -> Option<&mut SecondaryMap<Entity, T>> {
        self.tables
            .get_mut(&TypeId::of::<T>())
            .and_then(|table| table.as_any_mut().downcast_mut())
    }

    /// Add a component to an entity, returning the one it replaced
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<Option<T>, EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::DeadEntity(entity));
        }

        let table = self
            .tables
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SecondaryMap::<Entity, T>::new()))
            .as_any_mut()
            .downcast_mut::<SecondaryMap<Entity, T>>()
            .ok_or(EcsError::TableTypeMismatch(std::any::type_name::<T>()))?;
        Ok(table.insert(entity, component))
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.table::<T>()?.get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.table_mut::<T>()?.get_mut(entity)
    }

    /// Detach and return a component
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.table_mut::<T>()?.remove(entity)
    }

    /// Whether the entity has a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.table::<T>().is_some_and(|table| table.contains_key(entity))
    }

    /// Number of entities carrying a `T`
    pub fn component_count<T: Component>(&self) -> usize {
        self.table::<T>().map_or(0, SecondaryMap::len)
    }

    /// All `(entity, component)` pairs for one component type
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        self.table::<T>()
            .map(|table| table.iter().collect())
            .unwrap_or_default()
    }

    /// Entities carrying a `T`
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        self.table::<T>()
            .map(|table| table.keys().collect())
            .unwrap_or_default()
    }

    /// Entities carrying both `A` and `B`, with both components
    pub fn view2<A: Component, B: Component>(&self) -> Vec<(Entity, &A, &B)> {
        let (Some(a), Some(b)) = (self.table::<A>(), self.table::<B>()) else {
            return Vec::new();
        };

        if a.len() <= b.len() {
            a.iter()
                .filter_map(|(e, ca)| b.get(e).map(|cb| (e, ca, cb)))
                .collect()
        } else {
            b.iter()
                .filter_map(|(e, cb)| a.get(e).map(|ca| (e, ca, cb)))
                .collect()
        }
    }

    /// Entities carrying `A`, `B` and `C`, with all three components
    pub fn view3<A: Component, B: Component, C: Component>(&self) -> Vec<(Entity, &A, &B, &C)> {
        let (Some(a), Some(b), Some(c)) = (self.table::<A>(), self.table::<B>(), self.table::<C>())
        else {
            return Vec::new();
        };

        let smallest = [a.len(), b.len(), c.len()]
            .into_iter()
            .enumerate()
            .min_by_key(|&(_, len)| len)
            .map_or(0, |(index, _)| index);
        let keys: Vec<Entity> = match smallest {
            0 => a.keys().collect(),
            1 => b.keys().collect(),
            _ => c.keys().collect(),
        };

        keys.into_iter()
            .filter_map(|e| Some((e, a.get(e)?, b.get(e)?, c.get(e)?)))
            .collect()
    }

    /// Entities carrying both `A` and `B`
    ///
    /// Systems that mutate one of the components collect ids first and then
    /// look each component up, which keeps the borrows disjoint.
    pub fn entities_with2<A: Component, B: Component>(&self) -> Vec<Entity> {
        self.view2::<A, B>().into_iter().map(|(e, _, _)| e).collect()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.entities.len())
            .field("component_types", &self.tables.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Position(i32);
    impl Component for Position {}

    #[derive(Debug, PartialEq)]
    struct Velocity(i32);
    impl Component for Velocity {}

    #[derive(Debug, PartialEq)]
    struct Tag;
    impl Component for Tag {}

    #[test]
    fn test_add_get_replace_remove() {
        let mut world = World::new();
        let e = world.create_entity();

        assert_eq!(world.add_component(e, Position(1)), Ok(None));
        assert_eq!(world.add_component(e, Position(2)), Ok(Some(Position(1))));
        assert_eq!(world.get_component::<Position>(e), Some(&Position(2)));

        world.get_component_mut::<Position>(e).unwrap().0 = 5;
        assert_eq!(world.remove_component::<Position>(e), Some(Position(5)));
        assert!(!world.has_component::<Position>(e));
    }

    #[test]
    fn test_destroy_removes_components_and_invalidates_id() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Position(1)).unwrap();
        world.add_component(e, Velocity(1)).unwrap();

        assert!(world.destroy_entity(e));
        assert!(!world.destroy_entity(e));
        assert!(!world.is_alive(e));
        assert_eq!(world.component_count::<Position>(), 0);
        assert_eq!(world.add_component(e, Tag), Err(EcsError::DeadEntity(e)));

        // the slot is reused with a new generation
        let reused = world.create_entity();
        assert_ne!(reused, e);
        assert!(world.get_component::<Position>(reused).is_none());
    }

    #[test]
    fn test_views_intersect() {
        let mut world = World::new();
        let mut both = Vec::new();
        for i in 0..10 {
            let e = world.create_entity();
            world.add_component(e, Position(i)).unwrap();
            if i % 3 == 0 {
                world.add_component(e, Velocity(i)).unwrap();
                both.push(e);
            }
            if i == 3 {
                world.add_component(e, Tag).unwrap();
            }
        }

        let view: Vec<Entity> = world.view2::<Position, Velocity>().into_iter().map(|(e, _, _)| e).collect();
        assert_eq!(view.len(), both.len());
        assert!(both.iter().all(|e| view.contains(e)));

        for (_, p, v) in world.view2::<Velocity, Position>() {
            assert_eq!(p.0, v.0);
        }

        let tagged = world.view3::<Position, Velocity, Tag>();
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].1, &Position(3));

        assert!(world.view2::<Position, String>().is_empty());
        assert_eq!(world.query::<Position>().len(), 10);
        assert_eq!(world.entity_count(), 10);
    }

    #[test]
    fn test_mismatched_table_reports_component_type() {
        let mut world = World::new();
        let entity = world.create_entity();
        world
            .tables
            .insert(TypeId::of::<Position>(), Box::new(SecondaryMap::<Entity, Velocity>::new()));

        let err = world.add_component(entity, Position(1)).unwrap_err();
        assert_eq!(err, EcsError::TableTypeMismatch(std::any::type_name::<Position>()));
        assert!(world.is_alive(entity));
    }

    impl Component for String {}
}
