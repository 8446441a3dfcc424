//! ECS World implementation
//!
//! Flat, id-keyed component storage. Each component type lives in its own
//! `HashMap<Entity, T>`; entities remember their creation order so queries are
//! deterministic.

use super::components::{ActiveComponent, HierarchyComponent, TransformComponent};
use super::{Component, Entity};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Type-erased view of one component map
trait ComponentStorage: Send + Sync {
    fn remove_entity(&mut self, entity: Entity);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ComponentStorage for HashMap<Entity, T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.remove(&entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// ECS World containing all entities and components
pub struct World {
    entities: Vec<Entity>,
    component_storages: HashMap<TypeId, Box<dyn ComponentStorage>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            component_storages: HashMap::new(),
        }
    }

    /// Create a new entity with an empty hierarchy record
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new();
        self.entities.push(entity);
        self.add_component(entity, HierarchyComponent::new());
        entity
    }

    /// Create a new entity with a hierarchy record and an identity transform
    pub fn spawn(&mut self) -> Entity {
        let entity = self.create_entity();
        self.add_component(entity, TransformComponent::new(entity));
        entity
    }

    /// Remove an entity and all of its components.
    ///
    /// Hierarchy edges pointing at the entity are not touched here; use
    /// [`crate::ecs::systems::HierarchySystem::despawn`] to keep them
    /// consistent.
    pub(crate) fn destroy_entity(&mut self, entity: Entity) -> bool {
        let before = self.entities.len();
        self.entities.retain(|&e| e != entity);
        for storage in self.component_storages.values_mut() {
            storage.remove_entity(entity);
        }
        self.entities.len() != before
    }

    /// Whether the entity exists
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get an iterator over all entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    fn storage<T: Component>(&self) -> Option<&HashMap<Entity, T>> {
        self.component_storages
            .get(&TypeId::of::<T>())
            .and_then(|s| s.as_any().downcast_ref::<HashMap<Entity, T>>())
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut HashMap<Entity, T>> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|s| s.as_any_mut().downcast_mut::<HashMap<Entity, T>>())
    }

    /// Add a component to an entity, returning the component it replaced.
    ///
    /// Components for entities that do not exist are dropped.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        if !self.contains(entity) {
            log::warn!("Ignoring {} for unknown entity {}", std::any::type_name::<T>(), entity);
            return None;
        }

        let storage = self
            .component_storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(HashMap::<Entity, T>::new()));

        storage
            .as_any_mut()
            .downcast_mut::<HashMap<Entity, T>>()
            .and_then(|map| map.insert(entity, component))
    }

    /// Remove a component from an entity
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>().and_then(|map| map.remove(&entity))
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>().and_then(|map| map.get(&entity))
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>().and_then(|map| map.get_mut(&entity))
    }

    /// Whether the entity has a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// All components of type `T`, in entity creation order
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        let Some(map) = self.storage::<T>() else {
            return Vec::new();
        };
        self.entities
            .iter()
            .filter_map(|e| map.get(e).map(|c| (*e, c)))
            .collect()
    }

    /// Entities that have a component of type `T`, in creation order
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        self.query::<T>().into_iter().map(|(e, _)| e).collect()
    }

    /// Whether the entity and every ancestor are self-active.
    ///
    /// Entities without an [`ActiveComponent`] count as active. The walk stops
    /// after `max_depth` ancestors and reports the entity as inactive, so a
    /// corrupted cyclic hierarchy cannot loop forever.
    pub fn is_active_in_hierarchy(&self, entity: Entity, max_depth: usize) -> bool {
        let mut current = Some(entity);
        let mut steps = 0;

        while let Some(e) = current {
            if steps > max_depth {
                log::warn!("Hierarchy above {} exceeds depth {}", entity, max_depth);
                return false;
            }
            if self.get_component::<ActiveComponent>(e).is_some_and(|a| !a.active) {
                return false;
            }
            current = self
                .get_component::<HierarchyComponent>(e)
                .and_then(HierarchyComponent::parent);
            steps += 1;
        }

        true
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
