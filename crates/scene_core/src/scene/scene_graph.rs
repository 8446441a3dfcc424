//! Scene graph trait and implementations
//!
//! Spatial containers holding world-space bounding spheres per entity. Only a
//! brute-force list is provided; every query tests every entry.

use super::frustum::Frustum;
use super::geometry::Sphere;
use crate::ecs::Entity;

/// Trait for spatial data structures used in scene management
///
/// Allows replacing the brute-force list with a hierarchical structure later
/// without touching the scene manager.
pub trait SceneGraph: Send + Sync {
    /// Add an entity to the scene graph with its world-space bounds
    fn add(&mut self, entity: Entity, bounds: Sphere);

    /// Remove an entity from the scene graph
    fn remove(&mut self, entity: Entity);

    /// Update an entity's bounds, adding the entity if it is not present
    fn update(&mut self, entity: Entity, bounds: Sphere);

    /// Query all entities whose bounds may be inside the frustum
    fn query_visible(&self, frustum: &Frustum) -> Vec<Entity>;

    /// Get the total number of entities in the scene graph
    fn entity_count(&self) -> usize;

    /// Clear all entities from the scene graph
    fn clear(&mut self);
}

/// List-based scene graph with linear queries
#[derive(Debug, Default)]
pub struct SimpleListGraph {
    entities: Vec<(Entity, Sphere)>,
}

impl SimpleListGraph {
    /// Create a new empty scene graph
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneGraph for SimpleListGraph {
    fn add(&mut self, entity: Entity, bounds: Sphere) {
        self.entities.push((entity, bounds));
    }

    fn remove(&mut self, entity: Entity) {
        self.entities.retain(|(e, _)| *e != entity);
    }

    fn update(&mut self, entity: Entity, bounds: Sphere) {
        match self.entities.iter_mut().find(|(e, _)| *e == entity) {
            Some(entry) => entry.1 = bounds,
            None => self.add(entity, bounds),
        }
    }

    fn query_visible(&self, frustum: &Frustum) -> Vec<Entity> {
        self.entities
            .iter()
            .filter(|(_, bounds)| frustum.is_sphere_in_frustum(bounds))
            .map(|(entity, _)| *entity)
            .collect()
    }

    fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn clear(&mut self) {
        self.entities.clear();
    }
}
