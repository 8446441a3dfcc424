//! Scene Manager - per-frame visibility driver
//!
//! Each [`SceneManager::update`]:
//! 1. Propagates world matrices down the hierarchy
//! 2. Rebuilds the frustum from the active camera's world pose
//! 3. Syncs world-space bounding spheres of drawable entities into the scene graph
//! 4. Queries the scene graph for the visible set

use super::frustum::Frustum;
use super::scene_graph::{SceneGraph, SimpleListGraph};
use crate::config::SceneConfig;
use crate::ecs::components::{CameraComponent, RenderableComponent, TransformComponent};
use crate::ecs::systems::{HierarchyError, HierarchySystem};
use crate::ecs::{Entity, World};
use std::collections::HashSet;

/// Errors raised while updating the scene
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// `update` was called before a camera was chosen
    #[error("No active camera set")]
    NoActiveCamera,

    /// An entity lacks a component the scene manager needs
    #[error("Entity {entity} has no {component}")]
    MissingComponent {
        /// Entity that was queried
        entity: Entity,
        /// Name of the missing component type
        component: &'static str,
    },

    /// Transform propagation failed
    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),
}

/// Culling statistics for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    /// Drawable entities considered this frame
    pub tested: usize,
    /// Entities that passed the frustum test
    pub visible: usize,
    /// Entities rejected by the frustum test
    pub culled: usize,
}

/// Result of one scene update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CullResult {
    /// Entities to draw this frame, in entity creation order
    pub visible: Vec<Entity>,
    /// Counters for this frame
    pub stats: CullStats,
}

/// Scene Manager - coordinates hierarchy propagation, the scene graph and culling
pub struct SceneManager {
    config: SceneConfig,
    hierarchy: HierarchySystem,
    scene_graph: Box<dyn SceneGraph>,
    tracked: HashSet<Entity>,
    frustum: Frustum,
    active_camera: Option<Entity>,
    last_stats: CullStats,
}

impl SceneManager {
    /// Create a new scene manager with default configuration
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create a scene manager with custom configuration
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            config,
            hierarchy: HierarchySystem::new(config.max_hierarchy_depth),
            scene_graph: Box::new(SimpleListGraph::new()),
            tracked: HashSet::new(),
            frustum: Frustum::default(),
            active_camera: None,
            last_stats: CullStats::default(),
        }
    }

    /// Set the active camera entity for culling
    pub fn set_active_camera(&mut self, camera_entity: Entity) {
        self.active_camera = Some(camera_entity);
    }

    /// Active camera entity, if any
    pub fn active_camera(&self) -> Option<Entity> {
        self.active_camera
    }

    /// Current configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Hierarchy system using the configured depth bound
    pub fn hierarchy(&self) -> &HierarchySystem {
        &self.hierarchy
    }

    /// Frustum from the most recent update
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Statistics from the most recent update
    pub fn last_stats(&self) -> CullStats {
        self.last_stats
    }

    /// Run one frame of transform propagation and culling.
    ///
    /// Renderables that are hidden or inactive in the hierarchy are not
    /// tested. Renderables without a transform use their bounding sphere as
    /// it is.
    pub fn update(&mut self, world: &mut World, aspect: f32) -> Result<CullResult, SceneError> {
        self.hierarchy.propagate(world)?;
        self.rebuild_frustum(world, aspect)?;
        let candidates = self.sync_scene_graph(world);

        let visible = if self.config.enable_culling {
            let hits: HashSet<Entity> = self.scene_graph.query_visible(&self.frustum).into_iter().collect();
            candidates.into_iter().filter(|e| hits.contains(e)).collect()
        } else {
            candidates
        };

        let stats = CullStats {
            tested: self.tracked.len(),
            visible: visible.len(),
            culled: self.tracked.len() - visible.len(),
        };
        self.last_stats = stats;
        log::debug!(
            "Culling: {} tested, {} visible, {} culled",
            stats.tested,
            stats.visible,
            stats.culled
        );

        Ok(CullResult { visible, stats })
    }

    fn rebuild_frustum(&mut self, world: &mut World, aspect: f32) -> Result<(), SceneError> {
        let camera_entity = self.active_camera.ok_or(SceneError::NoActiveCamera)?;

        let camera = *world
            .get_component::<CameraComponent>(camera_entity)
            .ok_or(SceneError::MissingComponent {
                entity: camera_entity,
                component: "CameraComponent",
            })?;

        let transform = world
            .get_component_mut::<TransformComponent>(camera_entity)
            .ok_or(SceneError::MissingComponent {
                entity: camera_entity,
                component: "TransformComponent",
            })?;

        let position = transform.world_position();
        let rotation = transform.world_rotation();
        self.frustum.calculate(&camera, aspect, position, &rotation);
        Ok(())
    }

    /// Push current world-space bounds into the scene graph and drop entries
    /// that are no longer drawable. Returns the drawable entities.
    fn sync_scene_graph(&mut self, world: &mut World) -> Vec<Entity> {
        let max_depth = self.hierarchy.max_depth();
        let mut drawable = Vec::new();

        for entity in world.entities_with::<RenderableComponent>() {
            let Some(renderable) = world.get_component::<RenderableComponent>(entity).copied() else {
                continue;
            };
            if !renderable.should_render() || !world.is_active_in_hierarchy(entity, max_depth) {
                continue;
            }

            let bounds = match world.get_component_mut::<TransformComponent>(entity) {
                Some(transform) => renderable.bounding_sphere.transformed(&transform.world_matrix()),
                None => renderable.bounding_sphere,
            };
            self.scene_graph.update(entity, bounds);
            drawable.push(entity);
        }

        let current: HashSet<Entity> = drawable.iter().copied().collect();
        for stale in self.tracked.difference(&current) {
            self.scene_graph.remove(*stale);
        }
        self.tracked = current;

        drawable
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}
