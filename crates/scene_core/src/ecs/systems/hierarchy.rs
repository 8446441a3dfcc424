//! Hierarchy maintenance and world-matrix propagation
//!
//! The only code that edits [`HierarchyComponent`] edges. Every edit keeps
//! parent and child records mutually consistent and refuses edges that would
//! make an entity its own ancestor. All walks are bounded by `max_depth`.

use crate::ecs::components::{HierarchyComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::Mat4;
use thiserror::Error;

/// Default bound on ancestor chains and propagation depth
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Hierarchy errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// Entity does not exist or has no hierarchy record
    #[error("Unknown entity: {0}")]
    UnknownEntity(Entity),

    /// An entity cannot parent itself
    #[error("Entity {0} cannot be its own parent")]
    SelfParent(Entity),

    /// The requested edge would close a loop
    #[error("Attaching {child} under {parent} would create a cycle")]
    Cycle {
        /// Entity being attached
        child: Entity,
        /// Requested parent
        parent: Entity,
    },

    /// A walk went deeper than the configured bound
    #[error("Hierarchy depth exceeds {max_depth} at entity {entity}")]
    DepthExceeded {
        /// Entity where the bound was hit
        entity: Entity,
        /// Configured bound
        max_depth: usize,
    },
}

/// Keeps parent/children edges consistent and pushes world matrices down the tree
#[derive(Debug, Clone, Copy)]
pub struct HierarchySystem {
    max_depth: usize,
}

impl HierarchySystem {
    /// Create a hierarchy system with the given depth bound
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Depth bound used by every walk
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn record(world: &World, entity: Entity) -> Result<&HierarchyComponent, HierarchyError> {
        world
            .get_component::<HierarchyComponent>(entity)
            .ok_or(HierarchyError::UnknownEntity(entity))
    }

    fn record_mut(world: &mut World, entity: Entity) -> Result<&mut HierarchyComponent, HierarchyError> {
        world
            .get_component_mut::<HierarchyComponent>(entity)
            .ok_or(HierarchyError::UnknownEntity(entity))
    }

    /// Ancestors of `entity`, nearest first
    pub fn ancestors(&self, world: &World, entity: Entity) -> Result<Vec<Entity>, HierarchyError> {
        let mut chain = Vec::new();
        let mut current = Self::record(world, entity)?.parent();

        while let Some(parent) = current {
            if chain.len() >= self.max_depth {
                return Err(HierarchyError::DepthExceeded { entity, max_depth: self.max_depth });
            }
            chain.push(parent);
            current = Self::record(world, parent)?.parent();
        }

        Ok(chain)
    }

    /// Number of ancestors of `entity` (0 for roots)
    pub fn depth(&self, world: &World, entity: Entity) -> Result<usize, HierarchyError> {
        self.ancestors(world, entity).map(|chain| chain.len())
    }

    /// Levels below `entity` in its own subtree (0 for leaves)
    pub fn subtree_height(&self, world: &World, entity: Entity) -> Result<usize, HierarchyError> {
        let mut stack = vec![(entity, 0)];
        let mut height = 0;

        while let Some((current, level)) = stack.pop() {
            if level > self.max_depth {
                return Err(HierarchyError::DepthExceeded { entity: current, max_depth: self.max_depth });
            }
            height = height.max(level);
            stack.extend(Self::record(world, current)?.children().iter().map(|&c| (c, level + 1)));
        }

        Ok(height)
    }

    /// Entities with a hierarchy record and no parent, in creation order
    pub fn roots(world: &World) -> Vec<Entity> {
        world
            .query::<HierarchyComponent>()
            .into_iter()
            .filter(|(_, h)| h.is_root())
            .map(|(e, _)| e)
            .collect()
    }

    /// Make `child` a child of `parent`, detaching it from any previous parent.
    ///
    /// The child is appended to the end of the parent's children. Re-attaching
    /// to the current parent is a no-op. Edges that would push any node of the
    /// child's subtree deeper than `max_depth` are refused.
    pub fn attach(&self, world: &mut World, child: Entity, parent: Entity) -> Result<(), HierarchyError> {
        if child == parent {
            log::warn!("Refusing to parent {} to itself", child);
            return Err(HierarchyError::SelfParent(child));
        }

        let previous = Self::record(world, child)?.parent();
        Self::record(world, parent)?;

        if previous == Some(parent) {
            return Ok(());
        }
        let parent_chain = self.ancestors(world, parent)?;
        if parent_chain.contains(&child) {
            log::warn!("Refusing to attach {} under its descendant {}", child, parent);
            return Err(HierarchyError::Cycle { child, parent });
        }
        if parent_chain.len() + 1 + self.subtree_height(world, child)? > self.max_depth {
            log::warn!("Refusing to attach {} under {}: depth would exceed {}", child, parent, self.max_depth);
            return Err(HierarchyError::DepthExceeded { entity: child, max_depth: self.max_depth });
        }

        if let Some(old) = previous {
            Self::record_mut(world, old)?.remove_child(child);
        }
        Self::record_mut(world, parent)?.push_child(child);
        Self::record_mut(world, child)?.set_parent(Some(parent));

        log::debug!("Attached {} under {}", child, parent);
        Ok(())
    }

    /// Turn `child` into a root. Returns whether it had a parent.
    ///
    /// The child's parent matrix is reset to identity so its world matrix
    /// matches its local matrix straight away.
    pub fn detach(&self, world: &mut World, child: Entity) -> Result<bool, HierarchyError> {
        let Some(parent) = Self::record(world, child)?.parent() else {
            return Ok(false);
        };

        if let Ok(record) = Self::record_mut(world, parent) {
            record.remove_child(child);
        }
        Self::record_mut(world, child)?.set_parent(None);
        if let Some(transform) = world.get_component_mut::<TransformComponent>(child) {
            transform.set_parent_matrix(Mat4::identity());
        }

        log::debug!("Detached {} from {}", child, parent);
        Ok(true)
    }

    /// Remove an entity, detaching it from its parent and turning its
    /// children into roots.
    pub fn despawn(&self, world: &mut World, entity: Entity) -> Result<(), HierarchyError> {
        self.detach(world, entity)?;

        let children = Self::record_mut(world, entity)?.take_children();
        for child in children {
            if let Ok(record) = Self::record_mut(world, child) {
                record.set_parent(None);
            }
            if let Some(transform) = world.get_component_mut::<TransformComponent>(child) {
                transform.set_parent_matrix(Mat4::identity());
            }
        }

        world.destroy_entity(entity);
        log::debug!("Despawned {}", entity);
        Ok(())
    }

    /// Push world matrices from every root down to its descendants.
    ///
    /// Parents are always resolved before their children. Entities without a
    /// transform pass their parent's world matrix through unchanged. Returns
    /// the number of transforms visited.
    pub fn propagate(&self, world: &mut World) -> Result<usize, HierarchyError> {
        let mut stack: Vec<(Entity, Mat4, usize)> = Self::roots(world)
            .into_iter()
            .rev()
            .map(|root| (root, Mat4::identity(), 0))
            .collect();
        let mut visited = 0;

        while let Some((entity, parent_world, depth)) = stack.pop() {
            if depth > self.max_depth {
                return Err(HierarchyError::DepthExceeded { entity, max_depth: self.max_depth });
            }

            let world_matrix = match world.get_component_mut::<TransformComponent>(entity) {
                Some(transform) => {
                    transform.set_parent_matrix(parent_world);
                    visited += 1;
                    transform.world_matrix()
                }
                None => parent_world,
            };

            let Some(record) = world.get_component::<HierarchyComponent>(entity) else {
                log::warn!("Skipping missing child {} during propagation", entity);
                continue;
            };
            for &child in record.children().iter().rev() {
                stack.push((child, world_matrix, depth + 1));
            }
        }

        log::trace!("Propagated {} transforms", visited);
        Ok(visited)
    }
}

impl Default for HierarchySystem {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    fn children_of(world: &World, entity: Entity) -> Vec<Entity> {
        world
            .get_component::<HierarchyComponent>(entity)
            .map(|h| h.children().to_vec())
            .unwrap_or_default()
    }

    fn parent_of(world: &World, entity: Entity) -> Option<Entity> {
        world.get_component::<HierarchyComponent>(entity).and_then(HierarchyComponent::parent)
    }

    #[test]
    fn test_attach_links_both_sides() {
        let mut world = World::new();
        let system = HierarchySystem::default();
        let (parent, a, b) = (world.spawn(), world.spawn(), world.spawn());

        system.attach(&mut world, a, parent).unwrap();
        system.attach(&mut world, b, parent).unwrap();
        system.attach(&mut world, a, parent).unwrap();

        assert_eq!(children_of(&world, parent), vec![a, b]);
        assert_eq!(parent_of(&world, a), Some(parent));
        assert_eq!(parent_of(&world, b), Some(parent));
    }

    #[test]
    fn test_reparent_moves_child() {
        let mut world = World::new();
        let system = HierarchySystem::default();
        let (first, second, child) = (world.spawn(), world.spawn(), world.spawn());

        system.attach(&mut world, child, first).unwrap();
        system.attach(&mut world, child, second).unwrap();

        assert!(children_of(&world, first).is_empty());
        assert_eq!(children_of(&world, second), vec![child]);
        assert_eq!(parent_of(&world, child), Some(second));
    }

    #[test]
    fn test_attach_rejects_self_and_cycles() {
        let mut world = World::new();
        let system = HierarchySystem::default();
        let (a, b, c) = (world.spawn(), world.spawn(), world.spawn());
        system.attach(&mut world, b, a).unwrap();
        system.attach(&mut world, c, b).unwrap();

        assert_eq!(system.attach(&mut world, a, a), Err(HierarchyError::SelfParent(a)));
        assert_eq!(system.attach(&mut world, a, c), Err(HierarchyError::Cycle { child: a, parent: c }));

        // Rejected edits leave the tree untouched
        assert_eq!(parent_of(&world, a), None);
        assert_eq!(system.ancestors(&world, c).unwrap(), vec![b, a]);
    }

    #[test]
    fn test_attach_unknown_entity() {
        let mut world = World::new();
        let system = HierarchySystem::default();
        let a = world.spawn();
        let ghost = Entity::new();

        assert_eq!(system.attach(&mut world, a, ghost), Err(HierarchyError::UnknownEntity(ghost)));
        assert_eq!(system.attach(&mut world, ghost, a), Err(HierarchyError::UnknownEntity(ghost)));
    }

    #[test]
    fn test_attach_refuses_edge_past_depth_bound() {
        let mut world = World::new();
        let system = HierarchySystem::new(3);
        let chain: Vec<_> = (0..5).map(|_| world.spawn()).collect();
        for pair in chain[..4].windows(2) {
            system.attach(&mut world, pair[1], pair[0]).unwrap();
        }

        assert_eq!(
            system.attach(&mut world, chain[4], chain[3]),
            Err(HierarchyError::DepthExceeded { entity: chain[4], max_depth: 3 })
        );
        assert_eq!(parent_of(&world, chain[4]), None);
        assert!(children_of(&world, chain[3]).is_empty());
        assert_eq!(system.depth(&world, chain[3]).unwrap(), 3);
        assert_eq!(system.propagate(&mut world).unwrap(), 5);
    }

    #[test]
    fn test_attach_counts_height_of_moved_subtree() {
        let mut world = World::new();
        let system = HierarchySystem::new(3);
        let (root, middle) = (world.spawn(), world.spawn());
        let (branch, twig, leaf) = (world.spawn(), world.spawn(), world.spawn());
        system.attach(&mut world, middle, root).unwrap();
        system.attach(&mut world, twig, branch).unwrap();
        system.attach(&mut world, leaf, twig).unwrap();

        assert_eq!(system.subtree_height(&world, branch).unwrap(), 2);
        // leaf would land at depth 4
        assert!(matches!(
            system.attach(&mut world, branch, middle),
            Err(HierarchyError::DepthExceeded { max_depth: 3, .. })
        ));
        system.attach(&mut world, branch, root).unwrap();
        assert_eq!(system.depth(&world, leaf).unwrap(), 3);
    }

    #[test]
    fn test_ancestor_walk_is_bounded() {
        let mut world = World::new();
        let system = HierarchySystem::new(3);
        let chain: Vec<_> = (0..5).map(|_| world.spawn()).collect();
        // Built by hand, bypassing the checks in attach
        for pair in chain.windows(2) {
            if let Some(h) = world.get_component_mut::<HierarchyComponent>(pair[0]) {
                h.push_child(pair[1]);
            }
            if let Some(h) = world.get_component_mut::<HierarchyComponent>(pair[1]) {
                h.set_parent(Some(pair[0]));
            }
        }

        assert!(matches!(
            system.ancestors(&world, chain[4]),
            Err(HierarchyError::DepthExceeded { max_depth: 3, .. })
        ));
        assert!(matches!(system.propagate(&mut world), Err(HierarchyError::DepthExceeded { .. })));
    }

    #[test]
    fn test_detach_resets_parent_matrix() {
        let mut world = World::new();
        let system = HierarchySystem::default();
        let (parent, child) = (world.spawn(), world.spawn());
        world.get_component_mut::<TransformComponent>(parent).unwrap().set_local_position(Vec3::new(5.0, 0.0, 0.0));
        system.attach(&mut world, child, parent).unwrap();
        system.propagate(&mut world).unwrap();

        assert!(system.detach(&mut world, child).unwrap());
        assert!(!system.detach(&mut world, child).unwrap());

        let transform = world.get_component_mut::<TransformComponent>(child).unwrap();
        assert_eq!(transform.parent_matrix(), Mat4::identity());
        assert!(children_of(&world, parent).is_empty());
    }

    #[test]
    fn test_despawn_orphans_children() {
        let mut world = World::new();
        let system = HierarchySystem::default();
        let (root, middle, leaf) = (world.spawn(), world.spawn(), world.spawn());
        system.attach(&mut world, middle, root).unwrap();
        system.attach(&mut world, leaf, middle).unwrap();

        system.despawn(&mut world, middle).unwrap();

        assert!(!world.contains(middle));
        assert!(children_of(&world, root).is_empty());
        assert_eq!(parent_of(&world, leaf), None);
        assert_eq!(HierarchySystem::roots(&world), vec![root, leaf]);
    }

    #[test]
    fn test_propagate_composes_world_matrices() {
        let mut world = World::new();
        let system = HierarchySystem::default();
        let (root, middle, leaf) = (world.spawn(), world.spawn(), world.spawn());
        for (entity, x) in [(root, 1.0), (middle, 2.0), (leaf, 3.0)] {
            world.get_component_mut::<TransformComponent>(entity).unwrap().set_local_position(Vec3::new(x, 0.0, 0.0));
        }
        system.attach(&mut world, middle, root).unwrap();
        system.attach(&mut world, leaf, middle).unwrap();

        assert_eq!(system.propagate(&mut world).unwrap(), 3);

        let leaf_position = world.get_component_mut::<TransformComponent>(leaf).unwrap().world_position();
        assert_relative_eq!(leaf_position, Vec3::new(6.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_propagate_passes_through_transformless_nodes() {
        let mut world = World::new();
        let system = HierarchySystem::default();
        let root = world.spawn();
        let group = world.create_entity();
        let leaf = world.spawn();
        world.get_component_mut::<TransformComponent>(root).unwrap().set_local_position(Vec3::new(0.0, 4.0, 0.0));
        system.attach(&mut world, group, root).unwrap();
        system.attach(&mut world, leaf, group).unwrap();

        assert_eq!(system.propagate(&mut world).unwrap(), 2);

        let leaf_position = world.get_component_mut::<TransformComponent>(leaf).unwrap().world_position();
        assert_relative_eq!(leaf_position, Vec3::new(0.0, 4.0, 0.0), epsilon = 1e-5);
    }
}
