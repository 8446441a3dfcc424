//! Hierarchy component
//!
//! Pure relational record: an optional parent and an ordered, duplicate-free
//! list of children, both stored as entity ids. The record never points at
//! another component, so there is no ownership cycle between parents and
//! children.
//!
//! The record does not enforce consistency or acyclicity. Edges are only
//! changed through [`crate::ecs::systems::HierarchySystem`], which keeps
//! `A lists B as a child` and `B's parent is A` in step and refuses cycles.

use crate::ecs::{Component, Entity};

/// Parent/children edges of one entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyComponent {
    parent: Option<Entity>,
    children: Vec<Entity>,
}

impl Component for HierarchyComponent {}

impl HierarchyComponent {
    /// Create a root record with no children
    pub fn new() -> Self {
        Self::default()
    }

    /// Parent entity, if any
    pub fn parent(&self) -> Option<Entity> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[Entity] {
        &self.children
    }

    /// Whether this entity has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether `child` is listed as a direct child
    pub fn has_child(&self, child: Entity) -> bool {
        self.children.contains(&child)
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Entity>) {
        self.parent = parent;
    }

    /// Append `child` unless already present; returns whether it was added
    pub(crate) fn push_child(&mut self, child: Entity) -> bool {
        if self.has_child(child) {
            return false;
        }
        self.children.push(child);
        true
    }

    /// Remove `child` keeping the order of the others
    pub(crate) fn remove_child(&mut self, child: Entity) -> bool {
        let before = self.children.len();
        self.children.retain(|&c| c != child);
        self.children.len() != before
    }

    pub(crate) fn take_children(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.children)
    }
}
