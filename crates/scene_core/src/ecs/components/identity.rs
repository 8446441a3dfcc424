//! Descriptive components: display name, tag and self-active flag

use crate::ecs::Component;

/// Display name of an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameComponent {
    /// The name
    pub name: String,
}

impl Component for NameComponent {}

impl NameComponent {
    /// Create a named component
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for NameComponent {
    fn default() -> Self {
        Self::new("Empty")
    }
}

/// Free-form tag used to group entities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagComponent {
    /// The tag
    pub tag: String,
}

impl Component for TagComponent {}

impl TagComponent {
    /// Create a tag component
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// Exact, case-sensitive tag comparison
    pub fn compare_tag(&self, tag: &str) -> bool {
        self.tag == tag
    }
}

/// Whether the entity itself is switched on.
///
/// An entity is active in the hierarchy only when it and all of its ancestors
/// are self-active; see [`crate::ecs::World::is_active_in_hierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveComponent {
    /// Self-active flag
    pub active: bool,
}

impl Component for ActiveComponent {}

impl ActiveComponent {
    /// Create an active flag
    pub fn new(active: bool) -> Self {
        Self { active }
    }
}

impl Default for ActiveComponent {
    fn default() -> Self {
        Self::new(true)
    }
}
