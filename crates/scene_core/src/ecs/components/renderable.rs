//! Renderable component for entities that can be drawn
//!
//! Carries the local-space bounding sphere produced by the mesh/model loader.
//! The scene manager moves it into world space with the entity's transform
//! and tests it against the camera frustum every frame.

use crate::ecs::Component;
use crate::scene::Sphere;

/// Component for entities that take part in visibility culling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderableComponent {
    /// Bounding sphere in the entity's local space
    pub bounding_sphere: Sphere,

    /// Whether this object should be drawn at all
    pub visible: bool,
}

impl Component for RenderableComponent {}

impl RenderableComponent {
    /// Create a new renderable component
    pub fn new(bounding_sphere: Sphere) -> Self {
        Self {
            bounding_sphere,
            visible: true,
        }
    }

    /// Set visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Check if this component should be considered for drawing
    pub fn should_render(&self) -> bool {
        self.visible
    }
}
