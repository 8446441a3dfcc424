//! Camera component
//!
//! Projection parameters consumed by the frustum. The camera's pose is the
//! world pose of the [`TransformComponent`](super::TransformComponent) on the
//! same entity; it looks along the rotated +Z axis.

use crate::ecs::Component;
use crate::foundation::math::utils;

/// Perspective camera parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraComponent {
    /// Vertical field of view in radians
    pub fov: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Component for CameraComponent {}

impl CameraComponent {
    /// Create a perspective camera
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view in degrees (converted to radians internally)
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    ///
    /// Values are not validated; a degenerate camera yields a degenerate frustum.
    pub fn perspective(fov_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            fov: utils::deg_to_rad(fov_degrees),
            near,
            far,
        }
    }

    /// Vertical field of view in degrees
    pub fn fov_degrees(&self) -> f32 {
        utils::rad_to_deg(self.fov)
    }
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self::perspective(45.0, 0.1, 1000.0)
    }
}
