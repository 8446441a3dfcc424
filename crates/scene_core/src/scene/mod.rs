//! Scene management
//!
//! Bounding volumes, the camera frustum, the scene graph holding world-space
//! bounds, and the scene manager that ties them to the ECS world each frame.

pub mod frustum;
pub mod geometry;
pub mod scene_graph;
pub mod scene_manager;

pub use frustum::Frustum;
pub use geometry::{Plane, Sphere};
pub use scene_graph::{SceneGraph, SimpleListGraph};
pub use scene_manager::{CullResult, CullStats, SceneError, SceneManager};
