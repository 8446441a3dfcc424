//! ECS Components module
//!
//! Concrete components keyed by entity id

pub mod transform;
pub mod hierarchy;
pub mod camera;
pub mod renderable;
pub mod identity;

pub use transform::TransformComponent;
pub use hierarchy::HierarchyComponent;
pub use camera::CameraComponent;
pub use renderable::RenderableComponent;
pub use identity::{ActiveComponent, NameComponent, TagComponent};
