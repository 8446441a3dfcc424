//! # Scene Core
//!
//! Scene-graph transforms with lazily cached matrices and camera
//! view-frustum culling.
//!
//! ## Features
//!
//! - **Transforms**: position/rotation/scale with dirty-flag matrix caching
//! - **Hierarchy**: id-keyed parent/child records with cycle-safe editing
//! - **Culling**: six-plane frustum and bounding-sphere visibility tests
//! - **Configuration**: TOML or RON files for engine, camera and scene settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_core::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut world = World::new();
//!     let camera = world.spawn();
//!     world.add_component(camera, CameraComponent::perspective(60.0, 0.1, 100.0));
//!
//!     let ship = world.spawn();
//!     world.add_component(ship, TransformComponent::new(ship).with_position(Vec3::new(0.0, 0.0, 10.0)));
//!     world.add_component(ship, RenderableComponent::new(Sphere::new(Vec3::zeros(), 1.0)));
//!
//!     let mut scene = SceneManager::new();
//!     scene.set_active_camera(camera);
//!     let result = scene.update(&mut world, 16.0 / 9.0)?;
//!     assert_eq!(result.visible, vec![ship]);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod scene;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{ApplicationConfig, CameraConfig, Config, ConfigError, EngineConfig, SceneConfig},
        ecs::{
            components::{
                ActiveComponent, CameraComponent, HierarchyComponent, NameComponent, RenderableComponent,
                TagComponent, TransformComponent,
            },
            systems::{HierarchyError, HierarchySystem},
            Component, Entity, World,
        },
        foundation::math::{Mat4, Quat, Vec3},
        scene::{CullResult, CullStats, Frustum, Plane, SceneError, SceneManager, Sphere},
    };
}
