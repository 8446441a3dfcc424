//! ECS Systems module

pub mod hierarchy;

pub use hierarchy::{HierarchyError, HierarchySystem, DEFAULT_MAX_DEPTH};
