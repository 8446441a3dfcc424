//! Entity-Component-System implementation
//!
//! Entities are opaque ids; components live in flat id-keyed maps inside the
//! [`World`]; systems operate on the world from outside.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;
pub mod systems;

#[cfg(test)]
mod tests;

pub use world::World;
pub use entity::Entity;
pub use component::Component;
