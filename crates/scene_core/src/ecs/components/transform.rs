//! Transform component for the ECS system
//!
//! Holds an entity's local pose together with cached local and world matrices.
//! Pose setters only mark the cache stale; the matrices are rebuilt lazily by
//! [`TransformComponent::resolve`], which every derived accessor calls first.
//! Setting several pose fields in one frame therefore costs a single rebuild.
//!
//! Accessors take `&mut self` because a read may have to refresh the cache.
//! A transform must not be mutated from more than one thread at a time; world
//! matrix propagation is ordered parent-before-children by the hierarchy system.

use crate::ecs::{Component, Entity};
use crate::foundation::math::{axis, compose_trs, decompose_trs, extract_translation, Mat4, Quat, Vec3};

/// ECS Transform component
///
/// Local pose (position, rotation, non-uniform scale) plus cached matrices:
/// `local = T * R * S` and `world = parent * local`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    entity: Entity,

    position: Vec3,
    rotation: Quat,
    scale: Vec3,

    parent_matrix: Mat4,
    local_matrix: Mat4,
    world_matrix: Mat4,

    dirty: bool,
    rebuild_count: u64,
}

impl Component for TransformComponent {}

impl TransformComponent {
    /// Create an identity transform bound to `entity`
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            parent_matrix: Mat4::identity(),
            local_matrix: Mat4::identity(),
            world_matrix: Mat4::identity(),
            dirty: false,
            rebuild_count: 0,
        }
    }

    /// Entity this transform belongs to
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_local_position(position);
        self
    }

    /// Builder pattern: Set rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.set_local_rotation(rotation);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_local_scale(scale);
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::new(scale, scale, scale))
    }

    // ------------------------------------------------------------------
    // Pose setters
    // ------------------------------------------------------------------

    /// Overwrite the local position
    pub fn set_local_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    /// Overwrite the local rotation.
    ///
    /// The quaternion is stored as given; it is not renormalized.
    pub fn set_local_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.dirty = true;
    }

    /// Overwrite the local scale
    pub fn set_local_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Assign the parent's current world matrix.
    ///
    /// Pending pose changes are folded into the local matrix first, then the
    /// world matrix is recombined directly. The transform is clean afterwards.
    pub fn set_parent_matrix(&mut self, parent_matrix: Mat4) {
        self.resolve();
        self.parent_matrix = parent_matrix;
        self.world_matrix = parent_matrix * self.local_matrix;
    }

    /// Overwrite the local matrix directly.
    ///
    /// The matrix is kept exactly as given and decomposed back into position,
    /// rotation and scale so later pose reads agree with it. Shear cannot be
    /// represented by the pose and is lost on the next pose-driven rebuild.
    pub fn set_local_matrix(&mut self, local_matrix: Mat4) {
        self.local_matrix = local_matrix;
        self.world_matrix = self.parent_matrix * local_matrix;

        let (position, rotation, scale) = decompose_trs(&local_matrix);
        self.position = position;
        self.rotation = rotation;
        self.scale = scale;
        self.dirty = false;
    }

    // ------------------------------------------------------------------
    // Cache
    // ------------------------------------------------------------------

    /// Rebuild the cached matrices if the pose changed since the last rebuild
    pub fn resolve(&mut self) {
        if !self.dirty {
            return;
        }

        self.local_matrix = compose_trs(&self.position, &self.rotation, &self.scale);
        self.world_matrix = self.parent_matrix * self.local_matrix;
        self.dirty = false;
        self.rebuild_count += 1;

        log::trace!("Rebuilt matrices for entity {}", self.entity);
    }

    /// Whether pose fields changed since the cached matrices were built
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of lazy matrix rebuilds performed so far
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    // ------------------------------------------------------------------
    // Local reads
    // ------------------------------------------------------------------

    /// Local position
    pub fn local_position(&mut self) -> Vec3 {
        self.resolve();
        self.position
    }

    /// Local rotation
    pub fn local_rotation(&mut self) -> Quat {
        self.resolve();
        self.rotation
    }

    /// Local scale
    pub fn local_scale(&mut self) -> Vec3 {
        self.resolve();
        self.scale
    }

    /// Local matrix (`T * R * S`)
    pub fn local_matrix(&mut self) -> Mat4 {
        self.resolve();
        self.local_matrix
    }

    /// Parent world matrix last assigned to this transform
    pub fn parent_matrix(&mut self) -> Mat4 {
        self.resolve();
        self.parent_matrix
    }

    /// World matrix (`parent * local`)
    pub fn world_matrix(&mut self) -> Mat4 {
        self.resolve();
        self.world_matrix
    }

    // ------------------------------------------------------------------
    // World reads
    // ------------------------------------------------------------------

    /// Translation of the world matrix
    pub fn world_position(&mut self) -> Vec3 {
        self.resolve();
        extract_translation(&self.world_matrix)
    }

    /// Rotation of the world matrix with scale removed
    pub fn world_rotation(&mut self) -> Quat {
        self.resolve();
        decompose_trs(&self.world_matrix).1
    }

    /// Per-axis scale of the world matrix
    pub fn world_scale(&mut self) -> Vec3 {
        self.resolve();
        decompose_trs(&self.world_matrix).2
    }

    // ------------------------------------------------------------------
    // Directions
    // ------------------------------------------------------------------

    /// Forward (+Z) rotated by the local rotation
    pub fn local_forward(&mut self) -> Vec3 {
        self.local_rotation() * axis::forward()
    }

    /// Up (+Y) rotated by the local rotation
    pub fn local_up(&mut self) -> Vec3 {
        self.local_rotation() * axis::up()
    }

    /// Right (+X) rotated by the local rotation
    pub fn local_right(&mut self) -> Vec3 {
        self.local_rotation() * axis::right()
    }

    /// Forward (+Z) rotated by the world rotation
    pub fn world_forward(&mut self) -> Vec3 {
        self.world_rotation() * axis::forward()
    }

    /// Up (+Y) rotated by the world rotation
    pub fn world_up(&mut self) -> Vec3 {
        self.world_rotation() * axis::up()
    }

    /// Right (+X) rotated by the world rotation
    pub fn world_right(&mut self) -> Vec3 {
        self.world_rotation() * axis::right()
    }
}
