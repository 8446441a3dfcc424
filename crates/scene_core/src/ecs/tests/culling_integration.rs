//! Integration tests for culling scene trees through the scene manager
//!
//! Renderables hang off moving parents; visibility must follow the
//! propagated world transforms rather than the local ones.

use crate::config::SceneConfig;
use crate::ecs::components::{ActiveComponent, CameraComponent, RenderableComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec3;
use crate::scene::{SceneManager, Sphere};

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_scene() -> (World, SceneManager) {
        let mut world = World::new();
        let camera = world.spawn();
        world.add_component(camera, CameraComponent::perspective(90.0, 0.1, 10.0));

        let mut manager = SceneManager::with_config(SceneConfig::default());
        manager.set_active_camera(camera);
        (world, manager)
    }

    fn renderable_at(world: &mut World, position: Vec3, radius: f32) -> Entity {
        let entity = world.spawn();
        world.add_component(entity, TransformComponent::new(entity).with_position(position));
        world.add_component(entity, RenderableComponent::new(Sphere::new(Vec3::zeros(), radius)));
        entity
    }

    #[test]
    fn test_child_visible_through_parent_offset() {
        let (mut world, mut manager) = camera_scene();
        let group = renderable_at(&mut world, Vec3::new(0.0, 0.0, 20.0), 1.0);
        let member = renderable_at(&mut world, Vec3::new(0.0, 0.0, -15.0), 1.0);
        manager.hierarchy().attach(&mut world, member, group).unwrap();

        // The group sits past the far plane, its member lands 5 units ahead
        let result = manager.update(&mut world, 1.0).unwrap();
        assert_eq!(result.visible, vec![member]);

        manager.hierarchy().detach(&mut world, member).unwrap();
        let result = manager.update(&mut world, 1.0).unwrap();
        assert!(result.visible.is_empty());
        assert_eq!(result.stats.culled, 2);
    }

    #[test]
    fn test_parent_scale_grows_child_bounds() {
        let (mut world, mut manager) = camera_scene();
        let parent = world.spawn();
        world.add_component(parent, TransformComponent::new(parent).with_uniform_scale(2.0));
        let child = renderable_at(&mut world, Vec3::new(0.0, 0.0, -0.75), 1.0);
        manager.hierarchy().attach(&mut world, child, parent).unwrap();

        // World center (0,0,-1.5): a unit sphere would miss the near plane,
        // the doubled radius reaches past it
        let result = manager.update(&mut world, 1.0).unwrap();
        assert_eq!(result.visible, vec![child]);

        if let Some(t) = world.get_component_mut::<TransformComponent>(parent) {
            t.set_local_scale(Vec3::new(1.0, 1.0, 1.0));
            t.set_local_position(Vec3::new(0.0, 0.0, -0.75));
        }
        assert!(manager.update(&mut world, 1.0).unwrap().visible.is_empty());
    }

    #[test]
    fn test_inactive_parent_hides_subtree() {
        let (mut world, mut manager) = camera_scene();
        let parent = renderable_at(&mut world, Vec3::new(0.0, 0.0, 5.0), 1.0);
        let child = renderable_at(&mut world, Vec3::new(1.0, 0.0, 0.0), 0.5);
        manager.hierarchy().attach(&mut world, child, parent).unwrap();
        assert_eq!(manager.update(&mut world, 1.0).unwrap().visible, vec![parent, child]);

        world.add_component(parent, ActiveComponent::new(false));
        let result = manager.update(&mut world, 1.0).unwrap();

        assert!(result.visible.is_empty());
        assert_eq!(result.stats.tested, 0);
    }

    #[test]
    fn test_camera_child_of_moving_rig() {
        let (mut world, mut manager) = camera_scene();
        let camera = manager.active_camera().unwrap();
        let rig = world.spawn();
        manager.hierarchy().attach(&mut world, camera, rig).unwrap();
        let target = renderable_at(&mut world, Vec3::new(0.0, 0.0, 25.0), 1.0);

        assert!(manager.update(&mut world, 1.0).unwrap().visible.is_empty());

        // Moving the rig carries the camera within range of the target
        if let Some(t) = world.get_component_mut::<TransformComponent>(rig) {
            t.set_local_position(Vec3::new(0.0, 0.0, 20.0));
        }
        assert_eq!(manager.update(&mut world, 1.0).unwrap().visible, vec![target]);
    }
}
