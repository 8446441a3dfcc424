//! Headless culling demo
//!
//! Scatters renderables around a camera, hangs a small orbiting group off a
//! parent entity, then turns the camera for a number of frames and logs how
//! many objects survive frustum culling each frame.
//!
//! Usage: `cull_demo [config.toml|config.ron] [frames]`

use rand::Rng;
use scene_core::foundation::logging;
use scene_core::foundation::math::{constants, Quat, Vec3};
use scene_core::prelude::*;

const GRID_SIZE: i32 = 8;
const GRID_SPACING: f32 = 12.0;
const ORBIT_MEMBERS: usize = 6;
const DEFAULT_FRAMES: usize = 36;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Invalid frame count '{0}'")]
    FrameCount(String),
}

struct DemoScene {
    world: World,
    scene: SceneManager,
    camera: Entity,
    orbit: Entity,
    aspect: f32,
}

impl DemoScene {
    fn build(config: &ApplicationConfig) -> Result<Self, DemoError> {
        let mut world = World::new();
        let mut scene = SceneManager::with_config(config.scene);
        let mut rng = rand::thread_rng();

        // Rock mesh is a unit cube; moons are a body plus a smaller cap
        let rock_bounds = Sphere::from_points(&cube_corners()).unwrap_or(Sphere::new(Vec3::zeros(), 1.0));
        let moon_bounds = Sphere::merge(&[
            Sphere::new(Vec3::zeros(), 0.75),
            Sphere::new(Vec3::new(0.0, 0.6, 0.0), 0.4),
        ])
        .unwrap_or(Sphere::new(Vec3::zeros(), 0.75));

        let camera = world.spawn();
        world.add_component(camera, config.camera.to_camera());
        world.add_component(camera, NameComponent::new("camera"));
        scene.set_active_camera(camera);

        let half = GRID_SIZE as f32 * GRID_SPACING * 0.5;
        for x in 0..GRID_SIZE {
            for z in 0..GRID_SIZE {
                let jitter = Vec3::new(rng.gen_range(-2.0..2.0), rng.gen_range(-4.0..4.0), rng.gen_range(-2.0..2.0));
                let position = Vec3::new(x as f32 * GRID_SPACING - half, 0.0, z as f32 * GRID_SPACING - half) + jitter;

                let rock = world.spawn();
                world.add_component(
                    rock,
                    TransformComponent::new(rock)
                        .with_position(position)
                        .with_uniform_scale(rng.gen_range(0.5..3.0)),
                );
                world.add_component(rock, RenderableComponent::new(rock_bounds));
                world.add_component(rock, TagComponent::new("rock"));
            }
        }

        let orbit = world.spawn();
        world.add_component(orbit, TransformComponent::new(orbit).with_position(Vec3::new(0.0, 0.0, 30.0)));
        world.add_component(orbit, NameComponent::new("orbit"));
        for i in 0..ORBIT_MEMBERS {
            let angle = i as f32 / ORBIT_MEMBERS as f32 * 2.0 * constants::PI;
            let moon = world.spawn();
            world.add_component(
                moon,
                TransformComponent::new(moon).with_position(Vec3::new(angle.cos() * 6.0, 0.0, angle.sin() * 6.0)),
            );
            world.add_component(moon, RenderableComponent::new(moon_bounds));
            world.add_component(moon, TagComponent::new("moon"));
            scene.hierarchy().attach(&mut world, moon, orbit)?;
        }

        log::info!(
            "Built scene with {} entities ({} renderables)",
            world.entity_count(),
            world.entities_with::<RenderableComponent>().len()
        );

        Ok(Self {
            world,
            scene,
            camera,
            orbit,
            aspect: config.camera.aspect,
        })
    }

    fn step(&mut self, frame: usize, frames: usize) -> Result<CullResult, DemoError> {
        let turn = frame as f32 / frames as f32 * 2.0 * constants::PI;

        if let Some(camera) = self.world.get_component_mut::<TransformComponent>(self.camera) {
            camera.set_local_rotation(Quat::from_axis_angle(&Vec3::y_axis(), turn));
        }
        if let Some(orbit) = self.world.get_component_mut::<TransformComponent>(self.orbit) {
            orbit.set_local_rotation(Quat::from_axis_angle(&Vec3::y_axis(), -2.0 * turn));
        }

        Ok(self.scene.update(&mut self.world, self.aspect)?)
    }
}

fn cube_corners() -> Vec<Vec3> {
    (0..8)
        .map(|i| {
            let pick = |bit: i32| if i & bit == 0 { -0.5 } else { 0.5 };
            Vec3::new(pick(1), pick(2), pick(4))
        })
        .collect()
}

fn load_config(path: Option<&String>) -> Result<ApplicationConfig, DemoError> {
    match path {
        Some(path) => Ok(ApplicationConfig::load_validated(path)?),
        None => Ok(ApplicationConfig::default()),
    }
}

fn run() -> Result<(), DemoError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first())?;
    let frames = match args.get(1) {
        Some(raw) => raw.parse::<usize>().ok().filter(|&n| n > 0).ok_or_else(|| DemoError::FrameCount(raw.clone()))?,
        None => DEFAULT_FRAMES,
    };

    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting cull demo ({} frames, culling {})", frames, config.scene.enable_culling);

    let mut demo = DemoScene::build(&config)?;
    let mut total_visible = 0;

    for frame in 0..frames {
        let result = demo.step(frame, frames)?;
        total_visible += result.stats.visible;

        if config.engine.debug_mode {
            let moons = result
                .visible
                .iter()
                .filter(|e| {
                    demo.world
                        .get_component::<TagComponent>(**e)
                        .is_some_and(|t| t.compare_tag("moon"))
                })
                .count();
            log::info!(
                "Frame {:3}: {:3} visible / {:3} tested ({} moons)",
                frame,
                result.stats.visible,
                result.stats.tested,
                moons
            );
        } else {
            log::info!("Frame {:3}: {:3} visible / {:3} tested", frame, result.stats.visible, result.stats.tested);
        }
    }

    log::info!("Average visible per frame: {:.1}", total_visible as f32 / frames as f32);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("cull_demo failed: {e}");
        std::process::exit(1);
    }
}
