//! Minimal 2D rigid-body world that hosts fluids.
//!
//! # Architecture
//!
//! The pipeline runs in a fixed timestep loop:
//!
//! 1. Apply forces (gravity)
//! 2. Sensor overlap detection (AABB broadphase, clipping narrowphase)
//! 3. User hook: overlap events and a [`FluidHost`](crate::FluidHost) view,
//!    where fluids add their forces
//! 4. Integrate velocities
//! 5. Integrate positions
//! 6. Clear force accumulators
//!
//! There is no contact solver: solid-solid collisions are left to a real
//! engine. Sensors only report overlaps.

pub mod broadphase;
pub mod contact;
pub mod rigid_body;

use glam::Vec2;
use tracing::trace;

use crate::ecs::host::EcsHost;

use self::broadphase::SensorBroadphase;
use self::contact::OverlapCache;

pub use self::contact::OverlapEvent;

/// Configuration for the physics simulation.
#[derive(Debug, Clone)]
pub struct PhysicsConfig2d {
    /// Gravity vector. Default: (0, -10).
    pub gravity: Vec2,
    /// Fixed timestep for physics updates in seconds. Default: 1/60.
    pub fixed_timestep: f64,
    /// Maximum number of sub-steps per frame. Default: 4.
    pub max_substeps: u32,
}

impl Default for PhysicsConfig2d {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -10.0),
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 4,
        }
    }
}

/// The physics world managing simulation state.
pub struct PhysicsWorld2d {
    config: PhysicsConfig2d,
    accumulator: f64,
    broadphase: SensorBroadphase,
    overlaps: OverlapCache,
}

impl PhysicsWorld2d {
    /// Create a new physics world with the given configuration.
    pub fn new(config: PhysicsConfig2d) -> Self {
        Self {
            config,
            accumulator: 0.0,
            broadphase: SensorBroadphase::new(),
            overlaps: OverlapCache::new(),
        }
    }

    pub fn config(&self) -> &PhysicsConfig2d {
        &self.config
    }

    /// Sensor pairs overlapping after the last fixed step.
    pub fn overlaps(&self) -> &OverlapCache {
        &self.overlaps
    }

    /// Step the simulation forward by `delta_time` seconds.
    ///
    /// Uses a fixed timestep accumulator; `hook` runs once per fixed step
    /// with that step's `dt`. Returns the number of fixed steps taken.
    pub fn step<F>(&mut self, world: &mut hecs::World, delta_time: f64, mut hook: F) -> u32
    where
        F: FnMut(&mut EcsHost<'_>, &[OverlapEvent], f32),
    {
        self.accumulator += delta_time;

        let mut substeps = 0u32;
        while self.accumulator >= self.config.fixed_timestep && substeps < self.config.max_substeps
        {
            self.fixed_step(world, self.config.fixed_timestep as f32, &mut hook);
            self.accumulator -= self.config.fixed_timestep;
            substeps += 1;
        }

        // Clamp accumulator to avoid spiral of death
        if self.accumulator > self.config.fixed_timestep * self.config.max_substeps as f64 {
            self.accumulator = 0.0;
        }
        substeps
    }

    fn fixed_step<F>(&mut self, world: &mut hecs::World, dt: f32, hook: &mut F)
    where
        F: FnMut(&mut EcsHost<'_>, &[OverlapEvent], f32),
    {
        // 1. Apply forces (gravity)
        rigid_body::apply_gravity(world, self.config.gravity);

        // 2. Sensor overlaps, diffed against the previous step
        let events = self.overlaps.update(self.broadphase.find_overlaps(world));
        if !events.is_empty() {
            trace!("{} overlap events", events.len());
        }

        // 3. Fluids and other force generators
        {
            let mut host = EcsHost::new(world, self.config.gravity);
            hook(&mut host, &events, dt);
        }

        // 4. Integrate velocities
        rigid_body::integrate_velocities(world, dt);

        // 5. Integrate positions
        rigid_body::integrate_positions(world, dt);

        // 6. Clear force accumulators
        rigid_body::clear_forces(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::physics::{Collider2d, RigidBody2d};
    use crate::ecs::host::spawn_fluid;
    use crate::fluid::FluidConfig;
    use crate::geometry::{FixtureShape, Transform2d};

    fn spawn_box(world: &mut hecs::World, position: Vec2, mass: f32) -> hecs::Entity {
        let half = Vec2::splat(0.5);
        world.spawn((
            Transform2d::from_position(position),
            RigidBody2d::new_dynamic_box(mass, half),
            Collider2d::new(FixtureShape::rectangle(half)),
        ))
    }

    #[test]
    fn test_physics_world_free_fall() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld2d::new(PhysicsConfig2d::default());
        let entity = spawn_box(&mut world, Vec2::new(0.0, 10.0), 1.0);

        // Simulate ~1 second
        let mut steps = 0;
        for _ in 0..60 {
            steps += physics.step(&mut world, 1.0 / 60.0, |_, events, _| {
                assert!(events.is_empty());
            });
        }
        assert!(steps >= 59, "Fixed steps taken: {}", steps);

        let transform = world.get::<&Transform2d>(entity).unwrap();
        assert!(
            transform.position.y < 10.0,
            "Body should have fallen: y = {}",
            transform.position.y
        );
    }

    #[test]
    fn test_overlap_events() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld2d::new(PhysicsConfig2d {
            gravity: Vec2::ZERO,
            ..PhysicsConfig2d::default()
        });
        let water = world.spawn((
            Transform2d::identity(),
            RigidBody2d::new_static(),
            Collider2d::sensor(FixtureShape::rectangle(Vec2::new(2.0, 1.0))),
        ));
        let ball = spawn_box(&mut world, Vec2::new(0.0, 1.2), 1.0);

        let mut seen = Vec::new();
        physics.step(&mut world, 1.0 / 60.0, |_, events, _| seen.extend_from_slice(events));
        assert_eq!(seen.len(), 1);
        assert!(matches!(seen[0], OverlapEvent::Begin(..)));
        assert!(physics.overlaps().contains(water, ball));

        world.get::<&mut Transform2d>(ball).unwrap().position.y = 5.0;
        seen.clear();
        physics.step(&mut world, 1.0 / 60.0, |_, events, _| seen.extend_from_slice(events));
        assert_eq!(seen.len(), 1);
        assert!(matches!(seen[0], OverlapEvent::End(..)));
    }

    #[test]
    fn test_light_box_floats() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld2d::new(PhysicsConfig2d::default());
        let config = FluidConfig {
            seed: Some(3),
            ..FluidConfig::default()
        };
        let (_, mut fluid) =
            spawn_fluid(&mut world, Vec2::ZERO, Vec2::new(2.0, 1.0), config).unwrap();
        // Half the fluid's density, dropped from above the surface.
        let body = spawn_box(&mut world, Vec2::new(0.0, 2.0), 0.5);

        for _ in 0..600 {
            physics.step(&mut world, 1.0 / 60.0, |host, events, dt| {
                for event in events {
                    match *event {
                        OverlapEvent::Begin(a, b) => {
                            fluid.begin_overlap(host, a, b);
                        }
                        OverlapEvent::End(a, b) => {
                            fluid.end_overlap(host, a, b);
                        }
                    }
                }
                fluid.step(host, dt);
            });
        }

        let transform = world.get::<&Transform2d>(body).unwrap();
        let rb = world.get::<&RigidBody2d>(body).unwrap();
        // Equilibrium: 0.5 / 0.85 of the box submerged, center near y = 0.91.
        assert!(
            transform.position.y > 0.6 && transform.position.y < 1.2,
            "Box should float at the surface: y = {}",
            transform.position.y
        );
        assert!(
            rb.linear_velocity.length() < 0.5,
            "Box should have mostly settled: v = {:?}",
            rb.linear_velocity
        );
    }

    #[test]
    fn test_physics_config_default() {
        let config = PhysicsConfig2d::default();
        assert_eq!(config.gravity, Vec2::new(0.0, -10.0));
        assert!((config.fixed_timestep - 1.0 / 60.0).abs() < 1e-10);
        assert_eq!(config.max_substeps, 4);
    }
}
