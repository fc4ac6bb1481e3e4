//! Scene builders shared by the fluid benchmarks.

use glam::Vec2;
use rein_fluid::ecs::host::spawn_fluid;
use rein_fluid::fluid::WaveParams;
use rein_fluid::physics::{PhysicsConfig2d, PhysicsWorld2d};
use rein_fluid::{
    Collider2d, ConvexPolygon, FixtureShape, FluidBody, FluidConfig, RigidBody2d, Transform2d,
    WaveSurface,
};

pub type EcsFluid = FluidBody<hecs::Entity, hecs::Entity>;

/// Regular `n`-gon of radius `r` around `center`, counter-clockwise.
pub fn regular_polygon(n: usize, r: f32, center: Vec2) -> ConvexPolygon {
    let step = std::f32::consts::TAU / n as f32;
    ConvexPolygon::new(
        (0..n)
            .map(|i| center + Vec2::from_angle(i as f32 * step) * r)
            .collect(),
    )
}

/// Wave surface with `count` columns and a bump in the middle.
pub fn disturbed_surface(count: usize) -> WaveSurface<u32> {
    let mut surface = WaveSurface::new(0.0, 0.04, count, -1.0, 0.0, WaveParams::default());
    surface.set_height(count / 2, 1.0);
    surface
}

/// A 20 x 4 pool with `n` boxes in a grid above it.
pub fn setup_pool(n: usize) -> (hecs::World, PhysicsWorld2d, EcsFluid) {
    let mut world = hecs::World::new();
    let physics = PhysicsWorld2d::new(PhysicsConfig2d::default());
    let config = FluidConfig {
        seed: Some(0),
        ..FluidConfig::default()
    };
    let (_, fluid) = match spawn_fluid(&mut world, Vec2::ZERO, Vec2::new(10.0, 2.0), config) {
        Ok(spawned) => spawned,
        Err(err) => panic!("benchmark pool rejected: {err}"),
    };

    let per_row = 20;
    let half = Vec2::splat(0.2);
    for i in 0..n {
        let x = -9.5 + (i % per_row) as f32;
        let y = 1.8 + (i / per_row) as f32 * 0.6;
        world.spawn((
            Transform2d::from_position(Vec2::new(x, y)),
            RigidBody2d::new_dynamic_box(0.1, half).with_velocity(Vec2::new(0.0, -6.0)),
            Collider2d::new(FixtureShape::rectangle(half)),
        ));
    }
    (world, physics, fluid)
}
