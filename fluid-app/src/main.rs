use anyhow::Context;
use glam::Vec2;
use rein_fluid::ecs::host::spawn_fluid;
use rein_fluid::physics::{OverlapEvent, PhysicsConfig2d, PhysicsWorld2d};
use rein_fluid::{
    Collider2d, FixtureShape, FluidBody, FluidConfig, RigidBody2d, TickReport, Transform2d,
};

const FRAME: f64 = 1.0 / 60.0;

struct Crate {
    name: &'static str,
    entity: hecs::Entity,
}

fn spawn_crates(world: &mut hecs::World) -> Vec<Crate> {
    let light = Vec2::splat(0.3);
    let heavy = Vec2::new(0.4, 0.2);
    vec![
        Crate {
            name: "light box",
            entity: world.spawn((
                Transform2d::from_position(Vec2::new(-2.0, 3.0)),
                RigidBody2d::new_dynamic_box(0.15, light),
                Collider2d::new(FixtureShape::rectangle(light)),
            )),
        },
        Crate {
            name: "heavy plank",
            entity: world.spawn((
                Transform2d::from_position_rotation(Vec2::new(0.5, 4.0), 0.4),
                RigidBody2d::new_dynamic_box(0.6, heavy),
                Collider2d::new(FixtureShape::rectangle(heavy)),
            )),
        },
        Crate {
            name: "ball",
            entity: world.spawn((
                Transform2d::from_position(Vec2::new(2.5, 5.0)),
                RigidBody2d::new_dynamic(0.2).with_velocity(Vec2::new(-1.0, 0.0)),
                Collider2d::new(FixtureShape::circle(0.25)),
            )),
        },
    ]
}

fn forward_events(
    fluid: &mut FluidBody<hecs::Entity, hecs::Entity>,
    host: &rein_fluid::EcsHost<'_>,
    events: &[OverlapEvent],
) {
    for event in events {
        match *event {
            OverlapEvent::Begin(a, b) => {
                if fluid.begin_overlap(host, a, b) {
                    log::debug!("{:?} entered the water", a.min(b));
                }
            }
            OverlapEvent::End(a, b) => {
                fluid.end_overlap(host, a, b);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let seconds: u32 = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid duration in seconds: {arg}"))?,
        None => 6,
    };

    let mut world = hecs::World::new();
    let mut physics = PhysicsWorld2d::new(PhysicsConfig2d::default());
    let config = FluidConfig {
        seed: Some(2024),
        ..FluidConfig::default()
    };
    let (_, mut fluid) = spawn_fluid(&mut world, Vec2::ZERO, Vec2::new(4.0, 1.5), config)
        .context("failed to create the pool")?;
    let crates = spawn_crates(&mut world);

    let mut totals = TickReport::default();
    for frame in 0..seconds * 60 {
        physics.step(&mut world, FRAME, |host, events, dt| {
            forward_events(&mut fluid, host, events);
            let report = fluid.step(host, dt);
            totals.impacts += report.impacts;
            totals.particles_emitted += report.particles_emitted;
            totals.particles_retired += report.particles_retired;
        });

        if (frame + 1) % 60 == 0 {
            let deviation = fluid.surface().map_or(0.0, |s| s.total_deviation());
            log::info!(
                "t = {}s: {} bodies in water, {} particles, surface deviation {:.4}",
                (frame + 1) / 60,
                fluid.contacts().len(),
                fluid.particles().len(),
                deviation
            );
        }
    }

    for c in &crates {
        let transform = world
            .get::<&Transform2d>(c.entity)
            .with_context(|| format!("{} vanished", c.name))?;
        let surface = fluid.surface_height_at(transform.position.x);
        println!(
            "{:>12}: ({:6.3}, {:6.3}) rot {:6.3}, surface {:6.3}",
            c.name, transform.position.x, transform.position.y, transform.rotation, surface
        );
    }
    println!(
        "{} column impacts, {} splash particles ({} retired)",
        totals.impacts, totals.particles_emitted, totals.particles_retired
    );
    Ok(())
}
