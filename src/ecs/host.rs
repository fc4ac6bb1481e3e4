//! [`FluidHost`] implementation over a `hecs::World`.

use glam::Vec2;

use crate::ecs::components::physics::{Collider2d, RigidBody2d};
use crate::fluid::{BodyKind, FluidBody, FluidConfig, FluidError, FluidHost};
use crate::geometry::{FixtureShape, Transform2d};

/// Borrowed view of a world that fluids read bodies from and push forces into.
pub struct EcsHost<'w> {
    world: &'w mut hecs::World,
    gravity: Vec2,
}

impl<'w> EcsHost<'w> {
    pub fn new(world: &'w mut hecs::World, gravity: Vec2) -> Self {
        Self { world, gravity }
    }

    pub fn world(&self) -> &hecs::World {
        &*self.world
    }

    pub fn world_mut(&mut self) -> &mut hecs::World {
        &mut *self.world
    }
}

impl FluidHost for EcsHost<'_> {
    type Body = hecs::Entity;
    type Fixture = hecs::Entity;

    fn fixture_shape(&self, fixture: hecs::Entity) -> Option<FixtureShape> {
        self.world
            .get::<&Collider2d>(fixture)
            .ok()
            .map(|collider| collider.shape.clone())
    }

    fn fixture_body(&self, fixture: hecs::Entity) -> Option<hecs::Entity> {
        self.world
            .get::<&RigidBody2d>(fixture)
            .ok()
            .map(|_| fixture)
    }

    fn body_kind(&self, body: hecs::Entity) -> Option<BodyKind> {
        self.world.get::<&RigidBody2d>(body).ok().map(|rb| rb.body_type)
    }

    fn body_transform(&self, body: hecs::Entity) -> Option<Transform2d> {
        self.world.get::<&Transform2d>(body).ok().map(|t| *t)
    }

    fn linear_velocity(&self, body: hecs::Entity) -> Option<Vec2> {
        self.world
            .get::<&RigidBody2d>(body)
            .ok()
            .map(|rb| rb.linear_velocity)
    }

    fn angular_velocity(&self, body: hecs::Entity) -> Option<f32> {
        self.world
            .get::<&RigidBody2d>(body)
            .ok()
            .map(|rb| rb.angular_velocity)
    }

    fn apply_force_at_point(&mut self, body: hecs::Entity, force: Vec2, point: Vec2) {
        if let Ok((transform, rb)) = self
            .world
            .query_one_mut::<(&Transform2d, &mut RigidBody2d)>(body)
        {
            if rb.is_dynamic() {
                rb.force_accumulator += force;
                rb.torque_accumulator += (point - transform.position).perp_dot(force);
            }
        }
    }

    fn apply_torque(&mut self, body: hecs::Entity, torque: f32) {
        if let Ok(mut rb) = self.world.get::<&mut RigidBody2d>(body) {
            if rb.is_dynamic() {
                rb.torque_accumulator += torque;
            }
        }
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }
}

/// Spawn a static fluid sensor entity and build its [`FluidBody`].
///
/// The entity is removed again when the configuration is rejected.
pub fn spawn_fluid(
    world: &mut hecs::World,
    center: Vec2,
    half_extents: Vec2,
    config: FluidConfig,
) -> Result<(hecs::Entity, FluidBody<hecs::Entity, hecs::Entity>), FluidError> {
    let entity = world.spawn((
        Transform2d::from_position(center),
        RigidBody2d::new_static(),
        Collider2d::sensor(FixtureShape::rectangle(half_extents)),
    ));
    match FluidBody::new(entity, entity, center, half_extents, config) {
        Ok(fluid) => Ok((entity, fluid)),
        Err(err) => {
            let _ = world.despawn(entity);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAVITY: Vec2 = Vec2::new(0.0, -10.0);

    fn spawn_box(world: &mut hecs::World, position: Vec2, velocity: Vec2) -> hecs::Entity {
        let half = Vec2::splat(0.5);
        world.spawn((
            Transform2d::from_position(position),
            RigidBody2d::new_dynamic_box(1.0, half).with_velocity(velocity),
            Collider2d::new(FixtureShape::rectangle(half)),
        ))
    }

    #[test]
    fn test_host_reads_components() {
        let mut world = hecs::World::new();
        let e = spawn_box(&mut world, Vec2::new(1.0, 2.0), Vec2::new(0.0, -3.0));
        let orphan = world.spawn((Transform2d::identity(),));

        let host = EcsHost::new(&mut world, GRAVITY);
        assert_eq!(host.fixture_body(e), Some(e));
        assert_eq!(host.fixture_body(orphan), None);
        assert_eq!(host.body_kind(e), Some(BodyKind::Dynamic));
        assert_eq!(host.linear_velocity(e), Some(Vec2::new(0.0, -3.0)));

        let polygon = host.world_polygon(e).unwrap();
        let aabb = polygon.aabb().unwrap();
        assert!((aabb.min - Vec2::new(0.5, 1.5)).length() < 1e-6);
        assert!((aabb.max - Vec2::new(1.5, 2.5)).length() < 1e-6);
    }

    #[test]
    fn test_force_at_point_adds_torque() {
        let mut world = hecs::World::new();
        let e = spawn_box(&mut world, Vec2::ZERO, Vec2::ZERO);
        let mut host = EcsHost::new(&mut world, GRAVITY);

        // Upward push on the right edge spins counter-clockwise.
        host.apply_force_at_point(e, Vec2::new(0.0, 2.0), Vec2::new(0.5, 0.0));
        host.apply_torque(e, 0.25);

        let rb = world.get::<&RigidBody2d>(e).unwrap();
        assert!((rb.force_accumulator - Vec2::new(0.0, 2.0)).length() < 1e-6);
        assert!((rb.torque_accumulator - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_static_bodies_ignore_forces() {
        let mut world = hecs::World::new();
        let e = world.spawn((Transform2d::identity(), RigidBody2d::new_static()));
        let mut host = EcsHost::new(&mut world, GRAVITY);
        host.apply_force_at_point(e, Vec2::ONE, Vec2::ONE);
        host.apply_torque(e, 1.0);

        let rb = world.get::<&RigidBody2d>(e).unwrap();
        assert_eq!(rb.force_accumulator, Vec2::ZERO);
        assert_eq!(rb.torque_accumulator, 0.0);
    }

    #[test]
    fn test_fluid_pushes_ecs_body_up() {
        let mut world = hecs::World::new();
        let (fluid_entity, mut fluid) =
            spawn_fluid(&mut world, Vec2::ZERO, Vec2::new(2.0, 1.0), FluidConfig::default())
                .unwrap();
        let e = spawn_box(&mut world, Vec2::new(0.0, 0.5), Vec2::ZERO);

        let mut host = EcsHost::new(&mut world, GRAVITY);
        assert!(fluid.begin_overlap(&host, e, fluid_entity));
        let report = fluid.step(&mut host, 1.0 / 60.0);
        assert_eq!(report.submerged, 1);

        let rb = world.get::<&RigidBody2d>(e).unwrap();
        assert!(
            (rb.force_accumulator - Vec2::new(0.0, 8.5)).length() < 1e-3,
            "Resting unit box gets pure buoyancy: {:?}",
            rb.force_accumulator
        );
    }

    #[test]
    fn test_spawn_fluid_rejects_bad_extents() {
        let mut world = hecs::World::new();
        let result = spawn_fluid(&mut world, Vec2::ZERO, Vec2::new(-1.0, 1.0), FluidConfig::default());
        assert!(result.is_err());
        assert_eq!(world.len(), 0, "Rejected fluid leaves no entity behind");
    }
}
