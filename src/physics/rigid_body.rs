//! Rigid body integration functions.

use glam::Vec2;

use crate::ecs::components::physics::RigidBody2d;
use crate::fluid::BodyKind;
use crate::geometry::Transform2d;

/// Apply gravity force to all dynamic rigid bodies.
pub fn apply_gravity(world: &mut hecs::World, gravity: Vec2) {
    for (_, rb) in world.query_mut::<&mut RigidBody2d>() {
        if rb.is_dynamic() && rb.mass > 0.0 {
            rb.force_accumulator += gravity * rb.mass * rb.gravity_scale;
        }
    }
}

/// Integrate velocities using semi-implicit Euler: v += (F/m) * dt.
pub fn integrate_velocities(world: &mut hecs::World, dt: f32) {
    for (_, rb) in world.query_mut::<&mut RigidBody2d>() {
        if !rb.is_dynamic() || rb.mass <= 0.0 {
            continue;
        }

        rb.linear_velocity += rb.force_accumulator / rb.mass * dt;
        if rb.inertia > 0.0 {
            rb.angular_velocity += rb.torque_accumulator / rb.inertia * dt;
        }

        // Apply damping
        rb.linear_velocity *= (1.0 - rb.linear_damping).max(0.0);
        rb.angular_velocity *= (1.0 - rb.angular_damping).max(0.0);
    }
}

/// Integrate positions: p += v * dt, theta += omega * dt.
pub fn integrate_positions(world: &mut hecs::World, dt: f32) {
    for (_, (rb, transform)) in world.query_mut::<(&RigidBody2d, &mut Transform2d)>() {
        if rb.body_type == BodyKind::Static {
            continue;
        }
        transform.position += rb.linear_velocity * dt;
        transform.rotation += rb.angular_velocity * dt;
    }
}

/// Clear force and torque accumulators on all rigid bodies.
pub fn clear_forces(world: &mut hecs::World) {
    for (_, rb) in world.query_mut::<&mut RigidBody2d>() {
        rb.force_accumulator = Vec2::ZERO;
        rb.torque_accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_fall() {
        let mut world = hecs::World::new();

        let entity = world.spawn((
            Transform2d::from_position(Vec2::new(0.0, 10.0)),
            RigidBody2d::new_dynamic(1.0),
        ));

        let gravity = Vec2::new(0.0, -10.0);
        let dt = 1.0 / 60.0;

        // Simulate 1 second (60 steps)
        for _ in 0..60 {
            apply_gravity(&mut world, gravity);
            integrate_velocities(&mut world, dt);
            integrate_positions(&mut world, dt);
            clear_forces(&mut world);
        }

        let transform = world.get::<&Transform2d>(entity).unwrap();

        // Undamped: y = 10 - 0.5 * 10 * 1^2 = 5. Damping keeps it higher.
        assert!(
            transform.position.y < 10.0,
            "Body should have fallen: y = {}",
            transform.position.y
        );
        assert!(
            transform.position.y > 4.0,
            "Body should not have fallen too far in 1 second: y = {}",
            transform.position.y
        );
        assert!(transform.position.x.abs() < 1e-5);
    }

    #[test]
    fn test_static_body_unaffected() {
        let mut world = hecs::World::new();

        let entity = world.spawn((Transform2d::identity(), RigidBody2d::new_static()));

        for _ in 0..60 {
            apply_gravity(&mut world, Vec2::new(0.0, -10.0));
            integrate_velocities(&mut world, 1.0 / 60.0);
            integrate_positions(&mut world, 1.0 / 60.0);
            clear_forces(&mut world);
        }

        let transform = world.get::<&Transform2d>(entity).unwrap();
        assert_eq!(transform.position, Vec2::ZERO);
    }

    #[test]
    fn test_kinematic_body_moves_without_gravity() {
        let mut world = hecs::World::new();
        let entity = world.spawn((
            Transform2d::identity(),
            RigidBody2d::new_kinematic().with_velocity(Vec2::new(1.0, 0.0)),
        ));

        for _ in 0..10 {
            apply_gravity(&mut world, Vec2::new(0.0, -10.0));
            integrate_velocities(&mut world, 0.1);
            integrate_positions(&mut world, 0.1);
        }

        let transform = world.get::<&Transform2d>(entity).unwrap();
        assert!((transform.position - Vec2::new(1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_torque_spins_body() {
        let mut world = hecs::World::new();
        let entity = world.spawn((Transform2d::identity(), {
            let mut rb = RigidBody2d::new_dynamic(1.0);
            rb.angular_damping = 0.0;
            rb.torque_accumulator = 2.0;
            rb
        }));

        integrate_velocities(&mut world, 0.5);
        integrate_positions(&mut world, 0.5);

        let rb = world.get::<&RigidBody2d>(entity).unwrap();
        assert!((rb.angular_velocity - 1.0).abs() < 1e-6);
        let transform = world.get::<&Transform2d>(entity).unwrap();
        assert!((transform.rotation - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_clear_forces() {
        let mut world = hecs::World::new();

        let entity = world.spawn((Transform2d::identity(), {
            let mut rb = RigidBody2d::new_dynamic(1.0);
            rb.force_accumulator = Vec2::new(10.0, 20.0);
            rb.torque_accumulator = 3.0;
            rb
        }));

        clear_forces(&mut world);

        let rb = world.get::<&RigidBody2d>(entity).unwrap();
        assert_eq!(rb.force_accumulator, Vec2::ZERO);
        assert_eq!(rb.torque_accumulator, 0.0);
    }
}
