//! Physics components for 2D ECS entities.

use glam::Vec2;

use crate::fluid::BodyKind;
use crate::geometry::FixtureShape;

/// Planar rigid body component. Rotation is about the Z axis.
#[derive(Debug, Clone)]
pub struct RigidBody2d {
    pub body_type: BodyKind,
    pub mass: f32,
    /// Moment of inertia about the center of mass.
    pub inertia: f32,
    pub linear_velocity: Vec2,
    /// Radians per second, counter-clockwise positive.
    pub angular_velocity: f32,
    pub force_accumulator: Vec2,
    pub torque_accumulator: f32,
    /// Linear damping factor (default: 0.01).
    pub linear_damping: f32,
    /// Angular damping factor (default: 0.01).
    pub angular_damping: f32,
    /// Gravity scale (default: 1.0).
    pub gravity_scale: f32,
}

impl RigidBody2d {
    /// Create a new dynamic rigid body with the given mass.
    pub fn new_dynamic(mass: f32) -> Self {
        Self {
            body_type: BodyKind::Dynamic,
            mass,
            // Unit-disc approximation until a shape-specific value is set.
            inertia: mass,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force_accumulator: Vec2::ZERO,
            torque_accumulator: 0.0,
            linear_damping: 0.01,
            angular_damping: 0.01,
            gravity_scale: 1.0,
        }
    }

    /// Dynamic box of the given mass, with the matching moment of inertia.
    pub fn new_dynamic_box(mass: f32, half_extents: Vec2) -> Self {
        Self {
            inertia: mass * (half_extents.x * half_extents.x + half_extents.y * half_extents.y)
                / 3.0,
            ..Self::new_dynamic(mass)
        }
    }

    /// Create a new static rigid body.
    pub fn new_static() -> Self {
        Self {
            body_type: BodyKind::Static,
            mass: 0.0,
            inertia: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force_accumulator: Vec2::ZERO,
            torque_accumulator: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            gravity_scale: 0.0,
        }
    }

    /// Create a new kinematic rigid body.
    pub fn new_kinematic() -> Self {
        Self {
            body_type: BodyKind::Kinematic,
            ..Self::new_static()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.linear_velocity = velocity;
        self
    }

    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyKind::Dynamic
    }
}

/// Fixture component: one shape per entity.
#[derive(Debug, Clone)]
pub struct Collider2d {
    pub shape: FixtureShape,
    /// If true, generates overlap events but no physics response.
    pub is_sensor: bool,
}

impl Collider2d {
    pub fn new(shape: FixtureShape) -> Self {
        Self {
            shape,
            is_sensor: false,
        }
    }

    pub fn sensor(shape: FixtureShape) -> Self {
        Self {
            shape,
            is_sensor: true,
        }
    }
}

impl Default for Collider2d {
    fn default() -> Self {
        Self::new(FixtureShape::circle(0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_inertia() {
        let rb = RigidBody2d::new_dynamic_box(3.0, Vec2::new(1.0, 0.5));
        // m * (w^2 + h^2) / 12 with w = 2, h = 1.
        assert!((rb.inertia - 3.0 * 5.0 / 12.0).abs() < 1e-6);
        assert!(rb.is_dynamic());
        assert_eq!(rb.gravity_scale, 1.0);
    }

    #[test]
    fn test_static_and_kinematic() {
        let s = RigidBody2d::new_static();
        let k = RigidBody2d::new_kinematic();
        assert_eq!(s.body_type, BodyKind::Static);
        assert_eq!(k.body_type, BodyKind::Kinematic);
        assert_eq!(k.mass, 0.0);
        assert!(!k.is_dynamic());
    }
}
