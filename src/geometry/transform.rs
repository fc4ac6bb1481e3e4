//! Rigid 2D transform (translation + rotation).

use glam::Vec2;

/// Position and rotation of a body in world space. No scale: fixtures are
/// specified at their final size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2d {
    pub position: Vec2,
    /// Rotation in radians, counter-clockwise.
    pub rotation: f32,
}

impl Transform2d {
    /// Create an identity transform.
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
        }
    }

    /// Create a transform from a position.
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
        }
    }

    pub fn from_position_rotation(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }

    /// Map a body-local point into world space.
    #[inline]
    pub fn transform_point(&self, local: Vec2) -> Vec2 {
        Vec2::from_angle(self.rotation).rotate(local) + self.position
    }

    /// Rotate a body-local direction into world space.
    #[inline]
    pub fn transform_vector(&self, local: Vec2) -> Vec2 {
        Vec2::from_angle(self.rotation).rotate(local)
    }
}

impl Default for Transform2d {
    fn default() -> Self {
        Self::identity()
    }
}
