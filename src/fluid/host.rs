//! Narrow interface to the rigid-body engine that owns bodies and fixtures.
//!
//! A fluid never owns or destroys anything it reads through this trait: body
//! and fixture handles are plain identifiers. Every accessor returns `Option`
//! so a handle that went stale between a contact event and the tick is skipped.

use std::fmt::Debug;
use std::hash::Hash;

use glam::Vec2;

use crate::geometry::{ConvexPolygon, FixtureShape, Transform2d};

/// Body motion type as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    Static,
    Kinematic,
}

pub trait FluidHost {
    type Body: Copy + Eq + Ord + Hash + Debug;
    type Fixture: Copy + Eq + Ord + Hash + Debug;

    /// Local-space shape of a fixture.
    fn fixture_shape(&self, fixture: Self::Fixture) -> Option<FixtureShape>;

    /// Body a fixture is attached to.
    fn fixture_body(&self, fixture: Self::Fixture) -> Option<Self::Body>;

    fn body_kind(&self, body: Self::Body) -> Option<BodyKind>;

    fn body_transform(&self, body: Self::Body) -> Option<Transform2d>;

    fn linear_velocity(&self, body: Self::Body) -> Option<Vec2>;

    fn angular_velocity(&self, body: Self::Body) -> Option<f32>;

    /// Velocity of the material point of `body` located at `point`.
    fn velocity_at_point(&self, body: Self::Body, point: Vec2) -> Option<Vec2> {
        let transform = self.body_transform(body)?;
        let linear = self.linear_velocity(body)?;
        let angular = self.angular_velocity(body)?;
        Some(linear + (point - transform.position).perp() * angular)
    }

    /// Add a continuous force at a world point for the current step.
    fn apply_force_at_point(&mut self, body: Self::Body, force: Vec2, point: Vec2);

    fn apply_torque(&mut self, body: Self::Body, torque: f32);

    fn gravity(&self) -> Vec2;

    /// Fixture shape resolved into a world-space clip polygon.
    fn world_polygon(&self, fixture: Self::Fixture) -> Option<ConvexPolygon> {
        let body = self.fixture_body(fixture)?;
        let transform = self.body_transform(body)?;
        self.fixture_shape(fixture)?.to_world_polygon(&transform)
    }

    fn is_dynamic_fixture(&self, fixture: Self::Fixture) -> bool {
        self.fixture_body(fixture)
            .and_then(|body| self.body_kind(body))
            .is_some_and(|kind| kind == BodyKind::Dynamic)
    }
}
