//! In-memory host used by unit tests.

use std::collections::HashMap;

use glam::Vec2;

use super::host::{BodyKind, FluidHost};
use crate::geometry::{FixtureShape, Transform2d};

/// Table-driven host for unit tests: fixture id == body id unless the
/// fixture was attached to another body.
#[derive(Default)]
pub(crate) struct TableHost {
    pub kinds: HashMap<u32, BodyKind>,
    /// Extra fixtures and the body they belong to.
    pub owners: HashMap<u32, u32>,
    pub shapes: HashMap<u32, FixtureShape>,
    pub transforms: HashMap<u32, Transform2d>,
    pub velocities: HashMap<u32, Vec2>,
    pub spins: HashMap<u32, f32>,
    pub forces: Vec<(u32, Vec2, Vec2)>,
    pub torques: Vec<(u32, f32)>,
    pub gravity: Vec2,
}

impl TableHost {
    pub fn insert(&mut self, id: u32, kind: BodyKind, shape: FixtureShape, position: Vec2) {
        self.kinds.insert(id, kind);
        self.shapes.insert(id, shape);
        self.transforms.insert(id, Transform2d::from_position(position));
        self.velocities.insert(id, Vec2::ZERO);
        self.spins.insert(id, 0.0);
    }

    /// Add a fixture `fixture` with body-local `shape` to an existing body.
    pub fn attach(&mut self, fixture: u32, body: u32, shape: FixtureShape) {
        self.owners.insert(fixture, body);
        self.shapes.insert(fixture, shape);
    }

    pub fn total_force(&self, id: u32) -> Vec2 {
        self.forces
            .iter()
            .filter(|(body, _, _)| *body == id)
            .map(|(_, force, _)| *force)
            .sum()
    }
}

impl FluidHost for TableHost {
    type Body = u32;
    type Fixture = u32;

    fn fixture_shape(&self, fixture: u32) -> Option<FixtureShape> {
        self.shapes.get(&fixture).cloned()
    }

    fn fixture_body(&self, fixture: u32) -> Option<u32> {
        let body = self.owners.get(&fixture).copied().unwrap_or(fixture);
        self.kinds.contains_key(&body).then_some(body)
    }

    fn body_kind(&self, body: u32) -> Option<BodyKind> {
        self.kinds.get(&body).copied()
    }

    fn body_transform(&self, body: u32) -> Option<Transform2d> {
        self.transforms.get(&body).copied()
    }

    fn linear_velocity(&self, body: u32) -> Option<Vec2> {
        self.velocities.get(&body).copied()
    }

    fn angular_velocity(&self, body: u32) -> Option<f32> {
        self.spins.get(&body).copied()
    }

    fn apply_force_at_point(&mut self, body: u32, force: Vec2, point: Vec2) {
        self.forces.push((body, force, point));
    }

    fn apply_torque(&mut self, body: u32, torque: f32) {
        self.torques.push((body, torque));
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }
}
