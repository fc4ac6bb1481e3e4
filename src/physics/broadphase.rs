//! Sensor overlap detection: AABB broadphase, clipping narrowphase.

use crate::ecs::components::physics::{Collider2d, RigidBody2d};
use crate::fluid::BodyKind;
use crate::geometry::{clip, Aabb2d, ConvexPolygon, Transform2d};

struct Entry {
    entity: hecs::Entity,
    polygon: ConvexPolygon,
    aabb: Aabb2d,
    body_type: BodyKind,
    is_sensor: bool,
}

/// Pair-wise sensor overlap finder (O(n^2) AABB test, then polygon clipping).
pub struct SensorBroadphase;

impl Default for SensorBroadphase {
    fn default() -> Self {
        Self
    }
}

impl SensorBroadphase {
    pub fn new() -> Self {
        Self
    }

    fn collect(world: &hecs::World) -> Vec<Entry> {
        let mut entries = Vec::new();
        for (entity, (collider, transform, rb)) in world
            .query::<(&Collider2d, &Transform2d, &RigidBody2d)>()
            .iter()
        {
            // Unsupported shapes never overlap anything.
            let Some(polygon) = collider.shape.to_world_polygon(transform) else {
                continue;
            };
            let Some(aabb) = polygon.aabb() else {
                continue;
            };
            entries.push(Entry {
                entity,
                polygon,
                aabb,
                body_type: rb.body_type,
                is_sensor: collider.is_sensor,
            });
        }
        entries
    }

    /// Candidate pairs whose world polygons overlap with positive area.
    pub fn find_overlaps(&self, world: &hecs::World) -> Vec<(hecs::Entity, hecs::Entity)> {
        let entries = Self::collect(world);
        Self::candidates(&entries)
            .filter(|(a, b)| clip(&a.polygon, &b.polygon).area() > 0.0)
            .map(|(a, b)| (a.entity, b.entity))
            .collect()
    }

    /// Pairs whose AABBs overlap where exactly one side is a sensor.
    /// Static-static pairs are skipped.
    fn candidates(entries: &[Entry]) -> impl Iterator<Item = (&Entry, &Entry)> + '_ {
        (0..entries.len())
            .flat_map(move |i| ((i + 1)..entries.len()).map(move |j| (&entries[i], &entries[j])))
            .filter(|(a, b)| {
                a.is_sensor != b.is_sensor
                    && !(a.body_type == BodyKind::Static && b.body_type == BodyKind::Static)
                    && a.aabb.overlaps(&b.aabb)
            })
    }
}
