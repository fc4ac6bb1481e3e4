//! Fixture shapes and their conversion to world-space clip polygons.

use glam::Vec2;

use super::polygon::ConvexPolygon;
use super::transform::Transform2d;

/// Body-local fixture geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureShape {
    /// Convex polygon, counter-clockwise, body-local vertices.
    Polygon { vertices: Vec<Vec2> },
    /// Circle around a body-local center.
    Circle { center: Vec2, radius: f32 },
    /// Any shape kind the clipper cannot handle (edges, chains, ...).
    Unsupported,
}

impl FixtureShape {
    /// Axis-aligned box centered on the body origin.
    pub fn rectangle(half_extents: Vec2) -> Self {
        Self::Polygon {
            vertices: ConvexPolygon::from_bounds(-half_extents, half_extents).into_vertices(),
        }
    }

    pub fn circle(radius: f32) -> Self {
        Self::Circle {
            center: Vec2::ZERO,
            radius,
        }
    }

    /// Resolve the shape into a world-space convex polygon.
    ///
    /// Circles become their 4-point bounding square, which rotates with the
    /// body. Returns `None` for unsupported kinds and for polygons with fewer
    /// than three vertices.
    pub fn to_world_polygon(&self, transform: &Transform2d) -> Option<ConvexPolygon> {
        match self {
            FixtureShape::Polygon { vertices } => {
                if vertices.len() < 3 {
                    return None;
                }
                Some(ConvexPolygon::new(
                    vertices.iter().map(|v| transform.transform_point(*v)).collect(),
                ))
            }
            FixtureShape::Circle { center, radius } => {
                if !(*radius > 0.0) {
                    return None;
                }
                let r = Vec2::splat(*radius);
                let local = ConvexPolygon::from_bounds(*center - r, *center + r);
                Some(ConvexPolygon::new(
                    local
                        .vertices()
                        .iter()
                        .map(|v| transform.transform_point(*v))
                        .collect(),
                ))
            }
            FixtureShape::Unsupported => None,
        }
    }
}
