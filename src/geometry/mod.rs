//! 2D convex geometry: polygons, Sutherland–Hodgman clipping and fixture shapes.
//!
//! Everything here works in world space on counter-clockwise convex polygons.
//! Degenerate input never panics; it produces an empty or zero-area result.

pub mod clip;
pub mod polygon;
pub mod shape;
pub mod transform;

pub use clip::{clip, is_inside, line_intersection};
pub use polygon::{Aabb2d, ConvexPolygon};
pub use shape::FixtureShape;
pub use transform::Transform2d;
