//! ECS components.
//!
//! [`Transform2d`](crate::geometry::Transform2d) is used directly as the
//! position component.

pub mod physics;
