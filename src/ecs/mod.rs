//! hecs integration: 2D body components and a [`FluidHost`](crate::FluidHost)
//! backed by a `hecs::World`.
//!
//! One entity carries one fixture, so a fixture handle and its body handle
//! are the same `hecs::Entity`.

pub mod components;
pub mod host;

pub mod prelude {
    pub use super::components::physics::{Collider2d, RigidBody2d};
    pub use super::host::{spawn_fluid, EcsHost};
}
