//! Rein 2D Fluid
//!
//! Buoyancy, drag and lift for rigid bodies in a rectangular fluid, with a
//! spring-column wave surface and splash particles.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **geometry** - Convex polygons, Sutherland–Hodgman clipping, fixture shapes
//! 2. **fluid** - Contact set, force model, wave columns, splash particles and
//!    the [`FluidBody`] tick pipeline, driven through the [`FluidHost`] trait
//! 3. **ecs** - hecs components and a [`FluidHost`] over `hecs::World` (feature = "ecs")
//! 4. **physics** - Minimal 2D world with sensor overlap events (feature = "physics")

pub mod fluid;
pub mod geometry;

#[cfg(feature = "ecs")]
pub mod ecs;

#[cfg(feature = "physics")]
pub mod physics;

// Re-export commonly used types
pub use geometry::{clip, Aabb2d, ConvexPolygon, FixtureShape, Transform2d};

pub use fluid::{
    AngularCorrection, BodyKind, ContactPair, ContactSet, FluidBody, FluidConfig, FluidError,
    FluidHost, ForceModel, HydroForces, SplashParticle, TickReport, WaterColumn, WaveSurface,
};

#[cfg(feature = "ecs")]
pub use ecs::prelude::*;

#[cfg(feature = "physics")]
pub use physics::{OverlapEvent, PhysicsConfig2d, PhysicsWorld2d};

// Re-export glam for convenience
pub use glam;
