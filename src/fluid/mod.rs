//! Fluid body: overlap tracking, hydrodynamic forces, surface waves and splashes.
//!
//! # Tick pipeline
//!
//! Contact events from the host update the [`ContactSet`] between ticks. Each
//! [`FluidBody::step`] then runs, strictly in order:
//!
//! 1. clip every tracked fixture against the fluid polygon
//! 2. compute and apply buoyancy, drag and lift per pair
//! 3. register column impacts once per body, from all its overlap polygons
//! 4. integrate and relax the wave columns
//! 5. advance and retire splash particles
//!
//! Stale handles and unsupported shapes skip their pair for the tick.

pub mod config;
pub mod contact;
pub mod error;
pub mod forces;
pub mod host;
pub mod particles;
pub mod waves;

#[cfg(test)]
mod test_host;

pub use config::{AngularCorrection, FluidConfig};
pub use contact::{ContactPair, ContactSet};
pub use error::FluidError;
pub use forces::{EdgeForces, ForceModel, HydroForces};
pub use host::{BodyKind, FluidHost};
pub use particles::{SplashBurst, SplashParams, SplashParticle, SplashSystem};
pub use waves::{ColumnImpact, WaterColumn, WaveParams, WaveSurface};

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use tracing::{debug, info, trace};

use crate::geometry::{clip, Aabb2d, ConvexPolygon};

/// Upper bound on the number of surface columns one fluid may allocate.
pub const MAX_COLUMNS: usize = 1 << 16;

/// Counters for one [`FluidBody::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tracked pairs at the start of the tick.
    pub pairs: usize,
    /// Pairs dropped for stale handles or unsupported shapes.
    pub skipped: usize,
    /// Bodies that received forces.
    pub submerged: usize,
    pub impacts: usize,
    pub particles_emitted: usize,
    pub particles_retired: usize,
}

/// Everything one body contributed to the fluid during a tick.
#[derive(Debug)]
struct Submersion {
    footprints: Vec<ConvexPolygon>,
    area: f32,
    position: Vec2,
    velocity: Vec2,
}

/// A static rectangular fluid sensor and all state it simulates.
///
/// `B` and `F` are the host's body and fixture handles.
#[derive(Debug)]
pub struct FluidBody<B, F> {
    fixture: F,
    body: B,
    center: Vec2,
    half_extents: Vec2,
    config: FluidConfig,
    forces: ForceModel,
    contacts: ContactSet<F>,
    surface: Option<WaveSurface<B>>,
    splashes: Option<SplashSystem>,
    /// Bodies that already splashed the flat surface (waves disabled).
    surface_hits: BTreeSet<B>,
}

impl<B, F> FluidBody<B, F>
where
    B: Copy + Ord + std::fmt::Debug,
    F: Copy + Ord + std::fmt::Debug,
{
    /// Build a fluid over the axis-aligned box `center ± half_extents`.
    ///
    /// With waves enabled, `floor(width / separation) + 1` columns are laid
    /// out from the left edge, resting at the top over a bottom baseline.
    pub fn new(
        fixture: F,
        body: B,
        center: Vec2,
        half_extents: Vec2,
        config: FluidConfig,
    ) -> Result<Self, FluidError> {
        config.validate()?;
        let extents_ok = center.is_finite()
            && half_extents.is_finite()
            && half_extents.x > 0.0
            && half_extents.y > 0.0;
        if !extents_ok {
            return Err(FluidError::InvalidExtents {
                x: half_extents.x,
                y: half_extents.y,
            });
        }

        let width = half_extents.x * 2.0;
        let separation = config.column_separation;
        let count = ((width / separation).floor() as usize).saturating_add(1);
        if config.waves && count > MAX_COLUMNS {
            return Err(FluidError::TooManyColumns {
                width,
                separation,
                count,
                limit: MAX_COLUMNS,
            });
        }

        let left = center.x - half_extents.x;
        let right = center.x + half_extents.x;
        let bottom = center.y - half_extents.y;
        let top = center.y + half_extents.y;

        let surface = config.waves.then(|| {
            WaveSurface::new(
                left,
                separation,
                count,
                bottom,
                top,
                WaveParams::from_config(&config),
            )
        });
        let splashes = config.splash_particles.then(|| {
            SplashSystem::new(SplashParams::from_config(&config), left, right, config.seed)
        });

        info!(
            "Fluid {:?}: {}x{} at ({}, {}), {} columns",
            fixture,
            width,
            half_extents.y * 2.0,
            center.x,
            center.y,
            surface.as_ref().map_or(0, |s| s.len())
        );

        Ok(Self {
            fixture,
            body,
            center,
            half_extents,
            forces: ForceModel::from_config(&config),
            config,
            contacts: ContactSet::new(fixture),
            surface,
            splashes,
            surface_hits: BTreeSet::new(),
        })
    }

    pub fn fixture(&self) -> F {
        self.fixture
    }

    pub fn body(&self) -> B {
        self.body
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    pub fn config(&self) -> &FluidConfig {
        &self.config
    }

    pub fn force_model(&self) -> &ForceModel {
        &self.forces
    }

    pub fn contacts(&self) -> &ContactSet<F> {
        &self.contacts
    }

    /// Rest level of the surface.
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    pub fn aabb(&self) -> Aabb2d {
        Aabb2d {
            min: self.center - self.half_extents,
            max: self.center + self.half_extents,
        }
    }

    pub fn surface(&self) -> Option<&WaveSurface<B>> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut WaveSurface<B>> {
        self.surface.as_mut()
    }

    /// Surface columns; empty when waves are disabled.
    pub fn columns(&self) -> &[WaterColumn<B>] {
        self.surface.as_ref().map(|s| s.columns()).unwrap_or(&[])
    }

    /// Live splash particles; empty when splashes are disabled.
    pub fn particles(&self) -> &[SplashParticle] {
        self.splashes.as_ref().map(|s| s.particles()).unwrap_or(&[])
    }

    /// Surface height at `x`, the flat top when waves are disabled.
    pub fn surface_height_at(&self, x: f32) -> f32 {
        self.surface
            .as_ref()
            .and_then(|s| s.height_at(x))
            .unwrap_or_else(|| self.top())
    }

    /// Quads between adjacent columns (bottom-left, top-left, top-right,
    /// bottom-right). A single quad covering the whole fluid without waves.
    pub fn surface_quads(&self) -> Vec<[Vec2; 4]> {
        match &self.surface {
            Some(surface) => surface.quads().collect(),
            None => {
                let Aabb2d { min, max } = self.aabb();
                vec![[min, Vec2::new(min.x, max.y), max, Vec2::new(max.x, min.y)]]
            }
        }
    }

    /// Begin-overlap callback from the host engine.
    pub fn begin_overlap<H>(&mut self, host: &H, a: F, b: F) -> bool
    where
        H: FluidHost<Body = B, Fixture = F> + ?Sized,
    {
        self.contacts.begin_overlap(host, a, b)
    }

    /// End-overlap callback. Releases every column the body owned once none
    /// of its fixtures touch the fluid any more.
    pub fn end_overlap<H>(&mut self, host: &H, a: F, b: F) -> Option<ContactPair<F>>
    where
        H: FluidHost<Body = B, Fixture = F> + ?Sized,
    {
        let pair = self.contacts.end_overlap(a, b)?;
        if let Some(body) = host.fixture_body(pair.body) {
            let still_touching = self
                .contacts
                .iter()
                .any(|other| host.fixture_body(other.body) == Some(body));
            if still_touching {
                return Some(pair);
            }
            if let Some(surface) = self.surface.as_mut() {
                surface.release(body);
            }
            self.surface_hits.remove(&body);
        }
        Some(pair)
    }

    /// Run one simulation tick. Forces go to the host's accumulators; `dt`
    /// only drives particle lifetimes.
    pub fn step<H>(&mut self, host: &mut H, dt: f32) -> TickReport
    where
        H: FluidHost<Body = B, Fixture = F> + ?Sized,
    {
        let mut report = TickReport::default();
        let pairs = self.contacts.snapshot();
        report.pairs = pairs.len();

        let gravity = host.gravity();
        let mut submerged: BTreeMap<B, Submersion> = BTreeMap::new();

        match host.world_polygon(self.fixture) {
            Some(fluid_polygon) => {
                for pair in pairs {
                    let Some(body) = host.fixture_body(pair.body) else {
                        debug!("Skipping pair {:?}: fixture has no body", pair);
                        report.skipped += 1;
                        continue;
                    };
                    let Some(body_polygon) = host.world_polygon(pair.body) else {
                        debug!("Skipping pair {:?}: stale or unsupported shape", pair);
                        report.skipped += 1;
                        continue;
                    };
                    let (Some(transform), Some(velocity), Some(spin)) = (
                        host.body_transform(body),
                        host.linear_velocity(body),
                        host.angular_velocity(body),
                    ) else {
                        debug!("Skipping pair {:?}: body {:?} is stale", pair, body);
                        report.skipped += 1;
                        continue;
                    };

                    let overlap = clip(&body_polygon, &fluid_polygon);
                    if overlap.is_degenerate() {
                        continue;
                    }

                    let fluid_body = self.body;
                    let hydro = {
                        let host = &*host;
                        self.forces.compute(&overlap, gravity, spin, |point| {
                            let fluid = host
                                .velocity_at_point(fluid_body, point)
                                .unwrap_or(Vec2::ZERO);
                            Some(host.velocity_at_point(body, point)? - fluid)
                        })
                    };
                    let Some(hydro) = hydro else {
                        continue;
                    };
                    hydro.apply(host, body);

                    let entry = submerged.entry(body).or_insert_with(|| Submersion {
                        footprints: Vec::new(),
                        area: 0.0,
                        position: transform.position,
                        velocity,
                    });
                    entry.area += hydro.area;
                    entry.footprints.push(overlap);
                }
            }
            None => {
                debug!("Fluid fixture {:?} has no usable polygon", self.fixture);
            }
        }

        report.submerged = submerged.len();
        for (body, submersion) in &submerged {
            self.disturb_surface(*body, submersion, &mut report);
        }

        if let Some(surface) = self.surface.as_mut() {
            surface.retain_owners(|owner| submerged.contains_key(owner));
            surface.step();
        }
        self.surface_hits.retain(|hit| submerged.contains_key(hit));

        if let Some(splashes) = self.splashes.as_mut() {
            report.particles_retired = splashes.update(dt, gravity.y);
        }

        trace!(
            "Fluid {:?} tick: {} pairs, {} submerged, {} impacts, +{}/-{} particles",
            self.fixture,
            report.pairs,
            report.submerged,
            report.impacts,
            report.particles_emitted,
            report.particles_retired
        );
        report
    }

    /// Column impacts with waves enabled, a single flat-surface burst per
    /// contact without.
    fn disturb_surface(&mut self, body: B, submersion: &Submersion, report: &mut TickReport) {
        let Submersion {
            ref footprints,
            area,
            position,
            velocity,
        } = *submersion;
        let allow_impacts = area >= self.config.min_wave_area;

        if let Some(surface) = self.surface.as_mut() {
            let impacts = surface.register_impact(body, footprints, position, velocity, allow_impacts);
            report.impacts += impacts.len();
            if let Some(splashes) = self.splashes.as_mut() {
                for impact in &impacts {
                    report.particles_emitted += splashes.emit(&SplashBurst {
                        origin: impact.point,
                        impact_velocity_y: impact.body_velocity_y,
                        body_x: impact.body_x,
                        scatter: impact.target_height,
                        baseline: impact.target_height,
                    });
                }
            }
            return;
        }

        let Some(splashes) = self.splashes.as_mut() else {
            return;
        };
        if !allow_impacts || !(velocity.y < 0.0) || self.surface_hits.contains(&body) {
            return;
        }
        let top = self.center.y + self.half_extents.y;
        self.surface_hits.insert(body);
        report.impacts += 1;
        report.particles_emitted += splashes.emit(&SplashBurst {
            origin: Vec2::new(position.x, top),
            impact_velocity_y: velocity.y,
            body_x: position.x,
            scatter: top,
            baseline: top,
        });
    }
}
