//! Splash particles thrown up when a body hits the surface.
//!
//! Particles follow a closed-form ballistic arc from their emission time, so
//! integration is exact for any frame delta. A particle is retired once its
//! arc drops below its baseline or it leaves the horizontal bounds of the
//! fluid; retirement compacts the live list after the update pass.

use std::f32::consts::PI;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::FluidConfig;

/// Emission tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplashParams {
    /// Minimum downward body speed that produces a burst.
    pub speed_threshold: f32,
    /// Particles per burst are `floor(speed / burst_divisor)`.
    pub burst_divisor: f32,
    /// Cap on the particles of one burst.
    pub max_burst: usize,
    pub radius_range: [f32; 2],
    pub vertical_kick_probability: f64,
}

impl SplashParams {
    pub fn from_config(config: &FluidConfig) -> Self {
        Self {
            speed_threshold: config.splash_speed_threshold,
            burst_divisor: config.particle_burst_divisor,
            max_burst: config.max_burst_particles,
            radius_range: config.particle_radius_range,
            vertical_kick_probability: config.vertical_kick_probability,
        }
    }
}

impl Default for SplashParams {
    fn default() -> Self {
        Self::from_config(&FluidConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplashParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Seconds since emission.
    pub elapsed: f32,
    pub init_x: f32,
    /// Surface level the arc starts from and is retired below.
    pub baseline: f32,
}

impl SplashParticle {
    /// Ballistic position after `elapsed` seconds under vertical `gravity`
    /// (negative pulls down).
    #[inline]
    pub fn arc_position(&self, elapsed: f32, gravity: f32) -> Vec2 {
        Vec2::new(
            self.init_x + self.velocity.x * elapsed,
            self.baseline + self.velocity.y.abs() * elapsed + 0.5 * gravity * elapsed * elapsed,
        )
    }
}

/// One impact to turn into particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplashBurst {
    /// Impact point on the surface.
    pub origin: Vec2,
    /// Body's vertical velocity at impact; only its magnitude matters.
    pub impact_velocity_y: f32,
    /// Horizontal center of the impacting body.
    pub body_x: f32,
    /// Particles start within this distance of `origin`.
    pub scatter: f32,
    pub baseline: f32,
}

/// Live splash particles for one fluid.
#[derive(Debug, Clone)]
pub struct SplashSystem {
    particles: Vec<SplashParticle>,
    params: SplashParams,
    min_x: f32,
    max_x: f32,
    rng: StdRng,
}

impl SplashSystem {
    /// Particles are confined to `min_x..=max_x`. A `seed` makes bursts
    /// reproducible.
    pub fn new(params: SplashParams, min_x: f32, max_x: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            particles: Vec::new(),
            params,
            min_x,
            max_x,
            rng,
        }
    }

    pub fn particles(&self) -> &[SplashParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// How many particles an impact at `speed` produces, at most
    /// `max_burst`.
    pub fn burst_size(&self, speed: f32) -> usize {
        let speed = speed.abs();
        if !(speed > self.params.speed_threshold) {
            return 0;
        }
        ((speed / self.params.burst_divisor).floor() as usize).min(self.params.max_burst)
    }

    /// Emit a burst. Returns the number of particles created.
    pub fn emit(&mut self, burst: &SplashBurst) -> usize {
        let speed = burst.impact_velocity_y.abs();
        let count = self.burst_size(speed);
        if count == 0 {
            return 0;
        }
        let scatter = burst.scatter.abs();
        let [r_min, r_max] = self.params.radius_range;

        self.particles.reserve(count);
        for _ in 0..count {
            let angle = self.rng.random_range(-PI..PI);
            let distance = self.rng.random_range(0.0..=scatter);
            let position = burst.origin + Vec2::from_angle(angle) * distance;

            let velocity = if self.rng.random_bool(self.params.vertical_kick_probability) {
                Vec2::new(0.0, speed / 2.0 + self.rng.random::<f32>() * speed / 2.0)
            } else {
                // Away from the body center.
                let side = if position.x < burst.body_x { -1.0 } else { 1.0 };
                Vec2::new(
                    side * (speed / 5.0 + self.rng.random::<f32>() * speed / 5.0),
                    speed / 3.0 + self.rng.random::<f32>() * speed / 3.0,
                )
            };

            let radius = self.rng.random_range(r_min..r_max);
            self.particles.push(SplashParticle {
                position,
                velocity,
                radius,
                elapsed: 0.0,
                init_x: position.x,
                baseline: burst.baseline,
            });
        }
        count
    }

    /// Advance every particle by `dt` and retire the ones that fell back
    /// below their baseline or left the fluid. Returns how many were retired.
    pub fn update(&mut self, dt: f32, gravity: f32) -> usize {
        let before = self.particles.len();
        let (min_x, max_x) = (self.min_x, self.max_x);
        self.particles.retain_mut(|particle| {
            let elapsed = particle.elapsed + dt;
            let next = particle.arc_position(elapsed, gravity);
            if next.y < particle.baseline || next.x < min_x || next.x > max_x {
                return false;
            }
            particle.elapsed = elapsed;
            particle.position = next;
            true
        });
        before - self.particles.len()
    }
}
