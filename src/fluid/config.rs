//! Tunables for a fluid body.

use super::error::FluidError;

/// Empirical spin damping applied once per tick to a submerged body.
///
/// Not a physical term: the torque is `area * -angular_velocity + bias`.
/// It counters rotation introduced by applying the discretised edge forces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularCorrection {
    /// Constant torque added on top of the area-scaled damping.
    pub bias: f32,
}

impl Default for AngularCorrection {
    fn default() -> Self {
        Self { bias: 0.0627 }
    }
}

/// Configuration for a fluid body. Defaults suit a world measured in metres
/// with gravity around -10.
#[derive(Debug, Clone)]
pub struct FluidConfig {
    /// Spring stiffness pulling each column towards its rest height. Default: 0.025.
    pub tension: f32,
    /// Per-tick decay of column speed. Default: 0.025.
    pub dampening: f32,
    /// Energy transfer between neighbouring columns. Default: 0.25.
    pub spread: f32,
    /// Neighbour relaxation passes per tick. Default: 8.
    pub relaxation_passes: u32,
    /// Horizontal distance between columns. Default: 0.04.
    pub column_separation: f32,
    /// Fluid density. Default: 0.85.
    pub density: f32,
    /// Default: 0.25.
    pub drag_coefficient: f32,
    /// Default: 0.25.
    pub lift_coefficient: f32,
    /// Cap on the drag magnitude of a single edge. Default: 2000.
    pub max_drag: f32,
    /// Cap on the lift magnitude of a single edge. Default: 500.
    pub max_lift: f32,
    /// Fraction of a body's downward velocity handed to a column it hits. Default: 0.03.
    pub impact_velocity_scale: f32,
    /// Minimum downward body speed that produces splash particles. Default: 3.
    pub splash_speed_threshold: f32,
    /// Particles per burst are `floor(speed / divisor)`. Default: 8.
    pub particle_burst_divisor: f32,
    /// Upper bound on particles from a single burst. Default: 64.
    pub max_burst_particles: usize,
    /// Particle radii are drawn uniformly from `[min, max)`. Default: [0.025, 0.05].
    pub particle_radius_range: [f32; 2],
    /// Chance a particle is kicked straight up instead of away from the body. Default: 0.25.
    pub vertical_kick_probability: f64,
    /// Overlap area a body needs before it disturbs the surface. Default: 0.3.
    pub min_wave_area: f32,
    /// Simulate surface columns. Default: true.
    pub waves: bool,
    /// Emit splash particles on impact. Default: true.
    pub splash_particles: bool,
    /// Optional empirical spin damping. Default: `None`.
    pub angular_correction: Option<AngularCorrection>,
    /// Seed for the splash particle RNG; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            tension: 0.025,
            dampening: 0.025,
            spread: 0.25,
            relaxation_passes: 8,
            column_separation: 0.04,
            density: 0.85,
            drag_coefficient: 0.25,
            lift_coefficient: 0.25,
            max_drag: 2000.0,
            max_lift: 500.0,
            impact_velocity_scale: 0.03,
            splash_speed_threshold: 3.0,
            particle_burst_divisor: 8.0,
            max_burst_particles: 64,
            particle_radius_range: [0.025, 0.05],
            vertical_kick_probability: 0.25,
            min_wave_area: 0.3,
            waves: true,
            splash_particles: true,
            angular_correction: None,
            seed: None,
        }
    }
}

impl FluidConfig {
    /// Config with waves and splash particles switched as requested.
    pub fn with_effects(waves: bool, splash_particles: bool) -> Self {
        Self {
            waves,
            splash_particles,
            ..Self::default()
        }
    }

    /// Reject values that would make the simulation meaningless.
    pub fn validate(&self) -> Result<(), FluidError> {
        non_negative("tension", self.tension)?;
        non_negative("dampening", self.dampening)?;
        non_negative("spread", self.spread)?;
        non_negative("density", self.density)?;
        non_negative("drag_coefficient", self.drag_coefficient)?;
        non_negative("lift_coefficient", self.lift_coefficient)?;
        non_negative("max_drag", self.max_drag)?;
        non_negative("max_lift", self.max_lift)?;
        non_negative("impact_velocity_scale", self.impact_velocity_scale)?;
        non_negative("splash_speed_threshold", self.splash_speed_threshold)?;
        non_negative("min_wave_area", self.min_wave_area)?;

        if !(self.column_separation.is_finite() && self.column_separation > 0.0) {
            return Err(invalid("column_separation", "must be finite and positive"));
        }
        if self.relaxation_passes == 0 {
            return Err(invalid("relaxation_passes", "must be at least 1"));
        }
        if !(self.particle_burst_divisor.is_finite() && self.particle_burst_divisor > 0.0) {
            return Err(invalid("particle_burst_divisor", "must be finite and positive"));
        }
        let [lo, hi] = self.particle_radius_range;
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo < hi) {
            return Err(invalid(
                "particle_radius_range",
                "must be positive with min < max",
            ));
        }
        if !(0.0..=1.0).contains(&self.vertical_kick_probability) {
            return Err(invalid("vertical_kick_probability", "must lie in [0, 1]"));
        }
        if let Some(correction) = self.angular_correction {
            if !correction.bias.is_finite() {
                return Err(invalid("angular_correction", "bias must be finite"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> FluidError {
    FluidError::InvalidConfig { field, reason }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), FluidError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be finite and non-negative"))
    }
}
