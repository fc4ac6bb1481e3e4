//! Free-surface waves as a chain of damped spring columns.
//!
//! Each tick runs two phases:
//!
//! 1. Local integrate: every column springs towards its rest height.
//! 2. Neighbour relaxation: a fixed number of passes where each column pushes
//!    its neighbours' speed and height by `spread * height difference`. All
//!    deltas of a pass are taken from the heights before that pass.
//!
//! Bodies entering the fluid kick the columns they cover; a column remembers
//! the body ("owner") so one entry counts as one impact.

use glam::Vec2;

use crate::geometry::{Aabb2d, ConvexPolygon};

use super::config::FluidConfig;

/// Spring-chain tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    pub tension: f32,
    pub dampening: f32,
    pub spread: f32,
    pub relaxation_passes: u32,
    pub impact_velocity_scale: f32,
}

impl WaveParams {
    pub fn from_config(config: &FluidConfig) -> Self {
        Self {
            tension: config.tension,
            dampening: config.dampening,
            spread: config.spread,
            relaxation_passes: config.relaxation_passes,
            impact_velocity_scale: config.impact_velocity_scale,
        }
    }
}

impl Default for WaveParams {
    fn default() -> Self {
        Self::from_config(&FluidConfig::default())
    }
}

/// One surface sample at a fixed x.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterColumn<B> {
    pub x: f32,
    /// Bottom of the fluid under this column.
    pub baseline: f32,
    /// Rest height of the surface.
    pub target_height: f32,
    pub height: f32,
    pub speed: f32,
    owner: Option<B>,
}

impl<B: Copy + Eq> WaterColumn<B> {
    pub fn new(x: f32, baseline: f32, target_height: f32) -> Self {
        Self {
            x,
            baseline,
            target_height,
            height: target_height,
            speed: 0.0,
            owner: None,
        }
    }

    /// Body currently depressing this column.
    pub fn owner(&self) -> Option<B> {
        self.owner
    }

    /// Height above rest (negative when depressed).
    #[inline]
    pub fn displacement(&self) -> f32 {
        self.height - self.target_height
    }

    #[inline]
    fn integrate(&mut self, tension: f32, dampening: f32) {
        let x = self.target_height - self.height;
        self.speed += tension * x - dampening * self.speed;
        self.height += self.speed;
    }
}

/// A column just hit by a body moving down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnImpact<B> {
    pub column: usize,
    pub body: B,
    /// Point on the surface where the hit happened.
    pub point: Vec2,
    /// Body's vertical velocity at impact (negative).
    pub body_velocity_y: f32,
    pub body_x: f32,
    pub target_height: f32,
}

/// Fixed-size, uniformly spaced column array spanning the fluid's width.
#[derive(Debug, Clone)]
pub struct WaveSurface<B> {
    columns: Vec<WaterColumn<B>>,
    params: WaveParams,
    separation: f32,
    left_deltas: Vec<f32>,
    right_deltas: Vec<f32>,
}

impl<B: Copy + Eq> WaveSurface<B> {
    /// `count` columns starting at `left_x`, `separation` apart, all resting at
    /// `surface` over a bottom at `baseline`.
    pub fn new(
        left_x: f32,
        separation: f32,
        count: usize,
        baseline: f32,
        surface: f32,
        params: WaveParams,
    ) -> Self {
        let columns = (0..count)
            .map(|i| WaterColumn::new(left_x + i as f32 * separation, baseline, surface))
            .collect();
        Self {
            columns,
            params,
            separation,
            left_deltas: vec![0.0; count],
            right_deltas: vec![0.0; count],
        }
    }

    pub fn columns(&self) -> &[WaterColumn<B>] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Directly disturb one column, e.g. for scripted splashes.
    pub fn set_speed(&mut self, index: usize, speed: f32) {
        if let Some(column) = self.columns.get_mut(index) {
            column.speed = speed;
        }
    }

    pub fn set_height(&mut self, index: usize, height: f32) {
        if let Some(column) = self.columns.get_mut(index) {
            column.height = height;
        }
    }

    /// One full tick: integrate, then relax.
    pub fn step(&mut self) {
        self.integrate();
        self.relax();
    }

    /// Local damped-spring update of every column.
    pub fn integrate(&mut self) {
        let WaveParams {
            tension, dampening, ..
        } = self.params;
        for column in &mut self.columns {
            column.integrate(tension, dampening);
        }
    }

    /// Neighbour relaxation passes.
    pub fn relax(&mut self) {
        let n = self.columns.len();
        let spread = self.params.spread;
        for _ in 0..self.params.relaxation_passes {
            for i in 0..n {
                if i > 0 {
                    let delta = spread * (self.columns[i].height - self.columns[i - 1].height);
                    self.left_deltas[i] = delta;
                    self.columns[i - 1].speed += delta;
                }
                if i + 1 < n {
                    let delta = spread * (self.columns[i].height - self.columns[i + 1].height);
                    self.right_deltas[i] = delta;
                    self.columns[i + 1].speed += delta;
                }
            }
            for i in 0..n {
                if i > 0 {
                    self.columns[i - 1].height += self.left_deltas[i];
                }
                if i + 1 < n {
                    self.columns[i + 1].height += self.right_deltas[i];
                }
            }
        }
    }

    /// Resolve a submerged body against the columns it covers.
    ///
    /// `footprints` holds every overlap polygon of the body's fixtures this
    /// tick; a column counts as covered when any of them spans its x.
    /// Releases columns the body no longer covers or has left vertically
    /// (above the rest surface or below the bottom). When `allow_impacts` is
    /// set and the body moves down, every free column under its footprint
    /// takes a scaled share of the body's velocity and becomes owned by it.
    pub fn register_impact(
        &mut self,
        body: B,
        footprints: &[ConvexPolygon],
        body_position: Vec2,
        body_velocity: Vec2,
        allow_impacts: bool,
    ) -> Vec<ColumnImpact<B>> {
        let mut impacts = Vec::new();
        let bounds: Vec<Aabb2d> = footprints.iter().filter_map(ConvexPolygon::aabb).collect();
        if bounds.is_empty() {
            self.release(body);
            return impacts;
        }
        let scale = self.params.impact_velocity_scale;

        for (index, column) in self.columns.iter_mut().enumerate() {
            let owned = column.owner == Some(body);
            let covered = bounds.iter().any(|b| b.contains_x(column.x));

            if owned
                && (!covered
                    || body_position.y > column.target_height
                    || body_position.y < column.baseline)
            {
                column.owner = None;
                continue;
            }

            if !allow_impacts || !covered || column.owner.is_some() || !(body_velocity.y < 0.0) {
                continue;
            }
            let depressed = footprints
                .iter()
                .filter_map(|footprint| footprint_bottom_at(footprint, column.x))
                .any(|bottom| bottom < column.height);
            if !depressed {
                continue;
            }

            column.owner = Some(body);
            column.speed = body_velocity.y * scale;
            impacts.push(ColumnImpact {
                column: index,
                body,
                point: Vec2::new(column.x, column.height),
                body_velocity_y: body_velocity.y,
                body_x: body_position.x,
                target_height: column.target_height,
            });
        }
        impacts
    }

    /// Clear every column owned by `body`.
    pub fn release(&mut self, body: B) {
        for column in &mut self.columns {
            if column.owner == Some(body) {
                column.owner = None;
            }
        }
    }

    /// Clear owners for which `keep` returns false.
    pub fn retain_owners(&mut self, mut keep: impl FnMut(&B) -> bool) {
        for column in &mut self.columns {
            if column.owner.as_ref().is_some_and(|owner| !keep(owner)) {
                column.owner = None;
            }
        }
    }

    /// Surface height at `x`, linear between columns and clamped at the ends.
    pub fn height_at(&self, x: f32) -> Option<f32> {
        let first = self.columns.first()?;
        let last = self.columns.last()?;
        if x <= first.x || self.columns.len() == 1 {
            return Some(first.height);
        }
        if x >= last.x {
            return Some(last.height);
        }
        let t = (x - first.x) / self.separation;
        let i = (t.floor() as usize).min(self.columns.len() - 2);
        let a = &self.columns[i];
        let b = &self.columns[i + 1];
        let frac = ((x - a.x) / (b.x - a.x)).clamp(0.0, 1.0);
        Some(a.height + (b.height - a.height) * frac)
    }

    /// Sum of `|height - target_height|` over all columns.
    pub fn total_deviation(&self) -> f32 {
        self.columns.iter().map(|c| c.displacement().abs()).sum()
    }

    /// Quad between each adjacent column pair: bottom-left, top-left,
    /// top-right, bottom-right.
    pub fn quads(&self) -> impl Iterator<Item = [Vec2; 4]> + '_ {
        self.columns.windows(2).map(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            [
                Vec2::new(a.x, a.baseline),
                Vec2::new(a.x, a.height),
                Vec2::new(b.x, b.height),
                Vec2::new(b.x, b.baseline),
            ]
        })
    }
}

/// Lowest point of the polygon boundary on the vertical line at `x`.
fn footprint_bottom_at(polygon: &ConvexPolygon, x: f32) -> Option<f32> {
    polygon
        .edges()
        .filter_map(|(a, b)| {
            let (lo, hi) = if a.x <= b.x { (a, b) } else { (b, a) };
            if x < lo.x || x > hi.x {
                return None;
            }
            let dx = hi.x - lo.x;
            if dx <= f32::EPSILON {
                return Some(lo.y.min(hi.y));
            }
            Some(lo.y + (hi.y - lo.y) * (x - lo.x) / dx)
        })
        .reduce(f32::min)
}
