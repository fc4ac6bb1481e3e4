//! Hydrodynamic forces on a submerged body: buoyancy plus per-edge drag and lift.
//!
//! # Model
//!
//! 1. Buoyancy `density * area * -gravity`, applied at the overlap centroid.
//! 2. For every leading edge of the overlap polygon (outward normal facing
//!    into the relative flow), drag opposing the flow and lift perpendicular
//!    to it, both scaled by `edge_length * density * speed^2`.
//! 3. Optionally an empirical spin-damping torque, see [`AngularCorrection`].
//!
//! Computation is pure; [`HydroForces::apply`] hands the result to the host.

use glam::Vec2;

use crate::geometry::ConvexPolygon;

use super::config::{AngularCorrection, FluidConfig};
use super::host::FluidHost;

/// Edges or velocities shorter than this carry no usable direction.
const DIRECTION_EPSILON: f32 = 1e-6;

/// Drag and lift contributed by one leading edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeForces {
    /// World-space application point.
    pub midpoint: Vec2,
    pub drag: Vec2,
    pub lift: Vec2,
}

/// All forces one fluid exerts on one body during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct HydroForces {
    /// Submerged area.
    pub area: f32,
    /// Buoyancy application point.
    pub centroid: Vec2,
    pub buoyancy: Vec2,
    /// Leading edges only.
    pub edges: Vec<EdgeForces>,
    /// Spin damping, present when [`AngularCorrection`] is enabled.
    pub correction_torque: Option<f32>,
}

impl HydroForces {
    /// Report every force and torque to the host's accumulators.
    pub fn apply<H: FluidHost + ?Sized>(&self, host: &mut H, body: H::Body) {
        host.apply_force_at_point(body, self.buoyancy, self.centroid);
        for edge in &self.edges {
            host.apply_force_at_point(body, edge.drag, edge.midpoint);
            host.apply_force_at_point(body, edge.lift, edge.midpoint);
        }
        if let Some(torque) = self.correction_torque {
            host.apply_torque(body, torque);
        }
    }

    /// Net linear force, ignoring application points.
    pub fn total_force(&self) -> Vec2 {
        self.edges
            .iter()
            .fold(self.buoyancy, |acc, e| acc + e.drag + e.lift)
    }
}

/// Coefficients of the force law, taken from a [`FluidConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    pub density: f32,
    pub drag_coefficient: f32,
    pub lift_coefficient: f32,
    pub max_drag: f32,
    pub max_lift: f32,
    pub angular_correction: Option<AngularCorrection>,
}

impl Default for ForceModel {
    fn default() -> Self {
        Self::from_config(&FluidConfig::default())
    }
}

impl ForceModel {
    pub fn from_config(config: &FluidConfig) -> Self {
        Self {
            density: config.density,
            drag_coefficient: config.drag_coefficient,
            lift_coefficient: config.lift_coefficient,
            max_drag: config.max_drag,
            max_lift: config.max_lift,
            angular_correction: config.angular_correction,
        }
    }

    /// Buoyancy for a submerged area: the displaced mass pushed against gravity.
    #[inline]
    pub fn buoyancy(&self, area: f32, gravity: Vec2) -> Vec2 {
        -gravity * (self.density * area)
    }

    /// Drag and lift of the edge `v0 -> v1` under `relative_velocity`
    /// (body minus fluid, sampled at the edge midpoint).
    ///
    /// `None` for trailing edges, zero-length edges and still flow.
    pub fn edge_forces(&self, v0: Vec2, v1: Vec2, relative_velocity: Vec2) -> Option<EdgeForces> {
        let edge = v1 - v0;
        let edge_length = edge.length();
        let speed = relative_velocity.length();
        if edge_length <= DIRECTION_EPSILON || speed <= DIRECTION_EPSILON {
            return None;
        }
        let edge_dir = edge / edge_length;
        let flow_dir = relative_velocity / speed;

        // Edge direction rotated by -90 degrees: outward for CCW winding.
        let normal = Vec2::new(edge_dir.y, -edge_dir.x);
        let drag_dot = normal.dot(flow_dir);
        if drag_dot < 0.0 {
            return None;
        }

        let scale = edge_length * self.density * speed * speed;

        let drag_mag = (drag_dot * self.drag_coefficient * scale).min(self.max_drag);
        let drag = -flow_dir * drag_mag;

        let lift_dot = edge_dir.dot(flow_dir);
        let lift_mag = (drag_dot * lift_dot * self.lift_coefficient * scale)
            .clamp(-self.max_lift, self.max_lift);
        let lift = flow_dir.perp() * lift_mag;

        Some(EdgeForces {
            midpoint: (v0 + v1) * 0.5,
            drag,
            lift,
        })
    }

    /// Evaluate the full force set for an overlap polygon.
    ///
    /// `relative_velocity` samples body-minus-fluid velocity at a world point;
    /// returning `None` (stale body) skips that edge. The result is `None`
    /// when the overlap encloses no area.
    pub fn compute<V>(
        &self,
        overlap: &ConvexPolygon,
        gravity: Vec2,
        angular_velocity: f32,
        mut relative_velocity: V,
    ) -> Option<HydroForces>
    where
        V: FnMut(Vec2) -> Option<Vec2>,
    {
        let area = overlap.area();
        if !(area > 0.0) {
            return None;
        }
        let centroid = overlap.centroid()?;

        let edges = overlap
            .edges()
            .filter_map(|(v0, v1)| {
                let velocity = relative_velocity((v0 + v1) * 0.5)?;
                self.edge_forces(v0, v1, velocity)
            })
            .collect();

        let correction_torque = self
            .angular_correction
            .map(|c| area * -angular_velocity + c.bias);

        Some(HydroForces {
            area,
            centroid,
            buoyancy: self.buoyancy(area, gravity),
            edges,
            correction_torque,
        })
    }
}
