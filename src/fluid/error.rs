//! Fluid construction errors.
//!
//! Only setup can fail. Degenerate geometry and stale handles during a tick
//! are skipped, never reported.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FluidError {
    #[error("invalid fluid config `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    #[error("fluid half extents must be finite and positive, got ({x}, {y})")]
    InvalidExtents { x: f32, y: f32 },
    #[error("fluid width {width} at separation {separation} needs {count} columns (limit {limit})")]
    TooManyColumns {
        width: f32,
        separation: f32,
        count: usize,
        limit: usize,
    },
}
