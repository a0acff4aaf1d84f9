//! Error types for planetglide-core.
//!
//! Only configuration can fail. Per-tick numeric input is clamped and logged
//! instead of being reported as an error.

use thiserror::Error;

use crate::waypoint::WaypointId;

/// Errors raised while validating configuration at world-build time.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("invalid range for {field}: min {min} is greater than max {max}")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("waypoint {0} has a zero-length direction")]
    DegenerateWaypoint(WaypointId),

    #[error("cloud {0} has a zero-length direction")]
    DegenerateCloud(usize),

    #[error("start direction must be non-zero")]
    DegenerateStartDirection,

    #[error("particle capacity must be at least 1")]
    EmptyParticlePool,
}

/// Check that `value` is finite and strictly positive.
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Check that `value` is finite.
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

/// Check that `min <= max`.
pub(crate) fn ensure_range(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, min, max })
    }
}
