//! Error types for the cellblob core.
//!
//! Every variant describes a caller-side programming error caught at
//! construction time. Runtime degeneracies (tessellation count mismatch,
//! duplicate seeds) are corrected internally and never surface here.

use thiserror::Error;

/// Errors produced when constructing scene components.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    /// Canvas width or height was zero, negative, or not finite.
    #[error("invalid canvas dimensions {width}x{height}: both must be finite and positive")]
    InvalidDimensions { width: f64, height: f64 },

    /// A layout was asked to hold zero shapes.
    #[error("invalid shape count: a layout needs at least one shape")]
    InvalidShapeCount,

    /// A blob radius was negative or not finite.
    #[error("invalid radius {0}: must be finite and non-negative")]
    InvalidRadius(f64),

    /// A named scalar parameter (duration, increment, nudge) was out of range.
    #[error("invalid value for '{name}': {value} ({reason})")]
    InvalidParam {
        name: String,
        value: f64,
        reason: String,
    },

    /// A closed curve was requested through too few points.
    #[error("not enough points for a closed curve: need at least {min}, got {got}")]
    NotEnoughPoints { min: usize, got: usize },
}

impl SceneError {
    /// Shorthand for [`SceneError::InvalidParam`].
    pub fn invalid_param(name: &str, value: f64, reason: &str) -> Self {
        SceneError::InvalidParam {
            name: name.to_owned(),
            value,
            reason: reason.to_owned(),
        }
    }
}
