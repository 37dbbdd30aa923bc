//! Reproducible description of a layout run.
//!
//! A [`Seed`] captures everything needed to replay a scene: canvas size,
//! shape count, parameter overrides, PRNG seed, and how many frames to run
//! at what rate.

use crate::error::SceneError;
use serde::{Deserialize, Serialize};

/// Frames per second used when a seed does not say otherwise.
pub const DEFAULT_FRAME_RATE: f64 = 60.0;

fn default_frame_rate() -> f64 {
    DEFAULT_FRAME_RATE
}

/// Reproducible specification of a layout run.
///
/// Two identical `Seed` values produce bit-identical frame sequences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub width: f64,
    pub height: f64,
    pub shapes: usize,
    pub params: serde_json::Value,
    pub seed: u64,
    pub frames: usize,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
}

impl Seed {
    /// Creates a Seed with empty params, zero frames and the default frame rate.
    pub fn new(width: f64, height: f64, shapes: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            shapes,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            frames: 0,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }

    /// Checks canvas size, shape count and frame rate.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(SceneError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.shapes == 0 {
            return Err(SceneError::InvalidShapeCount);
        }
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(SceneError::invalid_param(
                "frame_rate",
                self.frame_rate,
                "must be finite and positive",
            ));
        }
        Ok(())
    }

    /// Clock time of frame `index`, in seconds.
    pub fn frame_time(&self, index: usize) -> f64 {
        index as f64 / self.frame_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_empty_params_and_no_frames() {
        let s = Seed::new(1080.0, 1080.0, 24, 42);
        assert_eq!(s.shapes, 24);
        assert_eq!(s.frames, 0);
        assert_eq!(s.frame_rate, DEFAULT_FRAME_RATE);
        assert_eq!(s.params, serde_json::json!({}));
    }

    #[test]
    fn json_round_trip_with_custom_params() {
        let mut s = Seed::new(800.0, 600.0, 12, 7);
        s.params = serde_json::json!({"noise_increment": 0.0005});
        s.frames = 300;
        let json = serde_json::to_string(&s).unwrap();
        let restored: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn missing_frame_rate_uses_default() {
        let json = r#"{"width":100,"height":100,"shapes":3,"params":{},"seed":1,"frames":2}"#;
        let s: Seed = serde_json::from_str(json).unwrap();
        assert_eq!(s.frame_rate, DEFAULT_FRAME_RATE);
    }

    #[test]
    fn validate_accepts_valid_seed() {
        assert!(Seed::new(1080.0, 1080.0, 24, 42).validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_dimensions() {
        assert!(Seed::new(0.0, 100.0, 4, 1).validate().is_err());
        assert!(Seed::new(100.0, -5.0, 4, 1).validate().is_err());
        assert!(Seed::new(f64::NAN, 100.0, 4, 1).validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_shapes() {
        assert_eq!(
            Seed::new(100.0, 100.0, 0, 1).validate(),
            Err(SceneError::InvalidShapeCount)
        );
    }

    #[test]
    fn validate_rejects_zero_frame_rate() {
        let mut s = Seed::new(100.0, 100.0, 4, 1);
        s.frame_rate = 0.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn frame_time_scales_with_rate() {
        let mut s = Seed::new(100.0, 100.0, 4, 1);
        s.frame_rate = 50.0;
        assert!((s.frame_time(25) - 0.5).abs() < 1e-12);
    }
}
