//! Slow per-shape rotation drift.

use cellblob_core::noise_field::{map_range, NoiseField};
use cellblob_core::prng::RandomSource;

/// Per-tick offset step of the rotation noise.
pub const ROTATION_INCREMENT: f64 = 0.000375;

/// A rotation angle wandering through a noise field.
#[derive(Debug, Clone, PartialEq)]
pub struct Orientation {
    x_off: f64,
    y_off: f64,
    increment: f64,
}

impl Orientation {
    pub fn new(x_off: f64, y_off: f64, increment: f64) -> Self {
        Self {
            x_off,
            y_off,
            increment,
        }
    }

    /// An orientation starting from random offsets.
    pub fn random(increment: f64, rng: &mut impl RandomSource) -> Self {
        let x_off = rng.next_offset();
        let y_off = rng.next_offset();
        Self::new(x_off, y_off, increment)
    }

    pub fn advance(&mut self) {
        self.x_off += self.increment;
        self.y_off += self.increment;
    }

    /// Current angle in degrees, in [0, 360].
    pub fn degrees(&self, noise: &impl NoiseField) -> f64 {
        map_range(noise.sample(self.x_off, self.y_off), -1.0, 1.0, 0.0, 360.0)
    }
}
