//! Noise-driven tessellation seeds.
//!
//! A [`DriftingPoint`] walks two offsets through a noise field, one per axis,
//! and maps each sample onto the canvas. Its position is a pure function of
//! its offsets, so two points with identical state and the same field always
//! land on the same pixel.

use cellblob_core::noise_field::{map_range, NoiseField};
use cellblob_core::prng::RandomSource;
use glam::DVec2;

/// Per-tick offset step during normal drift.
pub const DEFAULT_NOISE_INCREMENT: f64 = 0.0002;

/// Per-tick offset step while agitated (50x the default).
pub const AGITATED_NOISE_INCREMENT: f64 = 0.01;

/// One tessellation seed drifting through a noise field.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftingPoint {
    x: f64,
    y: f64,
    x_off: f64,
    y_off: f64,
    noise_increment: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl DriftingPoint {
    /// Creates a point at `(x, y)` with the given noise offsets.
    ///
    /// The position stays at `(x, y)` until the first [`advance`](Self::advance)
    /// re-derives it from the offsets.
    pub fn new(position: DVec2, x_off: f64, y_off: f64, canvas: DVec2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            x_off,
            y_off,
            noise_increment: DEFAULT_NOISE_INCREMENT,
            canvas_width: canvas.x,
            canvas_height: canvas.y,
        }
    }

    /// Creates a point at `(x, y)` with offsets drawn from `rng`.
    pub fn with_random_offsets(position: DVec2, canvas: DVec2, rng: &mut impl RandomSource) -> Self {
        let x_off = rng.next_offset();
        let y_off = rng.next_offset();
        Self::new(position, x_off, y_off, canvas)
    }

    /// Current discretized position.
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Current noise-space offsets `(x_off, y_off)`.
    pub fn offsets(&self) -> (f64, f64) {
        (self.x_off, self.y_off)
    }

    pub fn noise_increment(&self) -> f64 {
        self.noise_increment
    }

    pub fn set_noise_increment(&mut self, increment: f64) {
        self.noise_increment = increment;
    }

    /// Steps both offsets by the noise increment and re-derives the position.
    pub fn advance(&mut self, noise: &impl NoiseField) {
        self.x_off += self.noise_increment;
        self.y_off += self.noise_increment;
        self.resample(noise);
    }

    /// Shifts both offsets by `delta` and re-derives the position without
    /// applying the regular increment.
    pub fn nudge(&mut self, delta: f64, noise: &impl NoiseField) {
        self.x_off += delta;
        self.y_off += delta;
        self.resample(noise);
    }

    /// Whether two points occupy the same discretized position.
    pub fn collides_with(&self, other: &DriftingPoint) -> bool {
        self.x == other.x && self.y == other.y
    }

    fn resample(&mut self, noise: &impl NoiseField) {
        self.x = map_range(noise.sample(self.x_off, self.x_off), -1.0, 1.0, 0.0, self.canvas_width)
            .floor();
        self.y = map_range(noise.sample(self.y_off, self.y_off), -1.0, 1.0, 0.0, self.canvas_height)
            .floor();
    }
}
