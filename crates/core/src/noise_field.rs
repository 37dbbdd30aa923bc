//! Coherent 2D noise sampling.
//!
//! A [`NoiseField`] maps two continuous coordinates to a value in [-1, 1].
//! Nearby inputs give nearby outputs, which is what lets drifting points and
//! blob outlines vary smoothly.
//!
//! All implementations are deterministic: same seed and inputs, same output.

use noise::{NoiseFn, OpenSimplex};

/// A source of smoothly varying scalar noise.
pub trait NoiseField: Send + Sync {
    /// Samples the field at `(a, b)`. The result lies in [-1, 1] for any
    /// finite input.
    fn sample(&self, a: f64, b: f64) -> f64;
}

/// OpenSimplex noise clamped to [-1, 1].
#[derive(Clone)]
pub struct SimplexNoise {
    noise: OpenSimplex,
    seed: u32,
}

impl SimplexNoise {
    /// Creates a noise field with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
            seed,
        }
    }

    /// Seed the field was built with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl std::fmt::Debug for SimplexNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexNoise")
            .field("seed", &self.seed)
            .finish()
    }
}

impl NoiseField for SimplexNoise {
    fn sample(&self, a: f64, b: f64) -> f64 {
        self.noise.get([a, b]).clamp(-1.0, 1.0)
    }
}

impl<N: NoiseField + ?Sized> NoiseField for &N {
    fn sample(&self, a: f64, b: f64) -> f64 {
        (**self).sample(a, b)
    }
}

impl<N: NoiseField + ?Sized> NoiseField for Box<N> {
    fn sample(&self, a: f64, b: f64) -> f64 {
        (**self).sample(a, b)
    }
}

/// Linearly remaps `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// No clamping is applied. A degenerate input range maps everything to
/// `out_min`.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}
