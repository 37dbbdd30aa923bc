//! Organic blob outlines from radial noise.
//!
//! Walking a circle of angles through a noise field gives a radius that
//! wanders smoothly and returns to where it started, since the angle is fed
//! to the noise as the point `(cos θ, sin θ)` rather than as θ itself. Each
//! call draws a fresh noise seed and shape ranges from the caller's random
//! source, so repeated calls give related but different blobs.

use crate::spline::ClosedSpline;
use cellblob_core::error::SceneError;
use cellblob_core::noise_field::{map_range, NoiseField, SimplexNoise};
use cellblob_core::prng::RandomSource;
use glam::DVec2;
use std::f64::consts::TAU;

/// Default number of boundary samples.
pub const DEFAULT_NUM_POINTS: usize = 1024;

/// Per-call shape choices, drawn once and fixed for the whole outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobShape {
    /// Seed of the noise field sampled around the circle.
    pub noise_seed: u32,
    /// Smallest radius the outline may reach.
    pub max_variance: f64,
    /// Size of the noise-space circle; larger means lumpier.
    pub offset_mult: f64,
}

impl BlobShape {
    /// Draws a noise seed, `max_variance` in `[r/4, r/2)` and `offset_mult`
    /// in `[0.5, 1)`.
    pub fn random(max_radius: f64, rng: &mut impl RandomSource) -> Self {
        let noise_seed = rng.next_noise_seed();
        let max_variance = rng.next_range(max_radius / 4.0, max_radius / 2.0);
        let offset_mult = rng.next_range(0.5, 1.0);
        Self {
            noise_seed,
            max_variance,
            offset_mult,
        }
    }
}

/// A closed blob outline, ordered by angle.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub center: DVec2,
    pub max_radius: f64,
    pub shape: BlobShape,
    pub points: Vec<DVec2>,
}

impl Blob {
    /// Fits a closed spline through the outline.
    pub fn to_spline(&self, tension: f64) -> Result<ClosedSpline, SceneError> {
        ClosedSpline::through(&self.points, tension)
    }
}

/// Produces blob outlines with a fixed sample count.
#[derive(Debug, Clone, Copy)]
pub struct BlobGenerator {
    num_points: usize,
}

impl Default for BlobGenerator {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_NUM_POINTS,
        }
    }
}

impl BlobGenerator {
    /// A generator sampling `num_points` angles per outline.
    pub fn new(num_points: usize) -> Result<Self, SceneError> {
        if num_points < ClosedSpline::MIN_POINTS {
            return Err(SceneError::NotEnoughPoints {
                min: ClosedSpline::MIN_POINTS,
                got: num_points,
            });
        }
        Ok(Self { num_points })
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Generates an outline around `center` reaching at most `max_radius`,
    /// drawing the per-call shape from `rng`.
    pub fn generate(
        &self,
        center: DVec2,
        max_radius: f64,
        rng: &mut impl RandomSource,
    ) -> Result<Blob, SceneError> {
        check_radius(max_radius)?;
        let shape = BlobShape::random(max_radius, rng);
        self.generate_with(center, max_radius, shape)
    }

    /// Generates an outline from explicit shape choices.
    pub fn generate_with(
        &self,
        center: DVec2,
        max_radius: f64,
        shape: BlobShape,
    ) -> Result<Blob, SceneError> {
        check_radius(max_radius)?;
        let noise = SimplexNoise::new(shape.noise_seed);
        let points = self.outline(&noise, center, max_radius, &shape);
        Ok(Blob {
            center,
            max_radius,
            shape,
            points,
        })
    }

    fn outline(
        &self,
        noise: &impl NoiseField,
        center: DVec2,
        max_radius: f64,
        shape: &BlobShape,
    ) -> Vec<DVec2> {
        let step = TAU / self.num_points as f64;
        (0..self.num_points)
            .map(|k| {
                let angle = k as f64 * step;
                let (sin, cos) = angle.sin_cos();
                let xoff = map_range(cos, -1.0, 1.0, 0.0, shape.offset_mult);
                let yoff = map_range(sin, -1.0, 1.0, 0.0, shape.offset_mult);
                let radius = map_range(
                    noise.sample(xoff, yoff),
                    -1.0,
                    1.0,
                    shape.max_variance,
                    max_radius,
                );
                center + DVec2::new(cos, sin) * radius
            })
            .collect()
    }
}

fn check_radius(max_radius: f64) -> Result<(), SceneError> {
    if !max_radius.is_finite() || max_radius < 0.0 {
        return Err(SceneError::InvalidRadius(max_radius));
    }
    Ok(())
}
