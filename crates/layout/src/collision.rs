//! Duplicate-seed avoidance.
//!
//! Two points that round to the same pixel would hand the tessellator a
//! duplicate seed. After every advance the layout makes one pass over all
//! ordered pairs and nudges the first point of each colliding pair further
//! along its noise path. The pass is not repeated: a nudge that lands on a
//! third point stays put until the next tick.

use crate::point::DriftingPoint;
use cellblob_core::noise_field::NoiseField;

/// Offset shift applied to a colliding point on both axes.
pub const COLLISION_NUDGE: f64 = 0.025;

/// Runs one best-effort pass over every ordered pair `(i, j)`, `i != j`.
///
/// Returns the number of nudges applied.
pub fn resolve_collisions(points: &mut [DriftingPoint], nudge: f64, noise: &impl NoiseField) -> usize {
    let mut nudges = 0;
    for i in 0..points.len() {
        for j in 0..points.len() {
            if i == j || !points[i].collides_with(&points[j]) {
                continue;
            }
            log::trace!(
                "seed {i} collides with seed {j} at ({}, {}), nudging",
                points[i].x(),
                points[i].y()
            );
            points[i].nudge(nudge, noise);
            nudges += 1;
        }
    }
    nudges
}

/// Counts unordered pairs that currently share a position.
pub fn count_collisions(points: &[DriftingPoint]) -> usize {
    points
        .iter()
        .enumerate()
        .flat_map(|(i, a)| points[i + 1..].iter().map(move |b| (a, b)))
        .filter(|(a, b)| a.collides_with(b))
        .count()
}
