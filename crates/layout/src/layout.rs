//! The drifting Voronoi layout.
//!
//! A [`Layout`] owns a set of [`DriftingPoint`] seeds and, index-aligned with
//! them, the interpolated geometry of each shape. Every [`update`](Layout::update)
//! tessellates the current seeds, glides each shape toward its new cell, then
//! moves the seeds on. Shapes can only be appended, and appending pushes to
//! every aligned sequence at once, so index `i` always names the same shape.

use crate::collision::resolve_collisions;
use crate::orientation::Orientation;
use crate::params::LayoutParams;
use crate::point::DriftingPoint;
use crate::tessellation::{Cell, Tessellator, VoronoiTessellator};
use cellblob_core::error::SceneError;
use cellblob_core::interpolate::Interpolator;
use cellblob_core::noise_field::{NoiseField, SimplexNoise};
use cellblob_core::prng::{RandomSource, Xorshift64};
use cellblob_core::seed::Seed;
use cellblob_core::timeline::{TaskHandle, Timeline};
use glam::DVec2;
use serde::Serialize;

/// Interpolated geometry of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

/// Everything a renderer needs to place one shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeFrame {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub rotation: f64,
}

/// What one [`Layout::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Whether shapes were retargeted to a fresh tessellation.
    pub retargeted: bool,
    /// Collision nudges applied after the seeds moved.
    pub nudges: usize,
}

#[derive(Debug, Clone)]
struct CellState {
    center_x: Interpolator,
    center_y: Interpolator,
    radius: Interpolator,
}

impl CellState {
    fn at(center: DVec2, radius: f64) -> Self {
        Self {
            center_x: Interpolator::new(center.x),
            center_y: Interpolator::new(center.y),
            radius: Interpolator::new(radius),
        }
    }

    fn geometry(&self) -> CellGeometry {
        CellGeometry {
            center_x: self.center_x.value(),
            center_y: self.center_y.value(),
            radius: self.radius.value(),
        }
    }

    fn tick(&mut self, now: f64) {
        self.center_x.tick(now);
        self.center_y.tick(now);
        self.radius.tick(now);
    }

    fn retarget(&mut self, cell: &Cell, now: f64, duration: f64) {
        self.center_x.retarget(cell.centroid.x, now, duration);
        self.center_y.retarget(cell.centroid.y, now, duration);
        self.radius.retarget(cell.inscribed_radius, now, duration * 2.0);
    }
}

/// Deferred mutations a layout schedules on itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutTask {
    RestoreNoiseIncrement,
}

/// Drifting seeds plus the shapes that follow their cells.
pub struct Layout<N = SimplexNoise, T = VoronoiTessellator, R = Xorshift64> {
    params: LayoutParams,
    noise: N,
    tessellator: T,
    rng: R,
    points: Vec<DriftingPoint>,
    cells: Vec<CellState>,
    orientations: Vec<Orientation>,
    timeline: Timeline<LayoutTask>,
    agitation: Option<TaskHandle>,
    noise_increment: f64,
    now: f64,
}

impl Layout {
    /// Creates a layout with OpenSimplex drift and Voronoi cells, all
    /// randomness derived from `seed`.
    pub fn new(params: LayoutParams, seed: u64) -> Result<Self, SceneError> {
        let mut rng = Xorshift64::new(seed);
        let noise = SimplexNoise::new(rng.next_noise_seed());
        Self::with_services(params, noise, VoronoiTessellator, rng)
    }

    /// Creates a layout from a reproducible run description.
    pub fn from_seed(seed: &Seed) -> Result<Self, SceneError> {
        seed.validate()?;
        Self::new(LayoutParams::from_seed(seed), seed.seed)
    }
}

impl<N: NoiseField, T: Tessellator, R: RandomSource> Layout<N, T, R> {
    /// Creates a layout over explicit noise and tessellation services.
    ///
    /// Seeds start at uniformly random canvas positions and the shapes start
    /// settled on the first tessellation. If that tessellation is degenerate
    /// each shape starts on its seed with radius 0 instead.
    pub fn with_services(
        params: LayoutParams,
        noise: N,
        tessellator: T,
        mut rng: R,
    ) -> Result<Self, SceneError> {
        params.validate()?;
        let canvas = DVec2::new(params.width, params.height);

        let points: Vec<DriftingPoint> = (0..params.shapes)
            .map(|_| {
                let position = DVec2::new(
                    rng.next_range(0.0, params.width),
                    rng.next_range(0.0, params.height),
                );
                DriftingPoint::with_random_offsets(position, canvas, &mut rng)
            })
            .collect();
        let orientations = (0..params.shapes)
            .map(|_| Orientation::random(params.rotation_increment, &mut rng))
            .collect();

        let positions: Vec<DVec2> = points.iter().map(DriftingPoint::position).collect();
        let initial = tessellator.tessellate(&positions, params.width, params.height);
        let cells = if initial.len() == points.len() {
            initial
                .iter()
                .map(|cell| CellState::at(cell.centroid, cell.inscribed_radius))
                .collect()
        } else {
            log::debug!(
                "initial tessellation returned {} cells for {} seeds; starting shapes on their seeds",
                initial.len(),
                points.len()
            );
            positions.iter().map(|&p| CellState::at(p, 0.0)).collect()
        };

        Ok(Self {
            params,
            noise,
            tessellator,
            rng,
            points,
            cells,
            orientations,
            timeline: Timeline::new(),
            agitation: None,
            noise_increment: params.noise_increment,
            now: 0.0,
        })
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Number of shapes. Equal to the length of every aligned sequence.
    pub fn max_size(&self) -> usize {
        self.points.len()
    }

    /// Latest clock time seen by the layout.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// The seeds, index-aligned with [`cells`](Self::cells).
    pub fn points(&self) -> &[DriftingPoint] {
        &self.points
    }

    /// Interpolated geometry of shape `index`.
    pub fn cell(&self, index: usize) -> Option<CellGeometry> {
        self.cells.get(index).map(CellState::geometry)
    }

    /// Interpolated geometry of every shape.
    pub fn cells(&self) -> Vec<CellGeometry> {
        self.cells.iter().map(CellState::geometry).collect()
    }

    /// Geometry plus rotation of every shape.
    pub fn frames(&self) -> Vec<ShapeFrame> {
        self.cells
            .iter()
            .zip(&self.orientations)
            .map(|(cell, orientation)| {
                let g = cell.geometry();
                ShapeFrame {
                    center_x: g.center_x,
                    center_y: g.center_y,
                    radius: g.radius,
                    rotation: orientation.degrees(&self.noise),
                }
            })
            .collect()
    }

    /// Noise increment currently applied to every seed.
    pub fn noise_increment(&self) -> f64 {
        self.noise_increment
    }

    /// Whether an agitation burst is in progress.
    pub fn is_agitated(&self) -> bool {
        self.agitation.is_some()
    }

    /// Number of deferred tasks still waiting to fire.
    pub fn pending_tasks(&self) -> usize {
        self.timeline.len()
    }

    /// Moves the clock to `now`, fires due deferred tasks and advances every
    /// interpolation. The clock never runs backwards.
    pub fn advance_clock(&mut self, now: f64) {
        self.now = self.now.max(now);
        for task in self.timeline.drain_due(self.now) {
            match task {
                LayoutTask::RestoreNoiseIncrement => self.restore_noise_increment(),
            }
        }
        for cell in &mut self.cells {
            cell.tick(self.now);
        }
    }

    /// Runs one frame at clock time `now`.
    ///
    /// Tessellates the current seeds and, when every seed produced a cell,
    /// glides each shape toward its cell: centres over `retarget_duration`,
    /// radii over twice that. A degenerate tessellation leaves every shape
    /// untouched for this frame. The seeds then advance and colliding seeds
    /// get one nudge each.
    pub fn update(&mut self, now: f64) -> TickOutcome {
        self.advance_clock(now);

        let positions: Vec<DVec2> = self.points.iter().map(DriftingPoint::position).collect();
        let raw = self
            .tessellator
            .tessellate(&positions, self.params.width, self.params.height);

        let retargeted = raw.len() == self.max_size();
        if retargeted {
            let duration = self.params.retarget_duration;
            for (state, cell) in self.cells.iter_mut().zip(&raw) {
                state.retarget(cell, self.now, duration);
            }
        } else {
            log::debug!(
                "tessellation returned {} cells for {} seeds; keeping previous targets",
                raw.len(),
                self.max_size()
            );
        }

        for point in &mut self.points {
            point.advance(&self.noise);
        }
        for orientation in &mut self.orientations {
            orientation.advance();
        }
        let nudges = resolve_collisions(&mut self.points, self.params.collision_nudge, &self.noise);

        TickOutcome { retargeted, nudges }
    }

    /// Appends a shape whose seed starts at `(x, y)` and whose geometry
    /// starts there with radius 0. Returns the new shape's index.
    ///
    /// Existing shapes keep their indices and geometry. The new seed drifts
    /// at whatever increment the others currently use.
    pub fn add_shape(&mut self, x: f64, y: f64) -> usize {
        let position = DVec2::new(x, y);
        let canvas = DVec2::new(self.params.width, self.params.height);
        let mut point = DriftingPoint::with_random_offsets(position, canvas, &mut self.rng);
        point.set_noise_increment(self.noise_increment);

        self.points.push(point);
        self.cells.push(CellState::at(position, 0.0));
        self.orientations
            .push(Orientation::random(self.params.rotation_increment, &mut self.rng));
        self.max_size() - 1
    }

    /// Puts every seed into the agitated increment and schedules the
    /// default increment to come back after `agitation_window`.
    ///
    /// Triggering again during a burst cancels the pending restore and
    /// starts a fresh window.
    pub fn trigger_agitation(&mut self, now: f64) -> TaskHandle {
        if let Some(previous) = self.agitation.take() {
            self.timeline.cancel(previous);
        }
        let start = self.now.max(now);
        self.set_noise_increment(self.params.agitated_increment);
        let handle = self.timeline.schedule(
            start,
            self.params.agitation_window,
            LayoutTask::RestoreNoiseIncrement,
        );
        self.agitation = Some(handle);
        log::debug!(
            "agitation started at {start:.3}s for {:.3}s",
            self.params.agitation_window
        );
        handle
    }

    /// Cancels a deferred task before it fires. Returns `false` if it
    /// already fired or was cancelled.
    pub fn cancel_task(&mut self, handle: TaskHandle) -> bool {
        if self.agitation == Some(handle) {
            self.agitation = None;
        }
        self.timeline.cancel(handle)
    }

    /// Cancels every pending deferred task. Call before tearing the layout
    /// down mid-burst. Returns how many tasks were dropped.
    pub fn shutdown(&mut self) -> usize {
        self.agitation = None;
        self.timeline.cancel_all()
    }

    fn restore_noise_increment(&mut self) {
        self.agitation = None;
        self.set_noise_increment(self.params.noise_increment);
        log::debug!("agitation ended at {:.3}s", self.now);
    }

    fn set_noise_increment(&mut self, increment: f64) {
        self.noise_increment = increment;
        for point in &mut self.points {
            point.set_noise_increment(increment);
        }
    }
}
