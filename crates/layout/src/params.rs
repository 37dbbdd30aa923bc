//! Tunable layout parameters.

use crate::collision::COLLISION_NUDGE;
use crate::orientation::ROTATION_INCREMENT;
use crate::point::{AGITATED_NOISE_INCREMENT, DEFAULT_NOISE_INCREMENT};
use cellblob_core::error::SceneError;
use cellblob_core::params::{param_f64, schema_entry};
use cellblob_core::seed::Seed;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default canvas edge length.
pub const DEFAULT_CANVAS: f64 = 1080.0;
/// Default number of shapes.
pub const DEFAULT_SHAPES: usize = 24;
/// Default seconds for a centre retarget; radius takes twice as long.
pub const DEFAULT_RETARGET_DURATION: f64 = 0.8;
/// Default seconds an agitation burst lasts.
pub const DEFAULT_AGITATION_WINDOW: f64 = 0.1;

/// Everything that shapes a layout run apart from its random seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub width: f64,
    pub height: f64,
    /// Initial number of shapes.
    pub shapes: usize,
    /// Per-tick offset step during normal drift.
    pub noise_increment: f64,
    /// Per-tick offset step during an agitation burst.
    pub agitated_increment: f64,
    /// Seconds an agitation burst lasts before the increment is restored.
    pub agitation_window: f64,
    /// Seconds for centre retargets. Radius retargets take twice as long.
    pub retarget_duration: f64,
    /// Offset shift applied to a seed that collides with another.
    pub collision_nudge: f64,
    /// Per-tick offset step of each shape's rotation noise.
    pub rotation_increment: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS,
            height: DEFAULT_CANVAS,
            shapes: DEFAULT_SHAPES,
            noise_increment: DEFAULT_NOISE_INCREMENT,
            agitated_increment: AGITATED_NOISE_INCREMENT,
            agitation_window: DEFAULT_AGITATION_WINDOW,
            retarget_duration: DEFAULT_RETARGET_DURATION,
            collision_nudge: COLLISION_NUDGE,
            rotation_increment: ROTATION_INCREMENT,
        }
    }
}

impl LayoutParams {
    /// Default tunables on a `width` x `height` canvas with `shapes` shapes.
    pub fn new(width: f64, height: f64, shapes: usize) -> Self {
        Self {
            width,
            height,
            shapes,
            ..Self::default()
        }
    }

    /// Reads tunables from a JSON object, falling back to defaults for
    /// missing or mistyped keys.
    pub fn from_json(width: f64, height: f64, shapes: usize, params: &Value) -> Self {
        let d = Self::default();
        Self {
            width,
            height,
            shapes,
            noise_increment: param_f64(params, "noise_increment", d.noise_increment),
            agitated_increment: param_f64(params, "agitated_increment", d.agitated_increment),
            agitation_window: param_f64(params, "agitation_window", d.agitation_window),
            retarget_duration: param_f64(params, "retarget_duration", d.retarget_duration),
            collision_nudge: param_f64(params, "collision_nudge", d.collision_nudge),
            rotation_increment: param_f64(params, "rotation_increment", d.rotation_increment),
        }
    }

    /// Layout parameters described by a run seed.
    pub fn from_seed(seed: &Seed) -> Self {
        Self::from_json(seed.width, seed.height, seed.shapes, &seed.params)
    }

    /// Current tunables as a JSON object (canvas and shape count excluded).
    pub fn to_json(&self) -> Value {
        json!({
            "noise_increment": self.noise_increment,
            "agitated_increment": self.agitated_increment,
            "agitation_window": self.agitation_window,
            "retarget_duration": self.retarget_duration,
            "collision_nudge": self.collision_nudge,
            "rotation_increment": self.rotation_increment,
        })
    }

    /// Schema describing every tunable, its range and default.
    pub fn param_schema() -> Value {
        let d = Self::default();
        json!({
            "noise_increment": schema_entry(
                "number", json!(d.noise_increment), 0.0, 0.1,
                "Per-frame step of each seed through its noise field"
            ),
            "agitated_increment": schema_entry(
                "number", json!(d.agitated_increment), 0.0, 1.0,
                "Per-frame step while agitated"
            ),
            "agitation_window": schema_entry(
                "number", json!(d.agitation_window), 0.0, 10.0,
                "Seconds before an agitation burst is undone"
            ),
            "retarget_duration": schema_entry(
                "number", json!(d.retarget_duration), 0.0, 10.0,
                "Seconds for shape centres to reach a new cell; radii take twice as long"
            ),
            "collision_nudge": schema_entry(
                "number", json!(d.collision_nudge), 0.0, 1.0,
                "Offset shift applied to a seed sitting on another seed"
            ),
            "rotation_increment": schema_entry(
                "number", json!(d.rotation_increment), 0.0, 0.1,
                "Per-frame step of each shape's rotation noise"
            ),
        })
    }

    /// Rejects empty layouts, bad canvases and negative or non-finite
    /// tunables.
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
        let tunables = [
            ("noise_increment", self.noise_increment),
            ("agitated_increment", self.agitated_increment),
            ("agitation_window", self.agitation_window),
            ("retarget_duration", self.retarget_duration),
            ("collision_nudge", self.collision_nudge),
            ("rotation_increment", self.rotation_increment),
        ];
        for (name, value) in tunables {
            if !value.is_finite() || value < 0.0 {
                return Err(SceneError::invalid_param(
                    name,
                    value,
                    "must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }
}
