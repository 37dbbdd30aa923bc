//! Closed Catmull-Rom curves as cubic Béziers.
//!
//! Each span between consecutive points `p1 -> p2` becomes one cubic Bézier
//! whose control points follow the neighbouring tangents:
//! `c1 = p1 + (p2 - p0) * tension / 6` and `c2 = p2 - (p3 - p1) * tension / 6`,
//! with indices wrapping around. With `tension = 1` this is the uniform
//! Catmull-Rom spline, which passes through every input point.

use cellblob_core::error::SceneError;
use glam::DVec2;

/// One cubic Bézier span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub start: DVec2,
    pub ctrl1: DVec2,
    pub ctrl2: DVec2,
    pub end: DVec2,
}

impl CubicSegment {
    /// Evaluates the span at `t` in [0, 1].
    pub fn point_at(&self, t: f64) -> DVec2 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.ctrl1 * (3.0 * u * u * t)
            + self.ctrl2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }
}

/// A smooth closed curve through an ordered point sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedSpline {
    segments: Vec<CubicSegment>,
}

impl ClosedSpline {
    /// Minimum number of points that describe a closed curve.
    pub const MIN_POINTS: usize = 3;

    /// Fits a closed curve through `points`. The last point connects back to
    /// the first.
    pub fn through(points: &[DVec2], tension: f64) -> Result<Self, SceneError> {
        let n = points.len();
        if n < Self::MIN_POINTS {
            return Err(SceneError::NotEnoughPoints {
                min: Self::MIN_POINTS,
                got: n,
            });
        }
        if !tension.is_finite() {
            return Err(SceneError::invalid_param("tension", tension, "must be finite"));
        }
        let k = tension / 6.0;
        let segments = (0..n)
            .map(|i| {
                let p0 = points[(i + n - 1) % n];
                let p1 = points[i];
                let p2 = points[(i + 1) % n];
                let p3 = points[(i + 2) % n];
                CubicSegment {
                    start: p1,
                    ctrl1: p1 + (p2 - p0) * k,
                    ctrl2: p2 - (p3 - p1) * k,
                    end: p2,
                }
            })
            .collect();
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[CubicSegment] {
        &self.segments
    }

    /// Point at parameter `t` of span `segment`, or `None` past the last span.
    pub fn point_at(&self, segment: usize, t: f64) -> Option<DVec2> {
        self.segments.get(segment).map(|s| s.point_at(t))
    }

    /// Samples `steps` points per span, starting at each span's start.
    pub fn flatten(&self, steps: usize) -> Vec<DVec2> {
        let steps = steps.max(1);
        self.segments
            .iter()
            .flat_map(|s| (0..steps).map(move |k| s.point_at(k as f64 / steps as f64)))
            .collect()
    }

    /// SVG path data: one move, one `C` per span, closed with `Z`.
    pub fn to_svg_path(&self) -> String {
        let Some(first) = self.segments.first() else {
            return String::new();
        };
        let curves: Vec<String> = self
            .segments
            .iter()
            .map(|s| {
                format!(
                    "C{:.3},{:.3},{:.3},{:.3},{:.3},{:.3}",
                    s.ctrl1.x, s.ctrl1.y, s.ctrl2.x, s.ctrl2.y, s.end.x, s.end.y
                )
            })
            .collect();
        format!(
            "M{:.3},{:.3}{}Z",
            first.start.x,
            first.start.y,
            curves.join("")
        )
    }
}
