#![deny(unsafe_code)]
//! Noise-perturbed blob silhouettes.
//!
//! [`BlobGenerator`] walks a circle through a noise field to produce a closed
//! organic outline; [`ClosedSpline`] smooths any closed point sequence into
//! cubic Bézier spans for drawing.

pub mod generator;
pub mod spline;

pub use generator::{Blob, BlobGenerator, BlobShape, DEFAULT_NUM_POINTS};
pub use spline::{ClosedSpline, CubicSegment};
