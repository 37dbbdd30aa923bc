#![deny(unsafe_code)]
//! Drifting-point Voronoi layout.
//!
//! Seeds wander through a noise field; every frame their bounded Voronoi
//! tessellation is recomputed and each shape glides toward the centroid and
//! inscribed radius of its cell. See [`Layout`] for the per-frame cycle.

pub mod collision;
pub mod layout;
pub mod orientation;
pub mod params;
pub mod point;
pub mod tessellation;

pub use layout::{CellGeometry, Layout, ShapeFrame, TickOutcome};
pub use params::LayoutParams;
pub use point::DriftingPoint;
pub use tessellation::{Cell, Tessellator, VoronoiTessellator};
