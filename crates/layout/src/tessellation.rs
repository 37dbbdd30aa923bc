//! Bounded Voronoi tessellation.
//!
//! The [`Tessellator`] trait is the seam between the layout and whatever
//! computes the partition. [`VoronoiTessellator`] builds a Delaunay
//! triangulation with `spade`, then clips the canvas rectangle against the
//! perpendicular bisector of each Delaunay neighbour to get the cell polygon.
//!
//! Output is index-aligned with the input seeds only when every seed yields
//! a cell. Duplicate seeds, seeds `spade` refuses, and cells clipped to
//! nothing are dropped, so callers must compare lengths before trusting the
//! alignment.

use glam::DVec2;
use spade::handles::FixedVertexHandle;
use spade::{DelaunayTriangulation, Point2, Triangulation};

/// Cells with less area than this are treated as empty.
const MIN_CELL_AREA: f64 = 1e-9;

/// One tessellation cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Area centroid of the clipped cell polygon.
    pub centroid: DVec2,
    /// Distance from the centroid to the nearest cell edge.
    pub inscribed_radius: f64,
    /// Cell outline, counter-clockwise.
    pub polygon: Vec<DVec2>,
}

impl Cell {
    /// Builds a cell from its clipped outline. Returns `None` for outlines
    /// without area.
    pub fn from_polygon(polygon: Vec<DVec2>) -> Option<Self> {
        let (area, centroid) = area_and_centroid(&polygon)?;
        if area < MIN_CELL_AREA {
            return None;
        }
        let inscribed_radius = edges(&polygon)
            .map(|(a, b)| distance_to_segment(centroid, a, b))
            .fold(f64::INFINITY, f64::min);
        Some(Self {
            centroid,
            inscribed_radius,
            polygon,
        })
    }

    /// Polygon area.
    pub fn area(&self) -> f64 {
        area_and_centroid(&self.polygon).map_or(0.0, |(area, _)| area)
    }
}

/// Computes a bounded partition of the canvas from seed points.
pub trait Tessellator {
    /// Returns one cell per well-formed seed, in seed order.
    ///
    /// May return fewer cells than seeds when the input is degenerate.
    fn tessellate(&self, points: &[DVec2], width: f64, height: f64) -> Vec<Cell>;
}

impl<T: Tessellator + ?Sized> Tessellator for &T {
    fn tessellate(&self, points: &[DVec2], width: f64, height: f64) -> Vec<Cell> {
        (**self).tessellate(points, width, height)
    }
}

impl<T: Tessellator + ?Sized> Tessellator for Box<T> {
    fn tessellate(&self, points: &[DVec2], width: f64, height: f64) -> Vec<Cell> {
        (**self).tessellate(points, width, height)
    }
}

/// Voronoi tessellation clipped to `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoronoiTessellator;

impl VoronoiTessellator {
    pub fn new() -> Self {
        Self
    }
}

impl Tessellator for VoronoiTessellator {
    fn tessellate(&self, points: &[DVec2], width: f64, height: f64) -> Vec<Cell> {
        let mut triangulation = DelaunayTriangulation::<Point2<f64>>::new();
        let mut handles: Vec<FixedVertexHandle> = Vec::with_capacity(points.len());

        for (i, p) in points.iter().enumerate() {
            match triangulation.insert(Point2::new(p.x, p.y)) {
                // Inserting an existing position returns the existing vertex.
                Ok(handle) if handles.contains(&handle) => {
                    log::trace!("seed {i} duplicates an earlier seed at ({}, {})", p.x, p.y);
                }
                Ok(handle) => handles.push(handle),
                Err(e) => log::trace!("seed {i} rejected by triangulation: {e:?}"),
            }
        }

        let canvas = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(width, 0.0),
            DVec2::new(width, height),
            DVec2::new(0.0, height),
        ];

        handles
            .into_iter()
            .filter_map(|handle| {
                let vertex = triangulation.vertex(handle);
                let site = to_dvec(vertex.position());
                let polygon = vertex
                    .out_edges()
                    .map(|edge| to_dvec(edge.to().position()))
                    .fold(canvas.clone(), |poly, neighbour| {
                        clip_to_bisector(&poly, site, neighbour)
                    });
                Cell::from_polygon(polygon)
            })
            .collect()
    }
}

fn to_dvec(p: Point2<f64>) -> DVec2 {
    DVec2::new(p.x, p.y)
}

/// Keeps the part of a convex polygon closer to `site` than to `other`.
fn clip_to_bisector(polygon: &[DVec2], site: DVec2, other: DVec2) -> Vec<DVec2> {
    let normal = other - site;
    let midpoint = (site + other) * 0.5;
    let side = |v: DVec2| (v - midpoint).dot(normal);

    let mut out = Vec::with_capacity(polygon.len() + 1);
    for (a, b) in edges(polygon) {
        let (sa, sb) = (side(a), side(b));
        if sa <= 0.0 {
            out.push(a);
        }
        if (sa < 0.0 && sb > 0.0) || (sa > 0.0 && sb < 0.0) {
            let t = sa / (sa - sb);
            out.push(a + (b - a) * t);
        }
    }
    out
}

/// Consecutive vertex pairs of a closed polygon.
fn edges(polygon: &[DVec2]) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
    polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(&a, &b)| (a, b))
}

/// Unsigned area and area centroid via the shoelace formula.
fn area_and_centroid(polygon: &[DVec2]) -> Option<(f64, DVec2)> {
    if polygon.len() < 3 {
        return None;
    }
    let (twice_area, weighted) = edges(polygon).fold((0.0, DVec2::ZERO), |(acc, c), (a, b)| {
        let cross = a.perp_dot(b);
        (acc + cross, c + (a + b) * cross)
    });
    if twice_area.abs() < f64::EPSILON {
        return None;
    }
    Some((twice_area.abs() * 0.5, weighted / (3.0 * twice_area)))
}

fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
