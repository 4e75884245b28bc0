//! # Surface Lofting
//!
//! Builds a ruled surface between the two curves of a [`crate::split::CurvePair`].
//!
//! ## Algorithm Overview
//!
//! 1. Estimate the gap between the curves from the first few index-paired
//!    vertices and derive the number of intermediate rows ("cuts")
//! 2. Resample both curves by arc length to the same vertex count
//! 3. Interpolate linearly from curve A (row 0) to curve B (last row)
//! 4. Join consecutive rows with quads, collapsing corners that coincide
//!
//! Vertices are paired by index after resampling, not by nearest position.
//! Strongly irregular curve pairs can therefore give twisted patches.

use config::constants::{EPSILON_TOLERANCE, LOFT_SAMPLE_PAIRS};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::geom::Point3;
use crate::mesh::{Face, Mesh};

/// One lofted patch, vertices laid out row by row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfacePatch {
    /// Vertex positions, `rows * columns` of them, row-major.
    pub vertices: Vec<Point3>,
    /// Faces between consecutive rows.
    pub faces: Vec<Face>,
    /// Number of rows: the two curves plus the cuts between them.
    pub rows: usize,
    /// Vertices per row.
    pub columns: usize,
    /// Intermediate rows.
    pub cuts: usize,
    /// True when the rows wrap around.
    pub closed: bool,
}

impl SurfacePatch {
    /// Index of the vertex at `row`, `column`.
    #[inline]
    pub fn index(&self, row: usize, column: usize) -> u32 {
        (row * self.columns + column) as u32
    }

    /// The patch as a stand-alone mesh.
    pub fn to_mesh(&self) -> Mesh {
        Mesh::from_parts(self.vertices.clone(), self.faces.clone())
    }
}

/// Number of intermediate rows for a curve pair.
///
/// The largest distance over the first [`LOFT_SAMPLE_PAIRS`] index-paired
/// vertices, divided by `threshold` and rounded up.
///
/// # Examples
/// ```
/// use contour_stitch::loft::cut_count;
/// use contour_stitch::{Curve, Point3};
///
/// let a = Curve::open(vec![Point3::ZERO, Point3::X]);
/// let b = Curve::open(vec![Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 0.0, 1.5)]);
/// assert_eq!(cut_count(&a, &b, 0.4), 4);
/// ```
pub fn cut_count(a: &Curve, b: &Curve, threshold: f64) -> usize {
    if threshold.is_nan() || threshold <= 0.0 {
        return 0;
    }
    let max_dist = a
        .points()
        .iter()
        .zip(b.points())
        .take(LOFT_SAMPLE_PAIRS)
        .map(|(p, q)| p.distance(*q))
        .fold(0.0_f64, f64::max);
    let cuts = (max_dist / threshold).ceil();
    if cuts.is_finite() && cuts > 0.0 {
        cuts as usize
    } else {
        0
    }
}

/// Lofts curve `a` to curve `b`.
///
/// Rows wrap around only when both curves are closed.
///
/// # Example
///
/// ```rust
/// use contour_stitch::loft::loft_pair;
/// use contour_stitch::{Curve, Point3};
///
/// let a = Curve::open(vec![Point3::ZERO, Point3::X, Point3::new(2.0, 0.0, 0.0)]);
/// let b = Curve::open(vec![Point3::Z, Point3::new(2.0, 0.0, 1.0)]);
/// let patch = loft_pair(&a, &b, 0.75);
/// assert_eq!(patch.cuts, 2);
/// assert_eq!((patch.rows, patch.columns), (4, 3));
/// assert_eq!(patch.faces.len(), 6);
/// ```
pub fn loft_pair(a: &Curve, b: &Curve, threshold: f64) -> SurfacePatch {
    loft_pair_with_tolerance(a, b, threshold, EPSILON_TOLERANCE)
}

/// Lofts curve `a` to curve `b`, treating corners closer than `tolerance`
/// as one point.
///
/// # Example
///
/// ```rust
/// use contour_stitch::loft::loft_pair_with_tolerance;
/// use contour_stitch::mesh::Face;
/// use contour_stitch::{Curve, Point3};
///
/// let a = Curve::open(vec![Point3::ZERO, Point3::X]);
/// let b = Curve::open(vec![Point3::Z, Point3::new(1.0, 0.0, 1.0e-6)]);
/// let patch = loft_pair_with_tolerance(&a, &b, 1.0, 1.0e-5);
/// assert!(patch.faces.iter().all(|f| matches!(f, Face::Tri(_))));
/// ```
pub fn loft_pair_with_tolerance(
    a: &Curve,
    b: &Curve,
    threshold: f64,
    tolerance: f64,
) -> SurfacePatch {
    let closed = a.is_closed() && b.is_closed();
    let columns = a.len().max(b.len());
    let cuts = cut_count(a, b, threshold);
    let rows = cuts + 2;

    let ring_a = resample(a.points(), columns, closed);
    let ring_b = resample(b.points(), columns, closed);

    let mut vertices = Vec::with_capacity(rows * columns);
    for r in 0..rows {
        let t = r as f64 / (rows - 1) as f64;
        vertices.extend(ring_a.iter().zip(&ring_b).map(|(p, q)| p.lerp(*q, t)));
    }

    let mut patch = SurfacePatch {
        vertices,
        faces: Vec::new(),
        rows,
        columns,
        cuts,
        closed,
    };

    let spans = if closed && columns > 2 {
        columns
    } else {
        columns.saturating_sub(1)
    };
    let coincide = |i: u32, j: u32| {
        patch.vertices[i as usize].distance(patch.vertices[j as usize]) <= tolerance
    };
    let mut faces = Vec::with_capacity((rows - 1) * spans);
    for r in 0..rows - 1 {
        for c in 0..spans {
            let next = (c + 1) % columns;
            let corners = [
                patch.index(r, c),
                patch.index(r, next),
                patch.index(r + 1, next),
                patch.index(r + 1, c),
            ];
            if let Some(face) = Face::from_corners(&corners, &coincide) {
                faces.push(face);
            }
        }
    }
    patch.faces = faces;

    debug!(
        "lofted {}x{} patch ({} cuts, {} faces)",
        rows,
        columns,
        cuts,
        patch.faces.len()
    );
    patch
}

/// Resamples a polyline to `count` points evenly spaced by arc length.
///
/// Closed polylines include the closing segment and do not repeat the first
/// point. Polylines that already have `count` points are returned as they are.
fn resample(points: &[Point3], count: usize, closed: bool) -> Vec<Point3> {
    if points.len() == count || points.len() < 2 || count < 2 {
        return points.to_vec();
    }

    let segments = if closed { points.len() } else { points.len() - 1 };
    let mut lengths = Vec::with_capacity(segments + 1);
    lengths.push(0.0);
    let mut total = 0.0;
    for i in 0..segments {
        let j = (i + 1) % points.len();
        total += points[i].distance(points[j]);
        lengths.push(total);
    }

    if !(total > 0.0 && total.is_finite()) {
        return vec![points[0]; count];
    }

    let divisions = if closed { count } else { count - 1 };
    let mut seg = 0;
    (0..count)
        .map(|i| {
            let target = total * i as f64 / divisions as f64;
            while seg + 1 < segments && lengths[seg + 1] < target {
                seg += 1;
            }
            let span = lengths[seg + 1] - lengths[seg];
            let local = if span > 0.0 {
                ((target - lengths[seg]) / span).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let p0 = points[seg];
            let p1 = points[(seg + 1) % points.len()];
            p0.lerp(p1, local)
        })
        .collect()
}
