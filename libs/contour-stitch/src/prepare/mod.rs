//! # Curve Preparation
//!
//! Optional cleanup of freshly traced curves before they are sorted into
//! layers. Tracing over a neighbouring contour can pull single points to the
//! wrong height, and freehand strokes come out unevenly spaced.
//!
//! Steps, in order:
//!
//! 1. Drop vertices more than `delta_z / 2` away from the median z
//! 2. Subdivide edges longer than the mesh-density threshold `t`: an edge of
//!    length `len` is halved `ceil(log2(len / t))` times
//! 3. Drop vertices closer than `t` to the last kept vertex, keeping the
//!    final vertex
//!
//! Every step builds a new point list; the input curve is not touched.

use config::constants::{MAX_SUBDIVISION_PASSES, MIN_CURVE_VERTICES};
use log::debug;

use crate::curve::{Curve, CurveId};
use crate::error::{StitchError, StitchResult};
use crate::geom::Point3;

/// Cleans one traced curve.
///
/// # Errors
///
/// [`StitchError::DegenerateCurve`] when fewer than two vertices survive.
///
/// # Example
///
/// ```rust
/// use contour_stitch::prepare::prepare_curve;
/// use contour_stitch::{Curve, CurveId, Point3};
///
/// let traced = Curve::open(vec![
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(1.0, 0.0, 3.0), // pulled onto another slice
///     Point3::new(2.0, 0.0, 1.0),
///     Point3::new(3.0, 0.0, 1.0),
/// ]);
/// let clean = prepare_curve(CurveId(7), &traced, 0.5, 1.0).unwrap();
/// assert!(clean.points().iter().all(|p| p.z == 1.0));
/// ```
pub fn prepare_curve(
    id: CurveId,
    curve: &Curve,
    delta_z: f64,
    threshold: f64,
) -> StitchResult<Curve> {
    let degenerate = |vertices: usize| StitchError::DegenerateCurve {
        id,
        vertices,
        min: MIN_CURVE_VERTICES,
    };

    let points = remove_z_outliers(curve.points(), delta_z / 2.0);
    if points.len() < MIN_CURVE_VERTICES {
        return Err(degenerate(points.len()));
    }
    let points = subdivide_long_edges(&points, curve.is_closed(), threshold);
    let points = downsample(&points, threshold);
    if points.len() < MIN_CURVE_VERTICES {
        return Err(degenerate(points.len()));
    }

    debug!(
        "prepared curve {id}: {} -> {} vertices",
        curve.len(),
        points.len()
    );
    let prepared = Curve::new(points, curve.is_closed());
    Ok(match curve.source() {
        Some(source) => prepared.with_source(source),
        None => prepared,
    })
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    })
}

fn remove_z_outliers(points: &[Point3], max_offset: f64) -> Vec<Point3> {
    let mut zs: Vec<f64> = points.iter().map(|p| p.z).collect();
    let Some(z_med) = median(&mut zs) else {
        return Vec::new();
    };
    points
        .iter()
        .copied()
        .filter(|p| (p.z - z_med).abs() <= max_offset)
        .collect()
}

fn subdivide_long_edges(points: &[Point3], closed: bool, threshold: f64) -> Vec<Point3> {
    if threshold.is_nan() || threshold <= 0.0 || points.len() < 2 {
        return points.to_vec();
    }

    let n = points.len();
    let segments = if closed && n > 2 { n } else { n - 1 };
    let mut out = Vec::with_capacity(n);
    for i in 0..segments {
        let (a, b) = (points[i], points[(i + 1) % n]);
        out.push(a);
        let len = a.distance(b);
        if len > threshold {
            let passes = ((len / threshold).log2().ceil() as u32).min(MAX_SUBDIVISION_PASSES);
            let pieces = 1_usize << passes;
            out.extend((1..pieces).map(|k| a.lerp(b, k as f64 / pieces as f64)));
        }
    }
    if !(closed && n > 2) {
        out.push(points[n - 1]);
    }
    out
}

fn downsample(points: &[Point3], threshold: f64) -> Vec<Point3> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };
    let Some((&last, middle)) = rest.split_last() else {
        return vec![first];
    };

    let mut kept = vec![first];
    for &p in middle {
        if kept[kept.len() - 1].distance(p) >= threshold {
            kept.push(p);
        }
    }
    if kept.len() > 1 && kept[kept.len() - 1].distance(last) < threshold {
        kept.pop();
    }
    kept.push(last);
    kept
}
