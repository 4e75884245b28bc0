//! # Curve Ordering
//!
//! Orders the curves of one layer from left to right and locates the holes
//! between them.
//!
//! ## Algorithm Overview
//!
//! 1. Fit a reference axis through the two farthest-apart curve endpoints
//! 2. Sample the axis at a spacing derived from the stack width, with extra
//!    samples past both ends
//! 3. Project every curve centroid onto its nearest axis sample and sort by
//!    sample index
//! 4. Put a hole center halfway between the nearest endpoints of each pair of
//!    neighbouring curves
//! 5. Take the outer ends of the first and last curve as layer endpoints

use log::debug;

use super::{HoleDescriptor, Layer};
use crate::curve::{CurveArena, CurveKey};
use crate::geom::{closest_ends, is_crossed, midpoint, Point3};
use crate::settings::StitchConfig;

/// Sampled straight line used to order curves.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceAxis {
    start: Point3,
    end: Point3,
    samples: Vec<Point3>,
}

impl ReferenceAxis {
    /// Samples the segment `start..end` every `spacing`, plus `overshoot`
    /// samples beyond each end.
    ///
    /// # Examples
    /// ```
    /// use contour_stitch::layer::ReferenceAxis;
    /// use contour_stitch::Point3;
    ///
    /// let axis = ReferenceAxis::through(Point3::ZERO, Point3::new(1.0, 0.0, 0.0), 0.25, 2);
    /// // 5 samples over the span, 2 extra on each side
    /// assert_eq!(axis.samples().len(), 9);
    /// ```
    pub fn through(start: Point3, end: Point3, spacing: f64, overshoot: usize) -> Self {
        let length = start.distance(end);
        if length <= 0.0 || spacing <= 0.0 || !length.is_finite() {
            return Self {
                start,
                end,
                samples: vec![start],
            };
        }

        let direction = (end - start) / length;
        let steps = (length / spacing).ceil() as i64;
        let overshoot = overshoot as i64;
        let samples = (-overshoot..=steps + overshoot)
            .map(|i| start + direction * (i as f64 * spacing))
            .collect();

        Self {
            start,
            end,
            samples,
        }
    }

    /// Axis through the two globally farthest-apart endpoints of `curves`.
    ///
    /// Both ends of every curve take part, so a single curve yields its own
    /// end-to-end axis. The axis runs towards increasing x (then y, then z).
    pub fn for_curves(
        arena: &CurveArena,
        curves: &[CurveKey],
        stack_width: f64,
        cfg: &StitchConfig,
    ) -> Self {
        let [mut start, mut end] = farthest_endpoints(arena, curves);
        if start.to_array() > end.to_array() {
            std::mem::swap(&mut start, &mut end);
        }
        Self::through(start, end, axis_spacing(stack_width, cfg), cfg.axis_overshoot)
    }

    /// Axis spanning two adjacent layers: each layer's outer ends are paired
    /// up by the nearest-endpoint rule and the matched pairs averaged.
    pub fn spanning_layers(
        arena: &CurveArena,
        a: &Layer,
        b: &Layer,
        stack_width: f64,
        cfg: &StitchConfig,
    ) -> Self {
        let ends_a = outer_ends(arena, a.curves());
        let mut ends_b = outer_ends(arena, b.curves());
        if is_crossed(ends_a, ends_b) {
            ends_b.swap(0, 1);
        }
        let start = midpoint(ends_a[0], ends_b[0]);
        let end = midpoint(ends_a[1], ends_b[1]);
        Self::through(start, end, axis_spacing(stack_width, cfg), cfg.axis_overshoot)
    }

    /// First end of the fitted segment.
    #[inline]
    pub fn start(&self) -> Point3 {
        self.start
    }

    /// Second end of the fitted segment.
    #[inline]
    pub fn end(&self) -> Point3 {
        self.end
    }

    /// Sample points, ordered from beyond `start` to beyond `end`.
    #[inline]
    pub fn samples(&self) -> &[Point3] {
        &self.samples
    }

    /// Index of the sample nearest to `point` (linear scan, first wins ties).
    pub fn nearest_sample(&self, point: Point3) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, sample) in self.samples.iter().enumerate() {
            let dist = sample.distance_squared(point);
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }
}

fn axis_spacing(stack_width: f64, cfg: &StitchConfig) -> f64 {
    stack_width / cfg.axis_samples.max(1) as f64
}

/// Exhaustive search over every endpoint of every curve.
fn farthest_endpoints(arena: &CurveArena, curves: &[CurveKey]) -> [Point3; 2] {
    let ends: Vec<Point3> = curves
        .iter()
        .flat_map(|&key| arena[key].endpoints())
        .collect();
    let Some(&first) = ends.first() else {
        return [Point3::ZERO; 2];
    };

    let mut best = [first, first];
    let mut best_dist = 0.0;
    for (i, &p) in ends.iter().enumerate() {
        for &q in &ends[i + 1..] {
            let dist = p.distance(q);
            if dist > best_dist {
                best_dist = dist;
                best = [p, q];
            }
        }
    }
    best
}

/// Outer ends of an ordered run of curves: the ends of the first and last
/// curve that do not face each other.
fn outer_ends(arena: &CurveArena, curves: &[CurveKey]) -> [Point3; 2] {
    match (curves.first(), curves.last()) {
        (Some(&first), Some(&last)) if first != last => {
            let left = arena[first].endpoints();
            let right = arena[last].endpoints();
            let (l, r) = closest_ends(left, right);
            [l.opposite().pick(left), r.opposite().pick(right)]
        }
        (Some(&only), _) => arena[only].endpoints(),
        _ => [Point3::ZERO; 2],
    }
}

/// Curves of one layer in axis order, with their holes.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedLayer {
    /// Curves from left to right.
    pub curves: Vec<CurveKey>,
    /// Outer endpoints and holes.
    pub holes: HoleDescriptor,
}

/// Orders the curves of one layer along its reference axis and computes the
/// hole descriptor.
///
/// # Example
///
/// ```rust
/// use contour_stitch::curve::{Curve, CurveArena};
/// use contour_stitch::layer::order_layer;
/// use contour_stitch::{Point3, StitchConfig};
///
/// let mut arena = CurveArena::new();
/// let right = arena.insert(Curve::open(vec![Point3::new(6.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)]));
/// let left = arena.insert(Curve::open(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)]));
///
/// let ordered = order_layer(&arena, &[right, left], 10.0, &StitchConfig::default());
/// assert_eq!(ordered.curves, vec![left, right]);
/// assert_eq!(ordered.holes.holes()[0].center, Point3::new(5.0, 0.0, 0.0));
/// ```
pub fn order_layer(
    arena: &CurveArena,
    curves: &[CurveKey],
    stack_width: f64,
    cfg: &StitchConfig,
) -> OrderedLayer {
    let axis = ReferenceAxis::for_curves(arena, curves, stack_width, cfg);

    let mut projected: Vec<(usize, CurveKey)> = curves
        .iter()
        .map(|&key| (axis.nearest_sample(arena[key].centroid()), key))
        .collect();
    projected.sort_by_key(|&(index, _)| index);
    let ordered: Vec<CurveKey> = projected.into_iter().map(|(_, key)| key).collect();

    let centers: Vec<Point3> = ordered
        .windows(2)
        .map(|pair| {
            let left = arena[pair[0]].endpoints();
            let right = arena[pair[1]].endpoints();
            let (l, r) = closest_ends(left, right);
            midpoint(l.pick(left), r.pick(right))
        })
        .collect();

    let endpoints = outer_ends(arena, &ordered);
    debug!(
        "ordered {} curves along axis with {} samples, {} holes",
        ordered.len(),
        axis.samples().len(),
        centers.len()
    );

    OrderedLayer {
        holes: HoleDescriptor::from_centers(endpoints, centers),
        curves: ordered,
    }
}
