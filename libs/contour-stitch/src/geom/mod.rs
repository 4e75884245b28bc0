//! Thin geometry helpers around `glam::DVec3` shared by the pipeline stages.
//!
//! The endpoint-pairing rule used throughout the pipeline lives here: given
//! two endpoint pairs, all four cross distances are compared and the
//! smallest one decides how the pairs line up.

use serde::{Deserialize, Serialize};

pub use glam::DVec3 as Point3;

/// One of the two extreme ends of a curve or layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum End {
    /// Index 0.
    First,
    /// Last index.
    Last,
}

impl End {
    /// The opposite end.
    ///
    /// # Examples
    /// ```
    /// use contour_stitch::geom::End;
    /// assert_eq!(End::First.opposite(), End::Last);
    /// ```
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            End::First => End::Last,
            End::Last => End::First,
        }
    }

    /// Selects this end from an endpoint pair.
    #[inline]
    pub fn pick(self, pair: [Point3; 2]) -> Point3 {
        match self {
            End::First => pair[0],
            End::Last => pair[1],
        }
    }
}

/// Finds the pair of nearest endpoints between `left` and `right`.
///
/// Ties resolve in the order first/first, first/last, last/first, last/last.
///
/// # Examples
/// ```
/// use contour_stitch::geom::{closest_ends, End, Point3};
/// let left = [Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)];
/// let right = [Point3::new(5.0, 0.0, 0.0), Point3::new(9.0, 0.0, 0.0)];
/// assert_eq!(closest_ends(left, right), (End::Last, End::First));
/// ```
pub fn closest_ends(left: [Point3; 2], right: [Point3; 2]) -> (End, End) {
    let candidates = [
        (End::First, End::First),
        (End::First, End::Last),
        (End::Last, End::First),
        (End::Last, End::Last),
    ];
    let mut best = candidates[0];
    let mut best_dist = f64::INFINITY;
    for (l, r) in candidates {
        let dist = l.pick(left).distance(r.pick(right));
        if dist < best_dist {
            best_dist = dist;
            best = (l, r);
        }
    }
    best
}

/// Returns true when the nearest of the four cross distances pairs
/// endpoint 0 of `a` with endpoint 1 of `b` (or 1 with 0).
///
/// A crossed distance that ties with a straight one still counts as crossed.
///
/// # Examples
/// ```
/// use contour_stitch::geom::{is_crossed, Point3};
/// let a = [Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)];
/// let b = [Point3::new(10.0, 0.0, 1.0), Point3::new(0.0, 0.0, 1.0)];
/// assert!(is_crossed(a, b));
/// assert!(!is_crossed(a, [b[1], b[0]]));
/// ```
pub fn is_crossed(a: [Point3; 2], b: [Point3; 2]) -> bool {
    let d00 = a[0].distance(b[0]);
    let d01 = a[0].distance(b[1]);
    let d10 = a[1].distance(b[0]);
    let d11 = a[1].distance(b[1]);
    let min = d00.min(d01).min(d10).min(d11);
    min == d01 || min == d10
}

/// Fractional position of `point` between `start` and `end`, measured as
/// `d(point, start) / (d(point, start) + d(point, end))`.
///
/// Returns 0 when the point coincides with both ends.
///
/// # Examples
/// ```
/// use contour_stitch::geom::{fractional_position, Point3};
/// let p = fractional_position(
///     Point3::new(2.5, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 0.0, 0.0),
/// );
/// assert_eq!(p, 0.25);
/// ```
pub fn fractional_position(point: Point3, start: Point3, end: Point3) -> f64 {
    let d0 = point.distance(start);
    let d1 = point.distance(end);
    let total = d0 + d1;
    if total > 0.0 {
        (d0 / total).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Midpoint of two points.
#[inline]
pub fn midpoint(a: Point3, b: Point3) -> Point3 {
    (a + b) * 0.5
}
