//! # Curves
//!
//! Immutable traced curves and the arena that owns them.
//!
//! A [`Curve`] never changes after construction. Reversing or splitting a
//! curve produces new values, which the pipeline allocates in a
//! [`CurveArena`] and refers to by [`CurveKey`]. The original input curves
//! therefore stay intact until the caller discards them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::Point3;

/// Caller-supplied identifier of an input curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CurveId(pub u64);

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An ordered polyline, open or closed.
///
/// # Example
///
/// ```rust
/// use contour_stitch::{Curve, Point3};
///
/// let curve = Curve::open(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
/// ]);
/// assert_eq!(curve.endpoints(), [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)]);
/// assert_eq!(curve.edges().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    points: Vec<Point3>,
    closed: bool,
    source: Option<CurveId>,
}

impl Curve {
    /// Creates a curve.
    pub fn new(points: Vec<Point3>, closed: bool) -> Self {
        Self {
            points,
            closed,
            source: None,
        }
    }

    /// Creates an open curve.
    pub fn open(points: Vec<Point3>) -> Self {
        Self::new(points, false)
    }

    /// Creates a closed curve.
    pub fn closed(points: Vec<Point3>) -> Self {
        Self::new(points, true)
    }

    /// Tags the curve with the input curve it derives from.
    pub fn with_source(mut self, source: CurveId) -> Self {
        self.source = Some(source);
        self
    }

    /// Vertex positions.
    #[inline]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the curve has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the last vertex connects back to the first.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The input curve this one derives from, if any.
    #[inline]
    pub fn source(&self) -> Option<CurveId> {
        self.source
    }

    /// z of the first vertex, the value curves are layered by.
    pub fn z(&self) -> f64 {
        self.points.first().map_or(0.0, |p| p.z)
    }

    /// First and last vertex.
    pub fn endpoints(&self) -> [Point3; 2] {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => [*first, *last],
            _ => [Point3::ZERO; 2],
        }
    }

    /// Mean of all vertices.
    pub fn centroid(&self) -> Point3 {
        if self.points.is_empty() {
            return Point3::ZERO;
        }
        let sum: Point3 = self.points.iter().copied().sum();
        sum / self.points.len() as f64
    }

    /// Edges as consecutive index pairs, plus the closing edge when closed.
    pub fn edges(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        let n = self.points.len();
        let closing = (self.closed && n > 2).then_some([n - 1, 0]);
        (1..n).map(|i| [i - 1, i]).chain(closing)
    }

    /// Total polyline length, including the closing edge.
    pub fn length(&self) -> f64 {
        self.edges()
            .map(|[a, b]| self.points[a].distance(self.points[b]))
            .sum()
    }

    /// A new curve with the vertex order reversed.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            closed: self.closed,
            source: self.source,
        }
    }

    /// A new open curve with vertices `0..=index`.
    ///
    /// The index is clamped to the last vertex.
    pub fn head(&self, index: usize) -> Self {
        let end = index.min(self.points.len().saturating_sub(1));
        self.piece(0, end)
    }

    /// A new open curve with vertices `index..`.
    ///
    /// The index is clamped to the last vertex.
    pub fn tail(&self, index: usize) -> Self {
        let last = self.points.len().saturating_sub(1);
        self.piece(index.min(last), last)
    }

    fn piece(&self, start: usize, end: usize) -> Self {
        let points = if self.points.is_empty() {
            Vec::new()
        } else {
            self.points[start..=end].to_vec()
        };
        Self {
            points,
            closed: false,
            source: self.source,
        }
    }
}

/// Index of a curve inside a [`CurveArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CurveKey(pub u32);

/// Append-only store of curves.
///
/// Curves are never removed or mutated, so keys stay valid for the lifetime
/// of the arena.
#[derive(Debug, Clone, Default)]
pub struct CurveArena {
    curves: Vec<Curve>,
}

impl CurveArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a curve and returns its key.
    pub fn insert(&mut self, curve: Curve) -> CurveKey {
        let key = CurveKey(self.curves.len() as u32);
        self.curves.push(curve);
        key
    }

    /// Returns the curve for a key.
    ///
    /// Keys are only handed out by [`CurveArena::insert`], so a key from this
    /// arena always resolves.
    #[inline]
    pub fn get(&self, key: CurveKey) -> &Curve {
        &self.curves[key.0 as usize]
    }

    /// Number of stored curves.
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Returns true if no curve has been stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

impl std::ops::Index<CurveKey> for CurveArena {
    type Output = Curve;

    fn index(&self, key: CurveKey) -> &Curve {
        self.get(key)
    }
}
