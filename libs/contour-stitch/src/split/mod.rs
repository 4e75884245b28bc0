//! # Curve Splitting
//!
//! Walks the correspondence records of one layer pair and cuts curves at the
//! holes, producing the curve pairs that get lofted.
//!
//! Each side keeps a cursor (a queue) over its remaining curves. The front of
//! the queue is the curve currently being consumed; a split replaces it with
//! the unconsumed tail piece.
//!
//! | Owner  | Cut          | Pair emitted              | Cursor update                  |
//! |--------|--------------|---------------------------|--------------------------------|
//! | `Cur`  | prev front   | (prev head, cur front)    | pop cur, prev front = tail     |
//! | `Prev` | cur front    | (prev front, cur head)    | pop prev, cur front = tail     |
//! | `Both` | none         | (prev front, cur front)   | pop both                       |
//!
//! After the last record the two remaining fronts form the tail pair. When the
//! upper layer has no holes every record is a `Prev` record, so the single
//! upper curve is closed against each lower curve in turn.

use std::collections::VecDeque;

use config::constants::{MIN_SPLIT_VERTICES, SPLIT_INWARD_OFFSET};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::curve::{Curve, CurveArena, CurveKey};
use crate::error::{StitchError, StitchResult};
use crate::geom::Point3;
use crate::layer::Layer;
use crate::matching::{CorrespondenceRecord, Owner};

/// Two curves, one from each layer of a pair, that get lofted into one patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePair {
    /// Curve from the lower layer.
    pub prev: CurveKey,
    /// Curve from the upper layer.
    pub cur: CurveKey,
    /// Index of the lower layer.
    pub layer_pair: usize,
}

/// Index of the vertex nearest to `center`, moved inward when it lands on an
/// extreme endpoint.
///
/// Returns `None` for curves with fewer than [`MIN_SPLIT_VERTICES`] vertices,
/// which have no interior vertex to split at.
///
/// # Examples
/// ```
/// use contour_stitch::split::nearest_split_index;
/// use contour_stitch::{Curve, Point3};
///
/// let curve = Curve::open((0..5).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect());
/// assert_eq!(nearest_split_index(&curve, Point3::new(2.1, 1.0, 0.0)), Some(2));
/// // an endpoint hit is moved one vertex inward
/// assert_eq!(nearest_split_index(&curve, Point3::new(-3.0, 0.0, 0.0)), Some(1));
/// ```
pub fn nearest_split_index(curve: &Curve, center: Point3) -> Option<usize> {
    let n = curve.len();
    if n < MIN_SPLIT_VERTICES {
        return None;
    }

    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, p) in curve.points().iter().enumerate() {
        let dist = p.distance(center);
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }

    let last = n - 1;
    if best == 0 {
        warn!("split point fell on the first vertex; moved inward");
        best = SPLIT_INWARD_OFFSET;
    } else if best == last {
        warn!("split point fell on the last vertex; moved inward");
        best = last - SPLIT_INWARD_OFFSET;
    }
    Some(best)
}

/// Cuts the curve at `key` nearest to `center` into a head `0..=idx` and a
/// tail `idx..`, both newly allocated. The source curve is left as it is.
fn split_curve(
    arena: &mut CurveArena,
    key: CurveKey,
    center: Point3,
    layer_pair: usize,
) -> StitchResult<(CurveKey, CurveKey)> {
    let curve = &arena[key];
    let index = nearest_split_index(curve, center).ok_or_else(|| {
        StitchError::topology(
            layer_pair,
            format!(
                "curve with {} vertices is too short to split (min: {MIN_SPLIT_VERTICES})",
                curve.len()
            ),
        )
    })?;
    let head = curve.head(index);
    let tail = curve.tail(index);
    Ok((arena.insert(head), arena.insert(tail)))
}

/// Front of a cursor, or a topology error naming the exhausted side.
fn front(cursor: &VecDeque<CurveKey>, side: &str, layer_pair: usize) -> StitchResult<CurveKey> {
    cursor
        .front()
        .copied()
        .ok_or_else(|| StitchError::topology(layer_pair, format!("ran out of {side} curves")))
}

/// Builds the curve pairs of one layer pair from its correspondence records.
///
/// `prev` is the lower layer, `cur` the upper one. Split pieces are allocated
/// in `arena`.
///
/// # Errors
///
/// [`StitchError::Topology`] when a record needs a curve that has already
/// been consumed, or when a curve is too short to split.
///
/// # Example
///
/// ```rust
/// use contour_stitch::curve::{Curve, CurveArena};
/// use contour_stitch::layer::{HoleDescriptor, Layer};
/// use contour_stitch::split::build_curve_pairs;
/// use contour_stitch::Point3;
///
/// let mut arena = CurveArena::new();
/// let a = arena.insert(Curve::open(vec![Point3::ZERO, Point3::X]));
/// let b = arena.insert(Curve::open(vec![Point3::Z, Point3::new(1.0, 0.0, 1.0)]));
/// let prev = Layer::new(0.0, vec![a], HoleDescriptor::for_single_curve(&arena[a]));
/// let cur = Layer::new(1.0, vec![b], HoleDescriptor::for_single_curve(&arena[b]));
///
/// let pairs = build_curve_pairs(&mut arena, &prev, &cur, &[], 0).unwrap();
/// assert_eq!(pairs.len(), 1);
/// assert_eq!((pairs[0].prev, pairs[0].cur), (a, b));
/// ```
pub fn build_curve_pairs(
    arena: &mut CurveArena,
    prev: &Layer,
    cur: &Layer,
    records: &[CorrespondenceRecord],
    layer_pair: usize,
) -> StitchResult<Vec<CurvePair>> {
    let mut prev_cursor: VecDeque<CurveKey> = prev.curves().iter().copied().collect();
    let mut cur_cursor: VecDeque<CurveKey> = cur.curves().iter().copied().collect();
    let mut pairs = Vec::with_capacity(records.len() + 1);
    let pair = |prev, cur| CurvePair {
        prev,
        cur,
        layer_pair,
    };

    for record in records {
        let p = front(&prev_cursor, "lower-layer", layer_pair)?;
        let c = front(&cur_cursor, "upper-layer", layer_pair)?;
        match record.owner {
            Owner::Cur => {
                let (head, tail) = split_curve(arena, p, record.hole_center, layer_pair)?;
                pairs.push(pair(head, c));
                cur_cursor.pop_front();
                prev_cursor[0] = tail;
            }
            Owner::Prev => {
                let (head, tail) = split_curve(arena, c, record.hole_center, layer_pair)?;
                pairs.push(pair(p, head));
                prev_cursor.pop_front();
                cur_cursor[0] = tail;
            }
            Owner::Both => {
                pairs.push(pair(p, c));
                prev_cursor.pop_front();
                cur_cursor.pop_front();
            }
        }
    }

    let p = front(&prev_cursor, "lower-layer", layer_pair)?;
    let c = front(&cur_cursor, "upper-layer", layer_pair)?;
    pairs.push(pair(p, c));

    debug!(
        "layers {layer_pair}/{}: {} records -> {} curve pairs",
        layer_pair + 1,
        records.len(),
        pairs.len()
    );
    Ok(pairs)
}

#[cfg(test)]
mod tests;
