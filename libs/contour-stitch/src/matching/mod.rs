//! # Hole Correspondence
//!
//! Merges the hole positions of two adjacent layers into one ascending list
//! of correspondence records. Each record says which side the hole belongs
//! to, which tells the splitter which curve to cut.
//!
//! ## Algorithm Overview
//!
//! Two-pointer merge over both `pctg` lists:
//!
//! 1. Heads closer than `delta_p_thresh` are the same hole: one [`Owner::Both`]
//!    record at the mean position, both pointers advance
//! 2. Otherwise the smaller head is emitted with its own side and only that
//!    pointer advances
//! 3. Leftover tails are appended as they are
//!
//! Head pairs whose distance lies within `ambiguity_margin` of the threshold
//! are reported as [`TopologyWarning::AmbiguousHoleMatch`].

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom::{midpoint, Point3};
use crate::layer::{Hole, HoleDescriptor};
use crate::settings::StitchConfig;

/// Which layer of a pair a hole belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// Only the lower (previous) layer has the hole.
    Prev,
    /// Only the upper (current) layer has the hole.
    Cur,
    /// Both layers have it.
    Both,
}

/// One matched or unmatched hole between two adjacent layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrespondenceRecord {
    /// Position along the layer axis.
    pub pctg: f64,
    /// Side the hole belongs to.
    pub owner: Owner,
    /// Point the splitter cuts nearest to.
    pub hole_center: Point3,
}

impl CorrespondenceRecord {
    fn from_hole(hole: &Hole, owner: Owner) -> Self {
        Self {
            pctg: hole.pctg,
            owner,
            hole_center: hole.center,
        }
    }
}

/// Non-fatal findings reported alongside a reconstruction.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TopologyWarning {
    /// Two holes whose position difference is close to the matching
    /// threshold; the ownership decision may be wrong.
    #[error(
        "Ambiguous hole match between layers {layer_pair} and {}: prev at {pctg_prev:.3}, cur at {pctg_cur:.3}",
        .layer_pair + 1
    )]
    AmbiguousHoleMatch {
        /// Index of the lower layer of the pair
        layer_pair: usize,
        /// Position of the hole in the lower layer
        pctg_prev: f64,
        /// Position of the hole in the upper layer
        pctg_cur: f64,
    },
}

/// Records of one layer pair, ascending by `pctg`, with any warnings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoleMatching {
    /// Correspondence records.
    pub records: Vec<CorrespondenceRecord>,
    /// Ambiguous matches seen while merging.
    pub warnings: Vec<TopologyWarning>,
}

/// Merges the holes of the lower layer `prev` and the upper layer `cur`.
///
/// # Example
///
/// ```rust
/// use contour_stitch::layer::HoleDescriptor;
/// use contour_stitch::matching::{match_holes, Owner};
/// use contour_stitch::{Point3, StitchConfig};
///
/// let ends = [Point3::ZERO, Point3::new(10.0, 0.0, 0.0)];
/// let prev = HoleDescriptor::from_centers(ends, vec![Point3::new(3.0, 0.0, 0.0)]);
/// let cur = HoleDescriptor::from_centers(ends, vec![Point3::new(4.0, 0.0, 0.0)]);
///
/// let matching = match_holes(&prev, &cur, 0, &StitchConfig::default());
/// assert_eq!(matching.records.len(), 1);
/// assert_eq!(matching.records[0].owner, Owner::Both);
/// ```
pub fn match_holes(
    prev: &HoleDescriptor,
    cur: &HoleDescriptor,
    layer_pair: usize,
    cfg: &StitchConfig,
) -> HoleMatching {
    let prev_holes = prev.holes();
    let cur_holes = cur.holes();
    let mut matching = HoleMatching {
        records: Vec::with_capacity(prev_holes.len() + cur_holes.len()),
        warnings: Vec::new(),
    };

    let (mut i, mut j) = (0, 0);
    while let (Some(p), Some(c)) = (prev_holes.get(i), cur_holes.get(j)) {
        let delta = (p.pctg - c.pctg).abs();
        if (delta - cfg.delta_p_thresh).abs() < cfg.ambiguity_margin {
            warn!(
                "layers {layer_pair}/{}: hole positions {:.3} and {:.3} differ by {delta:.3}, close to threshold {}",
                layer_pair + 1,
                p.pctg,
                c.pctg,
                cfg.delta_p_thresh
            );
            matching.warnings.push(TopologyWarning::AmbiguousHoleMatch {
                layer_pair,
                pctg_prev: p.pctg,
                pctg_cur: c.pctg,
            });
        }

        if delta < cfg.delta_p_thresh {
            matching.records.push(CorrespondenceRecord {
                pctg: (p.pctg + c.pctg) / 2.0,
                owner: Owner::Both,
                hole_center: midpoint(p.center, c.center),
            });
            i += 1;
            j += 1;
        } else if c.pctg <= p.pctg {
            matching.records.push(CorrespondenceRecord::from_hole(c, Owner::Cur));
            j += 1;
        } else {
            matching.records.push(CorrespondenceRecord::from_hole(p, Owner::Prev));
            i += 1;
        }
    }

    let prev_tail = prev_holes[i..]
        .iter()
        .map(|h| CorrespondenceRecord::from_hole(h, Owner::Prev));
    let cur_tail = cur_holes[j..]
        .iter()
        .map(|h| CorrespondenceRecord::from_hole(h, Owner::Cur));
    matching.records.extend(prev_tail.chain(cur_tail));

    debug!(
        "layers {layer_pair}/{}: {} + {} holes -> {} records",
        layer_pair + 1,
        prev_holes.len(),
        cur_holes.len(),
        matching.records.len()
    );
    matching
}
