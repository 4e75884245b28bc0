//! # Layer Sorting
//!
//! Groups curves into z-ordered layers. Curves are sorted by the z of their
//! first vertex; a run of curves whose consecutive z gaps stay below
//! `delta_z` (half a slice) is one layer.

use log::debug;

use super::{order_layer, HoleDescriptor, Layer};
use crate::curve::{CurveArena, CurveKey};
use crate::settings::{StackDimensions, StitchConfig};

/// Sorts curves into layers of strictly increasing z.
///
/// Multi-curve layers are ordered by [`order_layer`]; single-curve layers get
/// a descriptor without holes whose endpoints are the curve's own.
///
/// # Example
///
/// ```rust
/// use contour_stitch::curve::{Curve, CurveArena};
/// use contour_stitch::layer::sort_into_layers;
/// use contour_stitch::{Point3, StackDimensions, StitchConfig};
///
/// let mut arena = CurveArena::new();
/// let upper = arena.insert(Curve::open(vec![Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 0.0, 1.0)]));
/// let lower = arena.insert(Curve::open(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)]));
///
/// let stack = StackDimensions::new(1.0, 1.0, 2.0, 2).unwrap();
/// let layers = sort_into_layers(&arena, &[upper, lower], &stack, &StitchConfig::default());
/// assert_eq!(layers.len(), 2);
/// assert_eq!(layers[0].curves(), &[lower]);
/// ```
pub fn sort_into_layers(
    arena: &CurveArena,
    curves: &[CurveKey],
    stack: &StackDimensions,
    cfg: &StitchConfig,
) -> Vec<Layer> {
    let delta_z = stack.delta_z();

    let mut sorted = curves.to_vec();
    sorted.sort_by(|&a, &b| arena[a].z().total_cmp(&arena[b].z()));

    let mut runs: Vec<Vec<CurveKey>> = Vec::new();
    let mut last_z = f64::NEG_INFINITY;
    for key in sorted {
        let z = arena[key].z();
        match runs.last_mut() {
            Some(run) if z - last_z < delta_z => run.push(key),
            _ => runs.push(vec![key]),
        }
        last_z = z;
    }

    let layers: Vec<Layer> = runs
        .into_iter()
        .map(|run| {
            let z = arena[run[0]].z();
            if run.len() == 1 {
                let holes = HoleDescriptor::for_single_curve(&arena[run[0]]);
                Layer::new(z, run, holes)
            } else {
                let ordered = order_layer(arena, &run, stack.width, cfg);
                Layer::new(z, ordered.curves, ordered.holes)
            }
        })
        .collect();

    debug!(
        "sorted {} curves into {} layers (delta_z = {delta_z})",
        curves.len(),
        layers.len()
    );
    layers
}
