//! # Orientation Reconciliation
//!
//! Makes curve order and point order run the same way in every layer, so
//! that index-paired lofting connects the right ends.
//!
//! Both passes use the 4-distance rule from [`crate::geom::is_crossed`]:
//! when the nearest pairing of two endpoint pairs is crossed, the second one
//! runs backwards.

use log::debug;

use crate::curve::CurveArena;
use crate::geom::is_crossed;
use crate::layer::Layer;

/// Aligns each layer's direction with the layer below it.
///
/// Layers are processed bottom-up; each one is compared against its already
/// reconciled predecessor and replaced by its reversal when crossed.
///
/// # Example
///
/// ```rust
/// use contour_stitch::layer::{HoleDescriptor, Layer};
/// use contour_stitch::orient::reconcile_layer_order;
/// use contour_stitch::Point3;
///
/// let lower = Layer::new(0.0, vec![], HoleDescriptor::without_holes([Point3::ZERO, Point3::X]));
/// let upper = Layer::new(1.0, vec![], HoleDescriptor::without_holes([Point3::new(1.0, 0.0, 1.0), Point3::Z]));
/// let layers = reconcile_layer_order(vec![lower, upper]);
/// assert_eq!(layers[1].holes().endpoints()[0], Point3::Z);
/// ```
pub fn reconcile_layer_order(layers: Vec<Layer>) -> Vec<Layer> {
    let mut out: Vec<Layer> = Vec::with_capacity(layers.len());
    let mut flipped = 0;
    for layer in layers {
        let layer = match out.last() {
            Some(prev) if is_crossed(prev.holes().endpoints(), layer.holes().endpoints()) => {
                flipped += 1;
                layer.reversed()
            }
            _ => layer,
        };
        out.push(layer);
    }
    debug!("reversed {flipped} of {} layers", out.len());
    out
}

/// Reverses every open curve that runs against its layer's direction.
///
/// Reversed curves are allocated in `arena`; the returned layers refer to
/// them instead of the originals. Closed curves have no meaningful endpoint
/// direction and are returned unchanged.
pub fn reconcile_point_order(arena: &mut CurveArena, layers: &[Layer], closed: bool) -> Vec<Layer> {
    if closed {
        debug!("closed curves: point order left as traced");
        return layers.to_vec();
    }

    let mut reversed = 0;
    let out = layers
        .iter()
        .map(|layer| {
            let ends = layer.holes().endpoints();
            let curves = layer
                .curves()
                .iter()
                .map(|&key| {
                    let curve = &arena[key];
                    if is_crossed(ends, curve.endpoints()) {
                        reversed += 1;
                        let flipped = curve.reversed();
                        arena.insert(flipped)
                    } else {
                        key
                    }
                })
                .collect();
            layer.with_curves(curves)
        })
        .collect();
    debug!("reversed point order of {reversed} curves");
    out
}

#[cfg(test)]
mod tests;
