//! Tests for layer and point orientation.

use super::*;
use crate::curve::{Curve, CurveKey};
use crate::geom::Point3;
use crate::layer::{order_layer, HoleDescriptor};
use crate::settings::StitchConfig;
use approx::assert_relative_eq;

fn line(arena: &mut CurveArena, x0: f64, x1: f64, z: f64) -> CurveKey {
    arena.insert(Curve::open(vec![
        Point3::new(x0, 0.0, z),
        Point3::new((x0 + x1) / 2.0, 0.0, z),
        Point3::new(x1, 0.0, z),
    ]))
}

fn single(arena: &CurveArena, key: CurveKey, z: f64) -> Layer {
    Layer::new(z, vec![key], HoleDescriptor::for_single_curve(&arena[key]))
}

#[test]
fn crossed_layer_is_reversed() {
    let mut arena = CurveArena::new();
    let lower = line(&mut arena, 0.0, 10.0, 0.0);
    // upper layer traced right to left
    let a = line(&mut arena, 10.0, 7.0, 1.0);
    let b = line(&mut arena, 4.0, 0.0, 1.0);
    let holes = HoleDescriptor::from_centers(
        [Point3::new(10.0, 0.0, 1.0), Point3::new(0.0, 0.0, 1.0)],
        vec![Point3::new(5.5, 0.0, 1.0)],
    );
    let upper = Layer::new(1.0, vec![a, b], holes);
    assert_relative_eq!(upper.holes().pctgs()[0], 0.45);

    let layers = reconcile_layer_order(vec![single(&arena, lower, 0.0), upper]);
    let ends = layers[1].holes().endpoints();
    assert_eq!(ends[0], Point3::new(0.0, 0.0, 1.0));
    assert_eq!(ends[1], Point3::new(10.0, 0.0, 1.0));

    // curve order flips with the layer
    assert_eq!(layers[1].curves(), &[b, a]);
    assert_relative_eq!(layers[1].holes().pctgs()[0], 0.55);
}

#[test]
fn aligned_layer_is_kept() {
    let mut arena = CurveArena::new();
    let lower = line(&mut arena, 0.0, 10.0, 0.0);
    let upper = line(&mut arena, 0.5, 9.5, 1.0);
    let layers = reconcile_layer_order(vec![single(&arena, lower, 0.0), single(&arena, upper, 1.0)]);
    assert_eq!(layers[1].holes().endpoints(), arena[upper].endpoints());
}

#[test]
fn reversal_propagates_up_the_stack() {
    let mut arena = CurveArena::new();
    let l0 = line(&mut arena, 0.0, 10.0, 0.0);
    let l1 = line(&mut arena, 10.0, 0.0, 1.0);
    let l2 = line(&mut arena, 10.0, 0.0, 2.0);
    let layers = reconcile_layer_order(vec![
        single(&arena, l0, 0.0),
        single(&arena, l1, 1.0),
        single(&arena, l2, 2.0),
    ]);
    // layer 2 is compared with the already flipped layer 1
    for layer in &layers {
        assert_eq!(layer.holes().endpoints()[0].x, 0.0);
    }
}

#[test]
fn backwards_curve_gets_reversed_copy() {
    let mut arena = CurveArena::new();
    let a = line(&mut arena, 0.0, 4.0, 0.0);
    let b = line(&mut arena, 10.0, 6.0, 0.0);
    let ordered = order_layer(&arena, &[a, b], 10.0, &StitchConfig::default());
    let layer = Layer::new(0.0, ordered.curves, ordered.holes);
    let before = arena.len();

    let layers = reconcile_point_order(&mut arena, &[layer], false);
    assert_eq!(arena.len(), before + 1);

    let curves = layers[0].curves();
    assert_eq!(curves[0], a);
    assert_ne!(curves[1], b);
    assert_eq!(
        arena[curves[1]].endpoints(),
        [Point3::new(6.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)]
    );
    // the input curve is untouched
    assert_eq!(arena[b].points()[0], Point3::new(10.0, 0.0, 0.0));
}

#[test]
fn closed_curves_skip_point_order() {
    let mut arena = CurveArena::new();
    let ring = arena.insert(Curve::closed(vec![
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
    ]));
    // an endpoint pair that would count as crossed for an open curve
    let holes = HoleDescriptor::without_holes([Point3::new(0.0, -1.0, 0.0), Point3::new(1.0, 0.0, 0.0)]);
    let layer = Layer::new(0.0, vec![ring], holes);

    let layers = reconcile_point_order(&mut arena, &[layer.clone()], true);
    assert_eq!(layers, vec![layer]);
    assert_eq!(arena.len(), 1);
}
