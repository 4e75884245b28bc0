//! Tests for curve splitting and pair construction.

use super::*;
use crate::layer::HoleDescriptor;
use crate::matching::match_holes;
use crate::settings::StitchConfig;

fn line(arena: &mut CurveArena, x0: f64, x1: f64, z: f64, n: usize) -> CurveKey {
    let points = (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            Point3::new(x0 + (x1 - x0) * t, 0.0, z)
        })
        .collect();
    arena.insert(Curve::open(points))
}

fn layer(arena: &CurveArena, z: f64, curves: Vec<CurveKey>, centers: Vec<Point3>) -> Layer {
    let first = arena[curves[0]].endpoints()[0];
    let last = arena[curves[curves.len() - 1]].endpoints()[1];
    Layer::new(z, curves, HoleDescriptor::from_centers([first, last], centers))
}

fn record(owner: Owner, x: f64, z: f64) -> CorrespondenceRecord {
    CorrespondenceRecord {
        pctg: x / 10.0,
        owner,
        hole_center: Point3::new(x, 0.0, z),
    }
}

// =============================================================================
// SPLIT INDEX
// =============================================================================

#[test]
fn split_index_never_lands_on_endpoints() {
    let mut arena = CurveArena::new();
    let key = line(&mut arena, 0.0, 10.0, 0.0, 11);
    let curve = &arena[key];
    let [first, last] = curve.endpoints();
    assert_eq!(nearest_split_index(curve, first), Some(1));
    assert_eq!(nearest_split_index(curve, last), Some(9));
}

#[test]
fn three_vertex_curve_splits_at_middle() {
    let mut arena = CurveArena::new();
    let key = line(&mut arena, 0.0, 2.0, 0.0, 3);
    assert_eq!(nearest_split_index(&arena[key], Point3::ZERO), Some(1));
    assert_eq!(nearest_split_index(&arena[key], Point3::new(2.0, 0.0, 0.0)), Some(1));
}

#[test]
fn two_vertex_curve_cannot_split() {
    let mut arena = CurveArena::new();
    let key = line(&mut arena, 0.0, 1.0, 0.0, 2);
    assert_eq!(nearest_split_index(&arena[key], Point3::ZERO), None);
}

#[test]
fn split_pieces_share_the_split_vertex() {
    let mut arena = CurveArena::new();
    let key = line(&mut arena, 0.0, 10.0, 0.0, 11);
    let (head, tail) = split_curve(&mut arena, key, Point3::new(3.2, 1.0, 0.0), 0).unwrap();
    assert_eq!(arena[head].len(), 4);
    assert_eq!(arena[tail].len(), 8);
    assert_eq!(arena[head].endpoints()[1], arena[tail].endpoints()[0]);
    assert!(!arena[head].is_closed());
    // source stays whole
    assert_eq!(arena[key].len(), 11);
}

#[test]
fn split_never_yields_short_piece() {
    let mut arena = CurveArena::new();
    for n in 3..8 {
        let key = line(&mut arena, 0.0, 1.0, 0.0, n);
        for i in 0..=20 {
            let center = Point3::new(i as f64 / 10.0 - 0.5, 0.0, 0.0);
            let (head, tail) = split_curve(&mut arena, key, center, 0).unwrap();
            assert!(arena[head].len() >= 2);
            assert!(arena[tail].len() >= 2);
        }
    }
}

// =============================================================================
// PAIR CONSTRUCTION
// =============================================================================

#[test]
fn hole_in_upper_layer_splits_lower_curve() {
    let mut arena = CurveArena::new();
    let a = line(&mut arena, 0.0, 10.0, 0.0, 11);
    let b1 = line(&mut arena, 0.0, 4.0, 1.0, 5);
    let b2 = line(&mut arena, 6.0, 10.0, 1.0, 5);
    let prev = layer(&arena, 0.0, vec![a], vec![]);
    let cur = layer(&arena, 1.0, vec![b1, b2], vec![Point3::new(5.0, 0.0, 1.0)]);

    let matching = match_holes(prev.holes(), cur.holes(), 0, &StitchConfig::default());
    assert_eq!(matching.records.len(), 1);
    assert_eq!(matching.records[0].owner, Owner::Cur);

    let pairs = build_curve_pairs(&mut arena, &prev, &cur, &matching.records, 0).unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].cur, b1);
    assert_eq!(pairs[1].cur, b2);

    let head = &arena[pairs[0].prev];
    let tail = &arena[pairs[1].prev];
    assert_eq!(head.endpoints(), [Point3::ZERO, Point3::new(5.0, 0.0, 0.0)]);
    assert_eq!(
        tail.endpoints(),
        [Point3::new(5.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)]
    );
}

#[test]
fn hole_in_lower_layer_splits_upper_curve() {
    let mut arena = CurveArena::new();
    let a1 = line(&mut arena, 0.0, 4.0, 0.0, 5);
    let a2 = line(&mut arena, 6.0, 10.0, 0.0, 5);
    let b = line(&mut arena, 0.0, 10.0, 1.0, 11);
    let prev = layer(&arena, 0.0, vec![a1, a2], vec![Point3::new(5.0, 0.0, 0.0)]);
    let cur = layer(&arena, 1.0, vec![b], vec![]);

    let records = [record(Owner::Prev, 5.0, 0.0)];
    let pairs = build_curve_pairs(&mut arena, &prev, &cur, &records, 0).unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].prev, a1);
    assert_eq!(pairs[1].prev, a2);
    assert_eq!(arena[pairs[0].cur].len(), 6);
    assert_eq!(arena[pairs[1].cur].len(), 6);
}

#[test]
fn closing_several_holes_against_one_curve() {
    let mut arena = CurveArena::new();
    let lower: Vec<_> = [(0.0, 2.0), (3.0, 5.0), (6.0, 8.0), (9.0, 10.0)]
        .iter()
        .map(|&(x0, x1)| line(&mut arena, x0, x1, 0.0, 5))
        .collect();
    let b = line(&mut arena, 0.0, 10.0, 1.0, 21);
    let centers = vec![
        Point3::new(2.5, 0.0, 0.0),
        Point3::new(5.5, 0.0, 0.0),
        Point3::new(8.5, 0.0, 0.0),
    ];
    let prev = layer(&arena, 0.0, lower.clone(), centers);
    let cur = layer(&arena, 1.0, vec![b], vec![]);

    let matching = match_holes(prev.holes(), cur.holes(), 0, &StitchConfig::default());
    let pairs = build_curve_pairs(&mut arena, &prev, &cur, &matching.records, 0).unwrap();
    assert_eq!(pairs.len(), 4);
    let prevs: Vec<_> = pairs.iter().map(|p| p.prev).collect();
    assert_eq!(prevs, lower);
    // consecutive upper pieces meet where they were cut
    for w in pairs.windows(2) {
        assert_eq!(arena[w[0].cur].endpoints()[1], arena[w[1].cur].endpoints()[0]);
    }
}

#[test]
fn matched_hole_pairs_curves_directly() {
    let mut arena = CurveArena::new();
    let a1 = line(&mut arena, 0.0, 4.0, 0.0, 5);
    let a2 = line(&mut arena, 6.0, 10.0, 0.0, 5);
    let b1 = line(&mut arena, 0.0, 4.5, 1.0, 5);
    let b2 = line(&mut arena, 5.5, 10.0, 1.0, 5);
    let prev = layer(&arena, 0.0, vec![a1, a2], vec![Point3::new(5.0, 0.0, 0.0)]);
    let cur = layer(&arena, 1.0, vec![b1, b2], vec![Point3::new(5.0, 0.0, 1.0)]);
    let before = arena.len();

    let records = [record(Owner::Both, 5.0, 0.5)];
    let pairs = build_curve_pairs(&mut arena, &prev, &cur, &records, 0).unwrap();
    assert_eq!(
        pairs,
        vec![
            CurvePair { prev: a1, cur: b1, layer_pair: 0 },
            CurvePair { prev: a2, cur: b2, layer_pair: 0 },
        ]
    );
    assert_eq!(arena.len(), before);
}

#[test]
fn exhausted_cursor_is_topology_error() {
    let mut arena = CurveArena::new();
    let a = line(&mut arena, 0.0, 10.0, 0.0, 11);
    let b = line(&mut arena, 0.0, 10.0, 1.0, 11);
    let prev = layer(&arena, 0.0, vec![a], vec![]);
    let cur = layer(&arena, 1.0, vec![b], vec![]);

    let records = [record(Owner::Both, 5.0, 0.5)];
    let err = build_curve_pairs(&mut arena, &prev, &cur, &records, 4).unwrap_err();
    assert!(matches!(err, StitchError::Topology { layer_pair: 4, .. }));
}

#[test]
fn short_curve_is_topology_error() {
    let mut arena = CurveArena::new();
    let a = line(&mut arena, 0.0, 10.0, 0.0, 2);
    let b1 = line(&mut arena, 0.0, 4.0, 1.0, 5);
    let b2 = line(&mut arena, 6.0, 10.0, 1.0, 5);
    let prev = layer(&arena, 0.0, vec![a], vec![]);
    let cur = layer(&arena, 1.0, vec![b1, b2], vec![Point3::new(5.0, 0.0, 1.0)]);

    let records = [record(Owner::Cur, 5.0, 1.0)];
    let err = build_curve_pairs(&mut arena, &prev, &cur, &records, 0).unwrap_err();
    assert!(err.to_string().contains("too short"));
}
