//! Tests for patch assembly and vertex welding.

use super::*;
use crate::curve::Curve;
use crate::loft::loft_pair;

fn line(z: f64) -> Curve {
    Curve::open(vec![
        Point3::new(0.0, 0.0, z),
        Point3::new(1.0, 0.0, z),
        Point3::new(2.0, 0.0, z),
    ])
}

#[test]
fn empty_input_gives_empty_mesh() {
    let mesh = assemble(&[], 0.1, false, 1e-4);
    assert!(mesh.is_empty());
    assert_eq!(mesh.face_count(), 0);
}

#[test]
fn clusters_merge_into_first_vertex() {
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.6, 0.0, 0.0),
        Point3::new(1.2, 0.0, 0.0),
        Point3::new(1.5, 0.0, 0.0),
    ];
    let (remap, merged) = cluster(&points, 1.0, None);
    // no chaining: 1.2 is too far from the representative at 0.0
    assert_eq!(remap, vec![0, 0, 2, 2]);
    assert_eq!(merged, 2);
}

#[test]
fn locked_vertices_stay_apart() {
    let points = [Point3::ZERO, Point3::new(0.1, 0.0, 0.0), Point3::new(0.2, 0.0, 0.0)];
    let locked = [true, false, false];
    let (remap, merged) = cluster(&points, 1.0, Some(&locked));
    assert_eq!(remap, vec![0, 1, 1]);
    assert_eq!(merged, 1);
}

#[test]
fn non_positive_radius_is_identity() {
    let points = [Point3::ZERO, Point3::ZERO];
    assert_eq!(cluster(&points, 0.0, None), (vec![0, 1], 0));
    assert_eq!(cluster(&points, f64::NAN, None), (vec![0, 1], 0));
}

#[test]
fn seams_between_patches_are_welded() {
    let patches = [
        loft_pair(&line(0.0), &line(1.0), 1.0),
        loft_pair(&line(1.0), &line(2.0), 1.0),
    ];
    let mesh = assemble(&patches, 0.01, false, 1e-4);
    // 2 patches x 3 rows x 3 columns, one shared row
    assert_eq!(mesh.vertex_count(), 15);
    assert_eq!(mesh.face_count(), 8);
    assert!(mesh.validate());
    // the welded row is interior now
    let boundary = mesh.boundary_edges().len();
    assert_eq!(boundary, 4 + 4 + 2 + 2);
}

#[test]
fn dense_interior_is_thinned_and_boundary_kept() {
    // rows 1/11 apart, closer than the 0.1 threshold
    let patch = loft_pair(&line(0.0), &line(1.0), 0.1);
    assert_eq!(patch.rows, 12);
    let original = patch.to_mesh();
    let boundary: Vec<Point3> = original
        .boundary_vertices()
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b)
        .map(|(i, _)| original.vertex(i as u32))
        .collect();

    let mesh = assemble(&[patch], 0.1, false, 1e-4);
    // every second interior row vertex of the middle column is merged
    assert_eq!(mesh.vertex_count(), 36 - 5);
    assert!(mesh.validate());
    for p in boundary {
        assert!(mesh.vertices().contains(&p));
    }
}

#[test]
fn closed_surfaces_thin_the_boundary_too() {
    let patch = loft_pair(&line(0.0), &line(1.0), 0.1);
    let open = assemble(&[patch.clone()], 0.1, false, 1e-4);
    let closed = assemble(&[patch], 0.1, true, 1e-4);
    assert!(closed.vertex_count() < open.vertex_count());
    assert!(closed.faces().iter().all(|f| f.indices().len() >= 3));
}

#[test]
fn seam_weld_stays_below_small_threshold() {
    // vertices 5e-5 apart, well under the default seam epsilon of 1e-4
    let fine = |z: f64| Curve::open((0..11).map(|i| Point3::new(i as f64 * 5.0e-5, 0.0, z)).collect());
    let patch = loft_pair(&fine(0.0), &fine(1.0e-3), 2.0e-5);

    let mesh = assemble(&[patch], 2.0e-5, false, 1e-4);
    let bottom = mesh.vertices().iter().filter(|p| p.z == 0.0).count();
    let top = mesh.vertices().iter().filter(|p| p.z == 1.0e-3).count();
    assert_eq!(bottom, 11);
    assert_eq!(top, 11);
}
