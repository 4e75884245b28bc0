//! Tests for the mesh data structure.

use super::*;

fn unit_quad() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
    mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
    mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
    mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
    mesh.add_face(Face::Quad([0, 1, 2, 3]));
    mesh
}

#[test]
fn test_mesh_new() {
    let mesh = Mesh::new();
    assert!(mesh.is_empty());
    assert_eq!(mesh.vertex_count(), 0);
    assert_eq!(mesh.face_count(), 0);
    assert_eq!(mesh.bounding_box(), (Point3::ZERO, Point3::ZERO));
}

#[test]
fn test_face_collapse() {
    let same = |a: u32, b: u32| a == b;
    assert_eq!(Face::from_corners(&[4, 4, 4, 4], same), None);
    assert_eq!(Face::from_corners(&[1, 2, 1, 3], same), Some(Face::Tri([1, 2, 3])));
    assert_eq!(Face::Quad([0, 1, 2, 3]).remapped(|i| i / 2), None);
    assert_eq!(
        Face::Quad([0, 1, 2, 3]).remapped(|i| if i == 3 { 0 } else { i }),
        Some(Face::Tri([0, 1, 2]))
    );
}

#[test]
fn test_face_edges_close_the_loop() {
    let edges: Vec<_> = Face::Tri([5, 6, 7]).edges().collect();
    assert_eq!(edges, vec![[5, 6], [6, 7], [7, 5]]);
}

#[test]
fn test_quad_triangulation() {
    let mesh = unit_quad();
    assert_eq!(mesh.triangles(), vec![[0, 1, 2], [0, 2, 3]]);
}

#[test]
fn test_boundary_of_strip() {
    let mut mesh = unit_quad();
    mesh.add_vertex(Point3::new(2.0, 0.0, 0.0));
    mesh.add_vertex(Point3::new(2.0, 1.0, 0.0));
    mesh.add_face(Face::Quad([1, 4, 5, 2]));

    // shared edge 1-2 is interior
    let boundary = mesh.boundary_edges();
    assert_eq!(boundary.len(), 6);
    assert!(!boundary.contains(&[1, 2]));
    assert!(mesh.boundary_vertices().iter().all(|&b| b));
}

#[test]
fn test_mesh_bounding_box() {
    let mut mesh = unit_quad();
    mesh.add_vertex(Point3::new(-1.0, -2.0, -3.0));
    let (min, max) = mesh.bounding_box();
    assert_eq!(min, Point3::new(-1.0, -2.0, -3.0));
    assert_eq!(max, Point3::new(1.0, 1.0, 0.0));
}

#[test]
fn test_mesh_validate() {
    assert!(unit_quad().validate());

    let mut bad_index = unit_quad();
    bad_index.add_face(Face::Tri([0, 1, 9]));
    assert!(!bad_index.validate());

    let mut flat = unit_quad();
    flat.add_vertex(Point3::new(2.0, 0.0, 0.0));
    flat.add_face(Face::Tri([0, 1, 4]));
    assert!(!flat.validate());
}

#[test]
fn test_mesh_merge() {
    let mut mesh = unit_quad();
    mesh.merge(&unit_quad());
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.faces()[1], Face::Quad([4, 5, 6, 7]));
}

#[test]
fn test_compact_drops_unused_vertices() {
    let mut mesh = Mesh::new();
    mesh.add_vertex(Point3::new(9.0, 9.0, 9.0));
    mesh.merge(&unit_quad());
    mesh.compact();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.faces(), &[Face::Quad([0, 1, 2, 3])]);
    assert_eq!(mesh.vertex(0), Point3::ZERO);
}
