//! # Mesh Data Structure
//!
//! Polygon mesh with mixed quad and triangle faces, as produced by lofting.
//! Quads are only split into triangles on export.

use config::constants::EPSILON_TOLERANCE;
use serde::{Deserialize, Serialize};

use crate::geom::Point3;

/// A mesh face given by vertex indices in winding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Triangle.
    Tri([u32; 3]),
    /// Quadrilateral.
    Quad([u32; 4]),
}

impl Face {
    /// Builds a face from up to four corners, dropping every corner that is
    /// `same` as an earlier one.
    ///
    /// Returns `None` when fewer than three distinct corners remain.
    ///
    /// # Examples
    /// ```
    /// use contour_stitch::mesh::Face;
    /// let same = |a: u32, b: u32| a == b;
    /// assert_eq!(Face::from_corners(&[0, 1, 2, 3], same), Some(Face::Quad([0, 1, 2, 3])));
    /// assert_eq!(Face::from_corners(&[0, 1, 1, 3], same), Some(Face::Tri([0, 1, 3])));
    /// assert_eq!(Face::from_corners(&[0, 0, 3, 3], same), None);
    /// ```
    pub fn from_corners(corners: &[u32], same: impl Fn(u32, u32) -> bool) -> Option<Self> {
        let mut kept: Vec<u32> = Vec::with_capacity(4);
        for &c in corners {
            if !kept.iter().any(|&k| same(k, c)) {
                kept.push(c);
            }
        }
        match kept[..] {
            [a, b, c] => Some(Face::Tri([a, b, c])),
            [a, b, c, d] => Some(Face::Quad([a, b, c, d])),
            _ => None,
        }
    }

    /// Vertex indices in winding order.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        match self {
            Face::Tri(v) => v.as_slice(),
            Face::Quad(v) => v.as_slice(),
        }
    }

    /// The same face with every index passed through `map`, collapsed like
    /// [`Face::from_corners`].
    pub fn remapped(&self, map: impl Fn(u32) -> u32) -> Option<Self> {
        let corners: Vec<u32> = self.indices().iter().map(|&i| map(i)).collect();
        Self::from_corners(&corners, |a, b| a == b)
    }

    /// Edges in winding order, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = [u32; 2]> + '_ {
        let idx = self.indices();
        (0..idx.len()).map(move |i| [idx[i], idx[(i + 1) % idx.len()]])
    }

    /// Fan triangulation.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let idx = self.indices();
        (1..idx.len() - 1).map(move |i| [idx[0], idx[i], idx[i + 1]])
    }
}

/// The reconstructed surface.
///
/// # Example
///
/// ```rust
/// use contour_stitch::mesh::{Face, Mesh};
/// use contour_stitch::Point3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
/// mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
/// mesh.add_face(Face::Quad([0, 1, 2, 3]));
/// assert_eq!(mesh.triangles().len(), 2);
/// assert_eq!(mesh.boundary_edges().len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    vertices: Vec<Point3>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh from raw buffers.
    pub fn from_parts(vertices: Vec<Point3>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: Point3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a face.
    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> Point3 {
        self.vertices[index as usize]
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (Point3, Point3) {
        let Some((&first, rest)) = self.vertices.split_first() else {
            return (Point3::ZERO, Point3::ZERO);
        };
        rest.iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Appends another mesh, offsetting its indices.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .filter_map(|face| face.remapped(|i| i + offset)),
        );
    }

    /// Triangle list, quads split along their first diagonal.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.faces.iter().flat_map(|f| f.triangles()).collect()
    }

    /// Undirected edges (smaller index first) used by exactly one face,
    /// sorted.
    pub fn boundary_edges(&self) -> Vec<[u32; 2]> {
        let mut edges: Vec<[u32; 2]> = self
            .faces
            .iter()
            .flat_map(|f| f.edges())
            .map(|[a, b]| [a.min(b), a.max(b)])
            .collect();
        edges.sort_unstable();

        let mut boundary = Vec::new();
        let mut i = 0;
        while i < edges.len() {
            let mut j = i + 1;
            while j < edges.len() && edges[j] == edges[i] {
                j += 1;
            }
            if j - i == 1 {
                boundary.push(edges[i]);
            }
            i = j;
        }
        boundary
    }

    /// Per-vertex flag: true for vertices on a boundary edge.
    pub fn boundary_vertices(&self) -> Vec<bool> {
        let mut flags = vec![false; self.vertices.len()];
        for [a, b] in self.boundary_edges() {
            flags[a as usize] = true;
            flags[b as usize] = true;
        }
        flags
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All face indices are valid
    /// - No face repeats a vertex
    /// - No face has zero area
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        self.faces.iter().all(|face| {
            let idx = face.indices();
            if idx.iter().any(|&i| i >= vertex_count) {
                return false;
            }
            if (0..idx.len()).any(|i| idx[i + 1..].contains(&idx[i])) {
                return false;
            }
            let area: f64 = face
                .triangles()
                .map(|[a, b, c]| {
                    let (v0, v1, v2) = (self.vertex(a), self.vertex(b), self.vertex(c));
                    (v1 - v0).cross(v2 - v0).length()
                })
                .sum();
            area >= EPSILON_TOLERANCE
        })
    }

    /// Drops vertices no face refers to and renumbers the rest.
    pub fn compact(&mut self) {
        let mut used = vec![false; self.vertices.len()];
        for face in &self.faces {
            for &i in face.indices() {
                used[i as usize] = true;
            }
        }

        let mut remap = vec![u32::MAX; self.vertices.len()];
        let mut vertices = Vec::with_capacity(self.vertices.len());
        for (i, v) in self.vertices.iter().enumerate() {
            if used[i] {
                remap[i] = vertices.len() as u32;
                vertices.push(*v);
            }
        }

        self.vertices = vertices;
        self.faces = self
            .faces
            .iter()
            .filter_map(|f| f.remapped(|i| remap[i as usize]))
            .collect();
    }

    /// Replaces every face by its image under `remap`, dropping faces that
    /// collapse to fewer than three distinct vertices.
    pub(crate) fn remap_faces(&mut self, remap: &[u32]) {
        self.faces = self
            .faces
            .iter()
            .filter_map(|f| f.remapped(|i| remap[i as usize]))
            .collect();
    }
}

#[cfg(test)]
mod tests;
