//! # Mesh Assembly
//!
//! Joins lofted patches into one mesh.
//!
//! 1. Concatenate all patches
//! 2. Weld seams: vertices closer than the seam epsilon become one. The
//!    epsilon is capped at [`SEAM_WELD_FRACTION`] of the threshold so that
//!    small-unit stacks keep their distinct vertices
//! 3. Thin out: vertices closer than the mesh-density threshold are merged
//!    into the first vertex of their cluster. On open surfaces boundary
//!    vertices take no part, so the outer loops keep their shape
//! 4. Drop collapsed faces and unreferenced vertices
//!
//! Both merge passes bucket vertices in a hash grid with the merge radius
//! as cell size, so only the 27 surrounding cells are searched.

use std::collections::HashMap;

use config::constants::SEAM_WELD_FRACTION;
use log::debug;

use crate::geom::Point3;
use crate::loft::SurfacePatch;
use crate::mesh::Mesh;

/// Merges patches into one mesh.
///
/// `threshold` is the mesh-density threshold; `closed` selects whether the
/// boundary is thinned as well.
///
/// # Example
///
/// ```rust
/// use contour_stitch::assemble::assemble;
/// use contour_stitch::loft::loft_pair;
/// use contour_stitch::{Curve, Point3};
///
/// let a = Curve::open(vec![Point3::ZERO, Point3::X]);
/// let b = Curve::open(vec![Point3::Z, Point3::new(1.0, 0.0, 1.0)]);
/// let c = Curve::open(vec![Point3::new(0.0, 0.0, 2.0), Point3::new(1.0, 0.0, 2.0)]);
///
/// let patches = [loft_pair(&a, &b, 1.0), loft_pair(&b, &c, 1.0)];
/// let mesh = assemble(&patches, 0.1, false, 1e-4);
/// // the shared row is welded
/// assert_eq!(mesh.vertex_count(), 10);
/// assert_eq!(mesh.face_count(), 4);
/// ```
pub fn assemble(patches: &[SurfacePatch], threshold: f64, closed: bool, weld_epsilon: f64) -> Mesh {
    let mut mesh = Mesh::with_capacity(
        patches.iter().map(|p| p.vertices.len()).sum(),
        patches.iter().map(|p| p.faces.len()).sum(),
    );
    for patch in patches {
        mesh.merge(&patch.to_mesh());
    }
    let raw_vertices = mesh.vertex_count();

    let seam_radius = weld_epsilon.min(threshold * SEAM_WELD_FRACTION);
    let seams = weld(&mut mesh, seam_radius, None);

    let locked = if closed {
        None
    } else {
        Some(mesh.boundary_vertices())
    };
    let thinned = weld(&mut mesh, threshold, locked.as_deref());

    mesh.compact();
    debug!(
        "assembled {} patches: {} vertices, {} seam welds, {} thinned, {} left ({} faces)",
        patches.len(),
        raw_vertices,
        seams,
        thinned,
        mesh.vertex_count(),
        mesh.face_count()
    );
    mesh
}

/// Merges vertices closer than `radius` into the first vertex of their
/// cluster and rewrites the faces. Returns the number of merged vertices.
///
/// Locked vertices neither move nor absorb others.
fn weld(mesh: &mut Mesh, radius: f64, locked: Option<&[bool]>) -> usize {
    let (remap, merged) = cluster(mesh.vertices(), radius, locked);
    if merged > 0 {
        mesh.remap_faces(&remap);
    }
    merged
}

/// Maps every vertex to its cluster representative.
fn cluster(points: &[Point3], radius: f64, locked: Option<&[bool]>) -> (Vec<u32>, usize) {
    let mut remap: Vec<u32> = (0..points.len() as u32).collect();
    if !radius.is_finite() || radius <= 0.0 {
        return (remap, 0);
    }

    let inv = 1.0 / radius;
    let cell = |p: Point3| -> Option<(i64, i64, i64)> {
        let q = (p * inv).floor();
        q.is_finite().then(|| (q.x as i64, q.y as i64, q.z as i64))
    };

    let mut buckets: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
    let mut merged = 0;
    for (i, &p) in points.iter().enumerate() {
        if locked.is_some_and(|l| l.get(i).copied().unwrap_or(false)) {
            continue;
        }
        let Some(key) = cell(p) else {
            continue;
        };

        let mut found = None;
        'search: for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(candidates) = buckets.get(&(key.0 + dx, key.1 + dy, key.2 + dz)) else {
                        continue;
                    };
                    if let Some(&rep) = candidates
                        .iter()
                        .find(|&&rep| points[rep as usize].distance(p) < radius)
                    {
                        found = Some(rep);
                        break 'search;
                    }
                }
            }
        }

        match found {
            Some(rep) => {
                remap[i] = rep;
                merged += 1;
            }
            None => buckets.entry(key).or_default().push(i as u32),
        }
    }
    (remap, merged)
}

#[cfg(test)]
mod tests;
