//! # Layers
//!
//! Curves sharing a z value (within half a slice) form a [`Layer`]. Each
//! layer carries a [`HoleDescriptor`]: its two outer extreme endpoints and
//! the centers of the gaps ("holes") between its consecutive curves.
//!
//! - [`sorter`]: groups raw curves into z-ordered layers
//! - [`orderer`]: orders the curves of a multi-curve layer along a reference
//!   axis and locates the holes

pub mod orderer;
pub mod sorter;


pub use orderer::{order_layer, OrderedLayer, ReferenceAxis};
pub use sorter::sort_into_layers;

use serde::{Deserialize, Serialize};

use crate::curve::{Curve, CurveKey};
use crate::geom::{fractional_position, Point3};

/// A gap between two consecutive curves of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    /// Midpoint between the nearest endpoints of the two curves.
    pub center: Point3,
    /// Position along the layer's endpoint axis, in `[0, 1]`.
    pub pctg: f64,
}

/// Outer endpoints of a layer and the holes between its curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleDescriptor {
    endpoints: [Point3; 2],
    holes: Vec<Hole>,
}

impl HoleDescriptor {
    /// Descriptor of a layer without holes.
    pub fn without_holes(endpoints: [Point3; 2]) -> Self {
        Self {
            endpoints,
            holes: Vec::new(),
        }
    }

    /// Descriptor of a single-curve layer: the curve's own endpoints.
    pub fn for_single_curve(curve: &Curve) -> Self {
        Self::without_holes(curve.endpoints())
    }

    /// Builds a descriptor, computing each hole's `pctg` against the endpoints.
    ///
    /// # Examples
    /// ```
    /// use contour_stitch::layer::HoleDescriptor;
    /// use contour_stitch::Point3;
    ///
    /// let holes = HoleDescriptor::from_centers(
    ///     [Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)],
    ///     vec![Point3::new(3.0, 0.0, 0.0)],
    /// );
    /// assert_eq!(holes.pctgs(), vec![0.3]);
    /// ```
    pub fn from_centers(endpoints: [Point3; 2], centers: Vec<Point3>) -> Self {
        let holes = centers
            .into_iter()
            .map(|center| Hole {
                center,
                pctg: fractional_position(center, endpoints[0], endpoints[1]),
            })
            .collect();
        Self { endpoints, holes }
    }

    /// The layer's two extreme endpoints.
    #[inline]
    pub fn endpoints(&self) -> [Point3; 2] {
        self.endpoints
    }

    /// Holes in curve order.
    #[inline]
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    /// Number of holes.
    #[inline]
    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// Hole positions in curve order.
    pub fn pctgs(&self) -> Vec<f64> {
        self.holes.iter().map(|h| h.pctg).collect()
    }

    /// The same descriptor seen from the other end: endpoints swapped, holes
    /// reversed, positions recomputed.
    pub fn reversed(&self) -> Self {
        let endpoints = [self.endpoints[1], self.endpoints[0]];
        let centers = self.holes.iter().rev().map(|h| h.center).collect();
        Self::from_centers(endpoints, centers)
    }
}

/// Curves sharing one z value, in left-to-right order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    z: f64,
    curves: Vec<CurveKey>,
    holes: HoleDescriptor,
}

impl Layer {
    /// Creates a layer.
    pub fn new(z: f64, curves: Vec<CurveKey>, holes: HoleDescriptor) -> Self {
        Self { z, curves, holes }
    }

    /// z value of the layer.
    #[inline]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Curve keys in order.
    #[inline]
    pub fn curves(&self) -> &[CurveKey] {
        &self.curves
    }

    /// Hole descriptor.
    #[inline]
    pub fn holes(&self) -> &HoleDescriptor {
        &self.holes
    }

    /// Number of holes in the layer.
    #[inline]
    pub fn hole_count(&self) -> usize {
        self.holes.hole_count()
    }

    /// Layer with reversed curve order and reversed hole descriptor.
    pub fn reversed(&self) -> Self {
        let mut curves = self.curves.clone();
        curves.reverse();
        Self {
            z: self.z,
            curves,
            holes: self.holes.reversed(),
        }
    }

    /// Layer with the given curves substituted, same z and holes.
    pub fn with_curves(&self, curves: Vec<CurveKey>) -> Self {
        Self {
            z: self.z,
            curves,
            holes: self.holes.clone(),
        }
    }
}
