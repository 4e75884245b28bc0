//! # Contour Stitch
//!
//! Reconstructs a surface mesh from planar cross-section curves traced on
//! successive slices of an image stack.
//!
//! ## Architecture
//!
//! ```text
//! traced curves → layer (sort, order) → orient → matching → split → loft → assemble → Mesh
//! ```
//!
//! ## Stages
//!
//! - **Layering**: curves within half a slice of each other form a layer;
//!   multi-curve layers are ordered along a reference axis and the gaps
//!   ("holes") between neighbouring curves are located
//! - **Orientation**: layer and point order are aligned across the stack
//! - **Matching**: holes of adjacent layers are merged into correspondence
//!   records
//! - **Splitting**: curves are cut at unmatched holes into loftable pairs
//! - **Lofting**: each pair becomes a ruled patch
//! - **Assembly**: patches are welded into one mesh
//!
//! ## Usage
//!
//! ```rust
//! use contour_stitch::{reconstruct, InputObject, Point3, ReconstructionInput, StackDimensions, StitchConfig};
//!
//! let ring = |z: f64| {
//!     (0..16)
//!         .map(|i| {
//!             let a = std::f64::consts::TAU * i as f64 / 16.0;
//!             Point3::new(a.cos(), a.sin(), z)
//!         })
//!         .collect::<Vec<_>>()
//! };
//! let objects = (0..3).map(|i| InputObject::curve(i, ring(i as f64))).collect();
//! let stack = StackDimensions::new(2.0, 2.0, 3.0, 3).unwrap();
//!
//! let result = reconstruct(&ReconstructionInput::new(objects, stack, true), &StitchConfig::default()).unwrap();
//! assert_eq!(result.patch_count, 2);
//! assert!(!result.mesh.is_empty());
//! ```

pub mod assemble;
pub mod curve;
pub mod error;
pub mod geom;
pub mod layer;
pub mod loft;
pub mod matching;
pub mod mesh;
pub mod orient;
pub mod pipeline;
pub mod prepare;
pub mod settings;
pub mod split;

pub use curve::{Curve, CurveId};
pub use error::{StitchError, StitchResult};
pub use geom::Point3;
pub use matching::TopologyWarning;
pub use mesh::{Face, Mesh};
pub use pipeline::{
    build_patches, reconstruct, InputObject, PatchBuild, Reconstruction, ReconstructionInput,
    TracedCurve,
};
pub use settings::{StackDimensions, StitchConfig};
