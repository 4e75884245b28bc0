//! # Reconstruction Pipeline
//!
//! Runs the stages end to end:
//!
//! ```text
//! validate -> prepare (opt-in) -> sort -> orient -> match -> split -> loft -> assemble
//! ```
//!
//! Nothing is returned until every stage has succeeded; any error aborts the
//! whole reconstruction.

use std::collections::BTreeSet;

use config::constants::{MIN_CURVES, MIN_CURVE_VERTICES};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::assemble::assemble;
use crate::curve::{Curve, CurveArena, CurveId, CurveKey};
use crate::error::{StitchError, StitchResult};
use crate::geom::Point3;
use crate::layer::{sort_into_layers, Layer};
use crate::loft::{loft_pair_with_tolerance, SurfacePatch};
use crate::matching::{match_holes, TopologyWarning};
use crate::mesh::Mesh;
use crate::orient::{reconcile_layer_order, reconcile_point_order};
use crate::prepare::prepare_curve;
use crate::settings::{StackDimensions, StitchConfig};
use crate::split::{build_curve_pairs, CurvePair};

// =============================================================================
// INPUT
// =============================================================================

/// A traced curve as handed over by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracedCurve {
    /// Caller identifier.
    pub id: CurveId,
    /// Vertices in tracing order.
    pub points: Vec<Point3>,
}

/// One object of the caller's input set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputObject {
    /// A traced curve.
    Curve(TracedCurve),
    /// Anything else; rejected during validation.
    Other {
        /// Caller label used in the error message
        label: String,
    },
}

impl InputObject {
    /// Shorthand for a traced curve.
    pub fn curve(id: u64, points: Vec<Point3>) -> Self {
        Self::Curve(TracedCurve {
            id: CurveId(id),
            points,
        })
    }

    /// Shorthand for a non-curve object.
    pub fn other(label: impl Into<String>) -> Self {
        Self::Other {
            label: label.into(),
        }
    }
}

/// Everything a reconstruction needs besides the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionInput {
    /// Objects to stitch.
    pub objects: Vec<InputObject>,
    /// Size of the source image stack.
    pub stack: StackDimensions,
    /// Treat every curve as closed.
    pub closed: bool,
}

impl ReconstructionInput {
    /// Creates an input set.
    pub fn new(objects: Vec<InputObject>, stack: StackDimensions, closed: bool) -> Self {
        Self {
            objects,
            stack,
            closed,
        }
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Result of a successful reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconstruction {
    /// The assembled surface.
    pub mesh: Mesh,
    /// Number of lofted patches.
    pub patch_count: usize,
    /// Input curves the caller may now discard.
    pub discarded: BTreeSet<CurveId>,
    /// Non-fatal findings.
    pub warnings: Vec<TopologyWarning>,
}

/// Intermediate state after lofting, before assembly.
#[derive(Debug, Clone)]
pub struct PatchBuild {
    /// Every curve created along the way: inputs, reversals and split pieces.
    pub arena: CurveArena,
    /// Reconciled layers, bottom to top.
    pub layers: Vec<Layer>,
    /// Curve pairs in lofting order.
    pub pairs: Vec<CurvePair>,
    /// One patch per curve pair.
    pub patches: Vec<SurfacePatch>,
    /// Non-fatal findings.
    pub warnings: Vec<TopologyWarning>,
    /// Input curves that ended up in a layer.
    pub consumed: BTreeSet<CurveId>,
    /// Mesh-density threshold the patches were lofted with.
    pub threshold: f64,
}

// =============================================================================
// STAGES
// =============================================================================

/// Checks the input set and converts it into curves.
fn validate(input: &ReconstructionInput) -> StitchResult<Vec<(CurveId, Curve)>> {
    let mut curves = Vec::with_capacity(input.objects.len());
    for object in &input.objects {
        match object {
            InputObject::Curve(traced) => {
                if traced.points.len() < MIN_CURVE_VERTICES {
                    return Err(StitchError::DegenerateCurve {
                        id: traced.id,
                        vertices: traced.points.len(),
                        min: MIN_CURVE_VERTICES,
                    });
                }
                let curve = Curve::new(traced.points.clone(), input.closed).with_source(traced.id);
                curves.push((traced.id, curve));
            }
            InputObject::Other { label } => {
                return Err(StitchError::NonCurveObject {
                    label: label.clone(),
                });
            }
        }
    }
    if curves.len() < MIN_CURVES {
        return Err(StitchError::TooFewCurves {
            count: curves.len(),
            min: MIN_CURVES,
        });
    }
    Ok(curves)
}

/// Runs every stage up to and including lofting.
///
/// # Example
///
/// ```rust
/// use contour_stitch::{build_patches, InputObject, Point3, ReconstructionInput, StackDimensions, StitchConfig};
///
/// let line = |z: f64| (0..5).map(|i| Point3::new(i as f64, 0.0, z)).collect::<Vec<_>>();
/// let objects = vec![
///     InputObject::curve(1, line(0.0)),
///     InputObject::curve(2, line(1.0)),
///     InputObject::curve(3, line(2.0)),
/// ];
/// let input = ReconstructionInput::new(objects, StackDimensions::new(4.0, 4.0, 3.0, 3).unwrap(), false);
///
/// let build = build_patches(&input, &StitchConfig::default()).unwrap();
/// assert_eq!(build.layers.len(), 3);
/// assert_eq!(build.patches.len(), 2);
/// ```
pub fn build_patches(input: &ReconstructionInput, cfg: &StitchConfig) -> StitchResult<PatchBuild> {
    cfg.validate()?;
    let curves = validate(input)?;
    let stack = &input.stack;
    let threshold = stack.mesh_density_threshold(cfg.precision);

    let curves: Vec<Curve> = if cfg.prepare_curves {
        let delta_z = stack.delta_z();
        curves
            .iter()
            .map(|(id, c)| prepare_curve(*id, c, delta_z, threshold))
            .collect::<StitchResult<Vec<_>>>()?
    } else {
        curves.into_iter().map(|(_, c)| c).collect()
    };

    let mut arena = CurveArena::new();
    let keys: Vec<CurveKey> = curves.into_iter().map(|c| arena.insert(c)).collect();

    let layers = sort_into_layers(&arena, &keys, stack, cfg);
    if layers.len() < 2 {
        return Err(StitchError::TooFewLayers {
            count: layers.len(),
        });
    }
    let consumed: BTreeSet<CurveId> = layers
        .iter()
        .flat_map(|l| l.curves())
        .filter_map(|&key| arena[key].source())
        .collect();

    let layers = reconcile_layer_order(layers);
    let layers = reconcile_point_order(&mut arena, &layers, input.closed);

    let mut pairs = Vec::new();
    let mut warnings = Vec::new();
    for (i, window) in layers.windows(2).enumerate() {
        let (prev, cur) = (&window[0], &window[1]);
        let matching = match_holes(prev.holes(), cur.holes(), i, cfg);
        pairs.extend(build_curve_pairs(&mut arena, prev, cur, &matching.records, i)?);
        warnings.extend(matching.warnings);
    }

    let patches: Vec<SurfacePatch> = pairs
        .iter()
        .map(|pair| {
            let (prev, cur) = (&arena[pair.prev], &arena[pair.cur]);
            loft_pair_with_tolerance(prev, cur, threshold, cfg.tolerance)
        })
        .collect();

    debug!(
        "{} layers -> {} curve pairs -> {} patches ({} warnings)",
        layers.len(),
        pairs.len(),
        patches.len(),
        warnings.len()
    );

    Ok(PatchBuild {
        arena,
        layers,
        pairs,
        patches,
        warnings,
        consumed,
        threshold,
    })
}

/// Reconstructs a surface mesh from stacked traced curves.
///
/// # Errors
///
/// Input errors ([`StitchError::is_input_error`]) are reported before any
/// curve is processed; topology errors abort the run from the stage that
/// found them. No partial mesh is ever returned.
///
/// # Example
///
/// ```rust
/// use contour_stitch::{reconstruct, InputObject, Point3, ReconstructionInput, StackDimensions, StitchConfig};
///
/// let line = |z: f64| (0..5).map(|i| Point3::new(i as f64, 0.0, z)).collect::<Vec<_>>();
/// let objects = vec![InputObject::curve(1, line(0.0)), InputObject::curve(2, line(1.0))];
/// let input = ReconstructionInput::new(objects, StackDimensions::new(4.0, 4.0, 2.0, 2).unwrap(), false);
///
/// let result = reconstruct(&input, &StitchConfig::default()).unwrap();
/// assert_eq!(result.patch_count, 1);
/// assert_eq!(result.discarded.len(), 2);
/// assert!(result.mesh.validate());
/// ```
pub fn reconstruct(input: &ReconstructionInput, cfg: &StitchConfig) -> StitchResult<Reconstruction> {
    let build = build_patches(input, cfg)?;
    let mesh = assemble(
        &build.patches,
        build.threshold,
        input.closed,
        cfg.seam_weld_epsilon,
    );
    Ok(Reconstruction {
        mesh,
        patch_count: build.patches.len(),
        discarded: build.consumed,
        warnings: build.warnings,
    })
}
