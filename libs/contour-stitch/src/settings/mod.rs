//! Stitching configuration building on the shared `config` crate.
//!
//! [`StitchConfig`] carries the tunable parameters of the pipeline and
//! [`StackDimensions`] the physical size of the source image stack, from
//! which the layer tolerance and the mesh-density threshold are derived.

use config::constants::{
    GlobalConfig, DEFAULT_AMBIGUITY_MARGIN, DEFAULT_AXIS_OVERSHOOT, DEFAULT_AXIS_SAMPLES,
    DEFAULT_DELTA_P_THRESH, DEFAULT_PRECISION, EPSILON_TOLERANCE, SEAM_WELD_EPSILON,
};
use serde::{Deserialize, Serialize};

use crate::error::{StitchError, StitchResult};

/// Tunable parameters of the stitching pipeline.
///
/// # Examples
/// ```
/// use contour_stitch::StitchConfig;
/// let cfg = StitchConfig::default();
/// assert_eq!(cfg.delta_p_thresh, 0.25);
/// assert_eq!(cfg.precision, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StitchConfig {
    /// Distance below which lofted patch corners count as one point.
    pub tolerance: f64,
    /// Mesh points per stack side.
    pub precision: u32,
    /// Largest `pctg` difference for which two holes are the same hole.
    pub delta_p_thresh: f64,
    /// Band around `delta_p_thresh` in which matches are reported as ambiguous.
    pub ambiguity_margin: f64,
    /// Axis samples per full stack width.
    pub axis_samples: usize,
    /// Extra axis samples beyond each end.
    pub axis_overshoot: usize,
    /// Distance for welding patch seams, capped at a fraction of the
    /// mesh-density threshold.
    pub seam_weld_epsilon: f64,
    /// Clean traced curves (z outliers, long edges, dense vertices) before sorting.
    pub prepare_curves: bool,
}

impl StitchConfig {
    /// Creates a configuration from explicit matching threshold and precision,
    /// taking every other value from the defaults.
    ///
    /// # Examples
    /// ```
    /// use contour_stitch::StitchConfig;
    /// let cfg = StitchConfig::new(0.2, 1000).unwrap();
    /// assert_eq!(cfg.precision, 1000);
    /// assert!(StitchConfig::new(0.0, 1000).is_err());
    /// ```
    pub fn new(delta_p_thresh: f64, precision: u32) -> StitchResult<Self> {
        let global = GlobalConfig::new(EPSILON_TOLERANCE, precision)?;
        let cfg = Self {
            tolerance: global.tolerance,
            precision: global.precision,
            delta_p_thresh,
            ..Self::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Returns a copy with curve preparation switched on or off.
    pub fn with_prepare_curves(mut self, prepare: bool) -> Self {
        self.prepare_curves = prepare;
        self
    }

    /// Returns a copy with a different ambiguity margin.
    pub fn with_ambiguity_margin(mut self, margin: f64) -> Self {
        self.ambiguity_margin = margin;
        self
    }

    /// Returns a copy with a different axis resolution.
    pub fn with_axis_resolution(mut self, samples: usize, overshoot: usize) -> Self {
        self.axis_samples = samples;
        self.axis_overshoot = overshoot;
        self
    }

    /// Checks every field, including ones set through the `with_*` helpers.
    pub fn validate(&self) -> StitchResult<()> {
        GlobalConfig::new(self.tolerance, self.precision)?;
        if !(self.delta_p_thresh > 0.0 && self.delta_p_thresh <= 1.0) {
            return Err(StitchError::config(format!(
                "delta_p_thresh must be within (0, 1]: {}",
                self.delta_p_thresh
            )));
        }
        if self.ambiguity_margin.is_nan() || self.ambiguity_margin < 0.0 {
            return Err(StitchError::config(format!(
                "ambiguity_margin must be non-negative: {}",
                self.ambiguity_margin
            )));
        }
        if self.axis_samples == 0 {
            return Err(StitchError::config("axis_samples must be positive"));
        }
        if self.seam_weld_epsilon.is_nan() || self.seam_weld_epsilon < 0.0 {
            return Err(StitchError::config(format!(
                "seam_weld_epsilon must be non-negative: {}",
                self.seam_weld_epsilon
            )));
        }
        Ok(())
    }
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON_TOLERANCE,
            precision: DEFAULT_PRECISION,
            delta_p_thresh: DEFAULT_DELTA_P_THRESH,
            ambiguity_margin: DEFAULT_AMBIGUITY_MARGIN,
            axis_samples: DEFAULT_AXIS_SAMPLES,
            axis_overshoot: DEFAULT_AXIS_OVERSHOOT,
            seam_weld_epsilon: SEAM_WELD_EPSILON,
            prepare_curves: false,
        }
    }
}

/// Physical size of the source image stack.
///
/// # Examples
/// ```
/// use contour_stitch::StackDimensions;
/// let stack = StackDimensions::new(10.0, 8.0, 4.0, 20).unwrap();
/// assert_eq!(stack.delta_z(), 0.1);
/// assert_eq!(stack.mesh_density_threshold(500), 0.02);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackDimensions {
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
    /// Extent along z.
    pub depth: f64,
    /// Number of slices in the stack.
    pub slice_count: usize,
}

impl StackDimensions {
    /// Creates stack dimensions, rejecting non-positive sizes and empty stacks.
    pub fn new(width: f64, height: f64, depth: f64, slice_count: usize) -> StitchResult<Self> {
        for (name, value) in [("width", width), ("height", height), ("depth", depth)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(StitchError::invalid_stack(format!(
                    "{name} must be positive and finite: {value}"
                )));
            }
        }
        if slice_count == 0 {
            return Err(StitchError::invalid_stack("slice_count must be positive"));
        }
        Ok(Self {
            width,
            height,
            depth,
            slice_count,
        })
    }

    /// Largest z difference between curves of the same layer: half a slice.
    #[inline]
    pub fn delta_z(&self) -> f64 {
        self.depth / self.slice_count as f64 / 2.0
    }

    /// Target edge length of the mesh for a precision setting.
    #[inline]
    pub fn mesh_density_threshold(&self, precision: u32) -> f64 {
        self.width.max(self.height) / f64::from(precision)
    }
}
