//! Centralized configuration values shared across the contour stitching
//! pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Numerical tolerance used by geometric predicates.
///
/// # Examples
/// ```
/// use config::constants::EPSILON_TOLERANCE;
/// assert!(EPSILON_TOLERANCE < 1.0e-6);
/// ```
pub const EPSILON_TOLERANCE: f64 = 1.0e-9;

/// Distance under which vertices of neighbouring patches are treated as the
/// same point when seams are welded.
///
/// # Examples
/// ```
/// use config::constants::{EPSILON_TOLERANCE, SEAM_WELD_EPSILON};
/// assert!(SEAM_WELD_EPSILON > EPSILON_TOLERANCE);
/// ```
pub const SEAM_WELD_EPSILON: f64 = 1.0e-4;

/// Largest seam-weld distance as a fraction of the mesh-density threshold.
///
/// Keeps the seam weld below the mesh spacing on stacks measured in small
/// units, where [`SEAM_WELD_EPSILON`] alone would merge distinct vertices.
///
/// # Examples
/// ```
/// use config::constants::{SEAM_WELD_EPSILON, SEAM_WELD_FRACTION};
/// let threshold = 2.0e-5_f64;
/// assert!(SEAM_WELD_EPSILON.min(threshold * SEAM_WELD_FRACTION) < threshold);
/// ```
pub const SEAM_WELD_FRACTION: f64 = 0.01;

// =============================================================================
// HOLE MATCHING CONSTANTS
// =============================================================================

/// Largest difference in axis position (`pctg`) for which two holes from
/// adjacent layers are considered the same hole.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_DELTA_P_THRESH;
/// let (p_prev, p_cur) = (0.30_f64, 0.45_f64);
/// assert!((p_prev - p_cur).abs() < DEFAULT_DELTA_P_THRESH);
/// ```
pub const DEFAULT_DELTA_P_THRESH: f64 = 0.25;

/// Half-width of the band around [`DEFAULT_DELTA_P_THRESH`] inside which a
/// hole match is reported as ambiguous.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_AMBIGUITY_MARGIN, DEFAULT_DELTA_P_THRESH};
/// assert!(DEFAULT_AMBIGUITY_MARGIN < DEFAULT_DELTA_P_THRESH);
/// ```
pub const DEFAULT_AMBIGUITY_MARGIN: f64 = 0.05;

// =============================================================================
// REFERENCE AXIS CONSTANTS
// =============================================================================

/// Number of samples the reference axis would have if it spanned the full
/// stack width. The actual sample spacing is `stack_width / DEFAULT_AXIS_SAMPLES`.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_AXIS_SAMPLES;
/// let spacing = 10.0 / DEFAULT_AXIS_SAMPLES as f64;
/// assert!(spacing < 0.01);
/// ```
pub const DEFAULT_AXIS_SAMPLES: usize = 5000;

/// Extra samples appended beyond each end of the reference axis.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_AXIS_OVERSHOOT;
/// assert_eq!(DEFAULT_AXIS_OVERSHOOT, 100);
/// ```
pub const DEFAULT_AXIS_OVERSHOOT: usize = 100;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Default number of mesh points per stack side. The mesh-density threshold
/// is `max(width, height) / precision`.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_PRECISION;
/// let threshold = 1.0 / DEFAULT_PRECISION as f64;
/// assert_eq!(threshold, 0.002);
/// ```
pub const DEFAULT_PRECISION: u32 = 500;

/// Smallest accepted precision setting.
pub const MIN_PRECISION: u32 = 10;

/// Largest accepted precision setting.
pub const MAX_PRECISION: u32 = 10_000;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Minimum number of curves a reconstruction needs.
///
/// # Examples
/// ```
/// use config::constants::MIN_CURVES;
/// assert!(MIN_CURVES >= 2);
/// ```
pub const MIN_CURVES: usize = 2;

/// Minimum vertex count of an input curve.
pub const MIN_CURVE_VERTICES: usize = 2;

/// Minimum vertex count of a curve that is split at a hole. Smaller curves
/// would leave a zero-length piece after the inward offset.
///
/// # Examples
/// ```
/// use config::constants::{MIN_CURVE_VERTICES, MIN_SPLIT_VERTICES};
/// assert!(MIN_SPLIT_VERTICES > MIN_CURVE_VERTICES);
/// ```
pub const MIN_SPLIT_VERTICES: usize = 3;

/// Number of vertices the nearest split point is moved inward when it lands
/// on an extreme endpoint of a curve.
pub const SPLIT_INWARD_OFFSET: usize = 1;

/// Upper bound on halving passes when a long traced edge is subdivided during
/// curve preparation.
///
/// # Examples
/// ```
/// use config::constants::MAX_SUBDIVISION_PASSES;
/// assert!(2_usize.pow(MAX_SUBDIVISION_PASSES) < 1 << 20);
/// ```
pub const MAX_SUBDIVISION_PASSES: u32 = 16;

/// Number of leading vertex pairs sampled when estimating the distance
/// between two curves for the loft cut count.
pub const LOFT_SAMPLE_PAIRS: usize = 3;

// =============================================================================
// GLOBAL CONFIG SNAPSHOT
// =============================================================================

/// Immutable snapshot of global configuration settings that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Numeric tolerance propagated into geometric predicates.
    pub tolerance: f64,
    /// Mesh points per stack side.
    pub precision: u32,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerance and precision.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-6, 250).expect("valid config");
    /// assert_eq!(cfg.precision, 250);
    /// ```
    pub fn new(tolerance: f64, precision: u32) -> Result<Self, ConfigError> {
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(ConfigError::InvalidPrecision(precision));
        }
        Ok(Self {
            tolerance,
            precision,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON_TOLERANCE,
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the precision setting is outside the accepted range.
    InvalidPrecision(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidPrecision(value) => {
                write!(
                    f,
                    "precision must be within {MIN_PRECISION}..={MAX_PRECISION}: {value}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
