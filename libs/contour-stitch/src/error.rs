//! # Error Types
//!
//! Error types for contour stitching. All errors are explicit and abort the
//! whole reconstruction; no partial mesh is ever returned.
//!
//! ## Error Policy
//!
//! - Input problems are reported before any curve is touched
//! - Broken splitter invariants surface as topology errors with the layer pair
//! - Ambiguous hole matches are warnings (see [`crate::matching::TopologyWarning`]),
//!   not errors

use thiserror::Error;

use crate::curve::CurveId;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while reconstructing a surface.
///
/// ## Example
///
/// ```rust
/// use contour_stitch::{reconstruct, ReconstructionInput, StackDimensions, StitchConfig, StitchError};
///
/// let stack = StackDimensions::new(10.0, 10.0, 10.0, 10).unwrap();
/// let input = ReconstructionInput::new(Vec::new(), stack, false);
/// match reconstruct(&input, &StitchConfig::default()) {
///     Err(StitchError::TooFewCurves { count, .. }) => assert_eq!(count, 0),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StitchError {
    /// Fewer curves than a reconstruction needs.
    #[error("Too few curves: {count} (min: {min})")]
    TooFewCurves {
        /// Number of curves supplied
        count: usize,
        /// Minimum required
        min: usize,
    },

    /// All curves fall into fewer layers than a surface needs.
    #[error("Curves span {count} layer(s) (min: 2)")]
    TooFewLayers {
        /// Number of layers found
        count: usize,
    },

    /// An object in the input set is not a curve.
    #[error("Non-curve object in input: {label}")]
    NonCurveObject {
        /// Caller label of the offending object
        label: String,
    },

    /// A curve with too few vertices to loft.
    #[error("Curve {id} has {vertices} vertices (min: {min})")]
    DegenerateCurve {
        /// Offending curve
        id: CurveId,
        /// Number of vertices it has
        vertices: usize,
        /// Minimum required
        min: usize,
    },

    /// Image stack dimensions that cannot derive tolerances.
    #[error("Invalid stack dimensions: {0}")]
    InvalidStack(String),

    /// Invalid stitching configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A splitter invariant broke while walking a layer pair.
    #[error("Topology error between layers {layer_pair} and {}: {message}", .layer_pair + 1)]
    Topology {
        /// Index of the lower layer of the pair
        layer_pair: usize,
        /// Error message
        message: String,
    },
}

impl StitchError {
    /// Creates an invalid stack error.
    pub fn invalid_stack(message: impl Into<String>) -> Self {
        Self::InvalidStack(message.into())
    }

    /// Creates an invalid configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a topology error for the given layer pair.
    pub fn topology(layer_pair: usize, message: impl Into<String>) -> Self {
        Self::Topology {
            layer_pair,
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the caller's input set.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::TooFewCurves { .. }
                | Self::TooFewLayers { .. }
                | Self::NonCurveObject { .. }
                | Self::DegenerateCurve { .. }
        )
    }
}

impl From<config::constants::ConfigError> for StitchError {
    fn from(err: config::constants::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for stitching operations.
pub type StitchResult<T> = Result<T, StitchError>;

// =============================================================================
// TESTS
// =============================================================================
