//! # Config Crate
//!
//! Centralized configuration constants for the contour stitching pipeline.
//! All magic numbers and tunable parameters are defined here so the
//! stitching stages never carry bare literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_DELTA_P_THRESH, DEFAULT_PRECISION};
//!
//! // Two hole positions closer than the threshold describe the same hole
//! let (p_prev, p_cur) = (0.40_f64, 0.52_f64);
//! assert!((p_prev - p_cur).abs() < DEFAULT_DELTA_P_THRESH);
//!
//! // Mesh density threshold for a 10-unit wide stack
//! let threshold = 10.0 / DEFAULT_PRECISION as f64;
//! assert!(threshold > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Resolution-Derived**: Tolerances scale with the image stack, not pixels
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
