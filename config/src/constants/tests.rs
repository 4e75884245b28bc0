//! Tests for the centralized configuration constants.

use super::*;

/// Ensures default constants are sane and positive.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let cfg = GlobalConfig::default();
/// assert!(cfg.tolerance > 0.0);
/// ```
#[test]
fn default_constants_are_valid() {
    let cfg = GlobalConfig::default();
    assert!(cfg.tolerance > 0.0);
    assert!((MIN_PRECISION..=MAX_PRECISION).contains(&cfg.precision));
}

/// Validates the builder rejects invalid values.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// assert!(GlobalConfig::new(0.0, 500).is_err());
/// ```
#[test]
fn new_validates_inputs() {
    assert_eq!(
        GlobalConfig::new(0.0, 500).unwrap_err(),
        ConfigError::InvalidTolerance(0.0)
    );
    assert_eq!(
        GlobalConfig::new(1.0e-9, 5).unwrap_err(),
        ConfigError::InvalidPrecision(5)
    );
    assert_eq!(
        GlobalConfig::new(1.0e-9, MAX_PRECISION + 1).unwrap_err(),
        ConfigError::InvalidPrecision(MAX_PRECISION + 1)
    );
}

#[test]
fn nan_tolerance_is_rejected() {
    assert!(GlobalConfig::new(f64::NAN, 500).is_err());
}

#[test]
fn error_messages_name_the_value() {
    let msg = ConfigError::InvalidPrecision(3).to_string();
    assert!(msg.contains("precision"));
    assert!(msg.contains('3'));
}
