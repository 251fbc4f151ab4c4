//! Spring error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when building springs from user supplied parameters.
///
/// The step functions themselves never fail; these only come from the
/// validating constructors and configuration loading.
#[derive(Error, Debug)]
pub enum SpringError {
    /// Natural frequency must be finite and strictly positive
    #[error("Invalid stiffness: {0} (must be finite and > 0)")]
    InvalidStiffness(f64),

    /// Damping ratio must be finite and non-negative
    #[error("Invalid damping ratio: {0} (must be finite and >= 0)")]
    InvalidDampingRatio(f64),

    /// Precision must be finite and strictly positive
    #[error("Invalid precision: {0} (must be finite and > 0)")]
    InvalidPrecision(f64),

    /// Durations and halflives must be finite and non-negative
    #[error("Invalid duration: {0} (must be finite and >= 0)")]
    InvalidDuration(f64),

    /// Smoothing velocity must be finite and strictly positive
    #[error("Invalid smoothing velocity: {0} (must be finite and > 0)")]
    InvalidSmoothingVelocity(f64),

    /// Anticipation must be finite and non-negative
    #[error("Invalid anticipation: {0} (must be finite and >= 0)")]
    InvalidAnticipation(f64),

    /// Resting thresholds must be finite and non-negative
    #[error("Invalid resting threshold: {0} (must be finite and >= 0)")]
    InvalidRestThreshold(f64),

    /// Failed to read a configuration file
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration file
    #[error("Failed to parse spring config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize a configuration
    #[error("Failed to serialize spring config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for spring construction
pub type Result<T> = std::result::Result<T, SpringError>;
