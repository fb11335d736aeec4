//! Core error types for duewatch-core.
//!
//! Incomplete input (no execution yet, no usage reading) is never an error;
//! the evaluator reports it as a "not calculated" result. Everything here
//! describes data the caller must fix.

use std::path::PathBuf;
use thiserror::Error;

use crate::trigger::TriggerKind;

/// Core error type for duewatch-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the config tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Structural problems with caller-supplied data.
///
/// Each variant names the offending field so the caller can surface it
/// without substituting a default.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value for '{field}': threshold must be greater than zero (got {value})")]
    NonPositiveThreshold { field: &'static str, value: f64 },

    #[error("Missing '{field}' for {kind} trigger")]
    MissingThreshold {
        kind: TriggerKind,
        field: &'static str,
    },

    #[error("Field '{field}' is not allowed on a {kind} trigger")]
    MismatchedThreshold {
        kind: TriggerKind,
        field: &'static str,
    },

    #[error("Invalid value for '{field}': must be a finite number")]
    NonFinite { field: &'static str },

    /// Usage counters never run backwards.
    #[error("Invalid value for 'hours': reported {reported}h is below current {current}h")]
    RegressiveMeasurement { current: f64, reported: f64 },

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Name of the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::NonPositiveThreshold { field, .. }
            | ValidationError::MissingThreshold { field, .. }
            | ValidationError::MismatchedThreshold { field, .. }
            | ValidationError::NonFinite { field } => *field,
            ValidationError::RegressiveMeasurement { .. } => "hours",
            ValidationError::InvalidValue { field, .. } => field.as_str(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
