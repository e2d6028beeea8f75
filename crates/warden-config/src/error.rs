//! Error types for policy loading.

use thiserror::Error;

/// Primary error type for policy configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Field did not exist in the policy document.
    #[error("unknown configuration field")]
    UnknownField {
        /// Name of the unexpected field.
        field: String,
    },
    /// Field contained an invalid value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Field that failed validation.
        field: String,
        /// Offending value when available.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Field carried a JSON type other than the one expected.
    #[error("invalid configuration type")]
    InvalidType {
        /// Field that failed validation.
        field: String,
        /// JSON type the loader expected.
        expected: &'static str,
    },
    /// The policy document was not a JSON object.
    #[error("policy document must be an object")]
    NotAnObject,
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
