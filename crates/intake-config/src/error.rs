//! Configuration error types.

use intake_core::IntakeError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading configuration or building endpoints
/// from it.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Failed to read configuration file.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON parsing error.
    #[error("failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// The field with the invalid value.
        field: String,
        /// Explanation of why the value is invalid.
        reason: String,
    },

    /// Environment variable parsing error.
    #[error("failed to parse environment variable {var}: {reason}")]
    EnvParseError {
        /// The environment variable name.
        var: String,
        /// Explanation of the parsing error.
        reason: String,
    },

    /// Validation error after loading.
    #[error("configuration validation failed: {0}")]
    ValidationError(String),

    /// A schema or endpoint table was rejected while compiling.
    #[error("invalid endpoint configuration: {0}")]
    Endpoint(#[from] IntakeError),
}

impl ConfigError {
    /// Create a new file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a new invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new environment variable parse error.
    pub fn env_parse_error(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParseError {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Create a new validation error.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error() {
        let err = ConfigError::file_not_found("/etc/intake/endpoints.toml");
        assert!(err.to_string().contains("/etc/intake/endpoints.toml"));
    }

    #[test]
    fn test_invalid_value_error() {
        let err = ConfigError::invalid_value("limits.max_body_bytes", "must be greater than 0");
        assert!(err.to_string().contains("limits.max_body_bytes"));
        assert!(err.to_string().contains("must be greater than 0"));
    }

    #[test]
    fn test_env_parse_error() {
        let err = ConfigError::env_parse_error("INTAKE__LIMITS__MAX_BODY_BYTES", "expected integer");
        assert!(err.to_string().contains("INTAKE__LIMITS__MAX_BODY_BYTES"));
        assert!(err.to_string().contains("expected integer"));
    }

    #[test]
    fn test_wraps_intake_error() {
        let err: ConfigError = IntakeError::unknown_group("archive").into();
        assert!(matches!(err, ConfigError::Endpoint(_)));
        assert!(err.to_string().starts_with("invalid endpoint configuration"));
    }
}
