//! Telemetry error types.

use thiserror::Error;

/// Errors that can occur while setting up telemetry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize logging.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Invalid log filter directive.
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// The rejected directive.
        filter: String,
        /// Parser diagnostic.
        reason: String,
    },
}
