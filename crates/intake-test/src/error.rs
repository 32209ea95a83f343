//! Test error types.

use thiserror::Error;

/// Errors that can occur while building test requests.
#[derive(Debug, Error)]
pub enum TestError {
    /// Request building failed.
    #[error("Request build error: {0}")]
    RequestBuild(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Form encoding failed.
    #[error("Form encoding error: {0}")]
    Form(#[from] serde_urlencoded::ser::Error),
}
