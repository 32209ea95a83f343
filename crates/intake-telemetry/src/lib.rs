//! Observability for Intake.
//!
//! - **Logging**: `tracing-subscriber` setup with JSON or pretty output
//! - **Metrics**: per-endpoint outcome counters via the `metrics` facade
//!
//! The other Intake crates emit `tracing` events and call
//! [`record_outcome`]; this crate decides where those go.
//!
//! # Example
//!
//! ```rust,ignore
//! use intake_telemetry::{describe_metrics, init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production())?;
//! describe_metrics();
//! ```

#![doc(html_root_url = "https://docs.rs/intake-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};
pub use self::metrics::{describe_metrics, record_outcome};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
