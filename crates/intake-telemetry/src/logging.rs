//! Structured logging setup.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] and either
//! JSON output (production) or pretty output (development). Intake crates
//! only emit `tracing` events; nothing is printed until a subscriber is
//! installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use intake_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::info!(endpoint = "search", "ready");
//! ```

use crate::error::TelemetryError;
use crate::TelemetryResult;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether logging is enabled.
    pub enabled: bool,

    /// Filter directive, e.g. `"info"` or `"intake_extract=debug,info"`.
    pub level: String,

    /// JSON output when true, pretty output otherwise.
    pub json_format: bool,

    /// Whether to log span open/close events.
    pub span_events: bool,

    /// Whether to include source file and line.
    pub file_line_info: bool,

    /// Whether to include the event target (module path).
    pub include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LogConfig {
    /// Human-readable output at debug level.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            level: "debug".to_string(),
            json_format: false,
            span_events: true,
            file_line_info: true,
            include_target: true,
        }
    }

    /// JSON output at info level.
    #[must_use]
    pub fn production() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            span_events: false,
            file_line_info: false,
            include_target: true,
        }
    }
}

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] for a bad level directive and
/// [`TelemetryError::LoggingInit`] if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;
    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    if config.json_format {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    Ok(())
}

/// Parses a filter directive.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] if the directive does not parse.
pub fn create_env_filter(filter: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(filter).map_err(|e| TelemetryError::InvalidFilter {
        filter: filter.to_string(),
        reason: e.to_string(),
    })
}

/// Standard field names used in Intake log events.
pub mod fields {
    /// Endpoint name.
    pub const ENDPOINT: &str = "endpoint";

    /// Logical field name.
    pub const FIELD: &str = "field";

    /// Outcome label (`bad_request`, `unprocessable`, `valid`).
    pub const OUTCOME: &str = "outcome";

    /// Number of field errors in an outcome.
    pub const ERROR_COUNT: &str = "error_count";

    /// Error description.
    pub const ERROR: &str = "error";
}
