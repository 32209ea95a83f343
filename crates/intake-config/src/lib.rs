//! Typed configuration for Intake.
//!
//! Endpoint descriptor tables, the record schema, logging and request limits
//! can all live in a TOML or JSON file:
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [limits]
//! max_body_bytes = 1048576
//!
//! [[schema]]
//! name = "Name"
//! key = "name"
//! kind = "string"
//!
//! [[endpoints]]
//! name = "create_user"
//! group = "create"
//! created = true
//!
//! [[endpoints.fields]]
//! name = "Name"
//! source = "body"
//! required = true
//! rules = "required,min=3,max=50"
//! ```
//!
//! Unknown keys are rejected. Selected values can be overridden from the
//! environment (`INTAKE__LOGGING__LEVEL=debug`).
//!
//! # Example
//!
//! ```no_run
//! use intake_config::ConfigLoader;
//! use intake_validate::Validator;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), intake_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_file("intake.toml")?
//!     .with_env_prefix("INTAKE")
//!     .load()?;
//!
//! let registry = config.build_registry(&Arc::new(Validator::default()))?;
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/intake-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;

pub use config::{
    EndpointConfig, FieldSpecConfig, IntakeConfig, LimitsConfig, LogFormat, LoggingConfig,
};
pub use error::ConfigError;
pub use loader::ConfigLoader;
