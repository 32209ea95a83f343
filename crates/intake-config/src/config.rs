//! Configuration types.
//!
//! [`IntakeConfig`] is the root: logging, request limits, the record schema,
//! and the endpoint tables that are compiled into an [`EndpointRegistry`].

use crate::ConfigError;
use intake::extract::DEFAULT_MAX_BODY_SIZE;
use intake::{Endpoint, EndpointRegistry};
use intake_core::{FieldDescriptor, FieldKind, RecordSchema};
use intake_telemetry::{create_env_filter, LogConfig};
use intake_validate::Validator;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Complete Intake configuration.
///
/// # Example
///
/// ```
/// use intake_config::IntakeConfig;
///
/// let config = IntakeConfig::default();
/// assert_eq!(config.logging.level, "info");
/// assert!(config.endpoints.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Request limits.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Record schema shared by every endpoint.
    #[serde(default)]
    pub schema: Vec<FieldSpecConfig>,

    /// Endpoint descriptor tables.
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

impl IntakeConfig {
    /// Development preset: pretty debug logs with source locations.
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.include_location = true;
        config
    }

    /// Production preset: JSON logs at info level.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config
    }

    /// Validates the configuration.
    ///
    /// Checks the values that can be judged without compiling endpoints;
    /// rule strings and field references are checked by
    /// [`build_registry`](Self::build_registry).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The log level directive does not parse
    /// - `limits.max_body_bytes` is zero
    /// - An endpoint name is empty or repeated
    /// - Endpoints are declared without a schema
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = create_env_filter(&self.logging.level) {
            return Err(ConfigError::invalid_value("logging.level", e.to_string()));
        }

        if self.limits.max_body_bytes == 0 {
            return Err(ConfigError::invalid_value(
                "limits.max_body_bytes",
                "must be greater than 0",
            ));
        }

        if !self.endpoints.is_empty() && self.schema.is_empty() {
            return Err(ConfigError::validation_error(
                "endpoints are declared but the schema is empty",
            ));
        }

        let mut names = HashSet::new();
        for endpoint in &self.endpoints {
            if endpoint.name.trim().is_empty() {
                return Err(ConfigError::invalid_value(
                    "endpoints.name",
                    "must not be empty",
                ));
            }
            if !names.insert(endpoint.name.as_str()) {
                return Err(ConfigError::validation_error(format!(
                    "endpoint '{}' is declared more than once",
                    endpoint.name
                )));
            }
        }

        Ok(())
    }

    /// Builds the record schema from the `schema` table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Endpoint`] if a field name or key repeats.
    pub fn record_schema(&self) -> Result<RecordSchema, ConfigError> {
        let schema = self
            .schema
            .iter()
            .fold(RecordSchema::builder(), |builder, spec| {
                builder.field(spec.name.as_str(), spec.key.as_str(), spec.kind)
            })
            .build()?;
        Ok(schema)
    }

    /// Compiles every endpoint table against `validator`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Endpoint`] for the first endpoint that fails to
    /// compile (unknown field, bad rule string, bad default, unknown group)
    /// or a repeated endpoint name.
    pub fn build_registry(
        &self,
        validator: &Arc<Validator>,
    ) -> Result<EndpointRegistry, ConfigError> {
        let schema = self.record_schema()?;
        let mut registry = EndpointRegistry::new();

        for table in &self.endpoints {
            let mut builder =
                Endpoint::builder(table.name.as_str(), schema.clone(), Arc::clone(validator))
                    .fields(table.fields.iter().cloned())
                    .max_body_size(self.limits.max_body_bytes);
            if let Some(group) = &table.group {
                builder = builder.group(group.as_str());
            }
            if table.created {
                builder = builder.created();
            }
            registry.register(builder.build()?)?;
        }

        Ok(registry)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Logging section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Whether logging is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Whether to include source file and line.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Converts to the telemetry crate's [`LogConfig`].
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            json_format: self.format == LogFormat::Json,
            span_events: false,
            file_line_info: self.include_location,
            include_target: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

/// Limits section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Largest accepted request body in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_SIZE
}

/// One entry of the record schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpecConfig {
    /// Logical field name.
    pub name: String,
    /// Wire key used in bodies and query strings.
    pub key: String,
    /// Target kind.
    pub kind: FieldKind,
}

/// One endpoint's descriptor table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    /// Endpoint name.
    pub name: String,

    /// Active validation group.
    #[serde(default)]
    pub group: Option<String>,

    /// Whether a valid request answers 201.
    #[serde(default)]
    pub created: bool,

    /// Field descriptors.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake::extract::RequestSources;
    use intake_core::{IntakeError, SourceKind};

    const USERS: &str = r#"
        [[schema]]
        name = "Name"
        key = "name"
        kind = "string"

        [[schema]]
        name = "Rating"
        key = "rating"
        kind = "int"

        [[endpoints]]
        name = "create_user"
        group = "create"
        created = true

        [[endpoints.fields]]
        name = "Name"
        source = "body"
        required = true
        rules = "required,min=3,max=50"

        [[endpoints]]
        name = "search"

        [[endpoints.fields]]
        name = "Rating"
        source = "query"
        default = "5"
        rules = "min=1,max=5"
    "#;

    fn validator() -> Arc<Validator> {
        Arc::new(Validator::default())
    }

    #[test]
    fn test_default_config() {
        let config = IntakeConfig::default();
        assert!(config.logging.enabled);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.limits.max_body_bytes, 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let dev = IntakeConfig::development();
        assert_eq!(dev.logging.level, "debug");
        assert_eq!(dev.logging.format, LogFormat::Pretty);
        assert!(dev.logging.to_log_config().file_line_info);

        let prod = IntakeConfig::production();
        assert!(prod.logging.to_log_config().json_format);
    }

    #[test]
    fn test_parse_endpoint_tables() {
        let config: IntakeConfig = toml::from_str(USERS).unwrap();
        assert_eq!(config.schema.len(), 2);
        assert_eq!(config.schema[1].kind, FieldKind::Int);
        assert_eq!(config.endpoints[0].group.as_deref(), Some("create"));
        assert!(config.endpoints[0].created);
        assert_eq!(config.endpoints[1].fields[0].source, SourceKind::Query);
        assert_eq!(config.endpoints[1].fields[0].default.as_deref(), Some("5"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml = r#"
            [limits]
            max_body_bytes = 10
            max_fields = 3
        "#;
        assert!(toml::from_str::<IntakeConfig>(toml).is_err());
    }

    #[test]
    fn test_build_registry() {
        let config: IntakeConfig = toml::from_str(USERS).unwrap();
        let registry = config.build_registry(&validator()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("create_user").unwrap().is_created());

        let sources = RequestSources::builder().build();
        let outcome = registry.process("search", &sources).unwrap();
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_build_registry_rejects_unknown_rule() {
        let mut config: IntakeConfig = toml::from_str(USERS).unwrap();
        config.endpoints[0].fields[0].rules = "required,shout".to_string();

        let err = config.build_registry(&validator()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Endpoint(IntakeError::UnknownRule { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_endpoint() {
        let mut config: IntakeConfig = toml::from_str(USERS).unwrap();
        config.endpoints[1].name = "create_user".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_body_limit() {
        let mut config = IntakeConfig::default();
        config.limits.max_body_bytes = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_level() {
        let mut config = IntakeConfig::default();
        config.logging.level = "intake=loud".to_string();
        assert!(config.validate().is_err());
    }
}
