//! Layered configuration loading.
//!
//! Layers apply in order, later ones overriding earlier ones:
//! 1. Defaults (or a development/production preset)
//! 2. A TOML or JSON file, or an in-memory string
//! 3. Environment variables `PREFIX__SECTION__KEY`, including any loaded
//!    from `.env`

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use crate::{ConfigError, IntakeConfig, LogFormat};

/// Configuration loader.
///
/// # Example
///
/// ```no_run
/// use intake_config::ConfigLoader;
///
/// # fn main() -> Result<(), intake_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_file("intake.toml")?
///     .with_env_prefix("INTAKE")
///     .with_dotenv()?
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: IntakeConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: IntakeConfig::default(),
            env_prefix: None,
        }
    }

    /// Resets to the default configuration.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = IntakeConfig::default();
        self
    }

    /// Starts from the development preset.
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = IntakeConfig::development();
        self
    }

    /// Starts from the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = IntakeConfig::production();
        self
    }

    /// Loads a configuration file.
    ///
    /// The format is chosen by extension: `.toml` or `.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or unreadable, has an
    /// unsupported extension, or does not parse (unknown fields included).
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        self.config = Self::parse_file(&content, path)?;
        Ok(self)
    }

    /// Loads a configuration file if it exists.
    ///
    /// # Errors
    ///
    /// Same as [`with_file`](Self::with_file) when the file exists.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Loads configuration from a string in the given format (`"toml"` or
    /// `"json"`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the format is unsupported or parsing fails.
    ///
    /// # Example
    ///
    /// ```
    /// use intake_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string("[limits]\nmax_body_bytes = 4096", "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.limits.max_body_bytes, 4096);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => {
                return Err(ConfigError::validation_error(format!(
                    "unsupported configuration format: {format}"
                )))
            }
        };
        Ok(self)
    }

    /// Enables environment overrides with the given prefix.
    ///
    /// Recognised variables, for prefix `INTAKE`:
    /// - `INTAKE__LOGGING__ENABLED`
    /// - `INTAKE__LOGGING__LEVEL`
    /// - `INTAKE__LOGGING__FORMAT` (`json` or `pretty`)
    /// - `INTAKE__LOGGING__INCLUDE_LOCATION`
    /// - `INTAKE__LIMITS__MAX_BODY_BYTES`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Loads variables from a `.env` file into the process environment.
    ///
    /// A missing `.env` file is not an error.
    ///
    /// # Errors
    ///
    /// Currently never fails; the `Result` keeps the chain uniform.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Ok(self)
    }

    /// Applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override does not parse or validation
    /// fails.
    pub fn load(mut self) -> Result<IntakeConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Returns the configuration without environment overrides or
    /// validation.
    #[must_use]
    pub fn load_unvalidated(self) -> IntakeConfig {
        self.config
    }

    fn parse_file(content: &str, path: &Path) -> Result<IntakeConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::validation_error(format!(
                "unsupported configuration file format: {}",
                path.display()
            ))),
        }
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let env_vars: HashMap<String, String> = env::vars()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect();

        for (key, value) in env_vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(rest) = key.strip_prefix(prefix).and_then(|k| k.strip_prefix("__")) else {
            // Another variable sharing the prefix, e.g. INTAKE_HOME.
            return Ok(());
        };

        let parts: Vec<&str> = rest.split("__").collect();

        match parts.as_slice() {
            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }
            ["LOGGING", "INCLUDE_LOCATION"] => {
                self.config.logging.include_location = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LIMITS", "MAX_BODY_BYTES"] => {
                self.config.limits.max_body_bytes = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
            }
            _ => {}
        }

        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
