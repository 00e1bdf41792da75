//! Configuration module for the sales engine.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates the result.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sales_engine::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod logging;
mod ordering;
mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use logging::LoggingConfig;
pub use ordering::OrderingConfig;
pub use server::ServerConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Ordering configuration.
    #[serde(default)]
    pub ordering: OrderingConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Load configuration from a YAML file with environment variable
/// interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let mut result = input.to_string();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    for cap in re.captures_iter(input) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let Some(var_match) = cap.get(1) else {
            continue;
        };
        let full_match = full_match.as_str();
        let var_name = var_match.as_str();
        let default_value = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        };

        result = result.replace(full_match, &value);
    }

    result
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    if config.ordering.number_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "ordering.number_attempts must be at least 1".to_string(),
        ));
    }

    if config.ordering.insert_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "ordering.insert_attempts must be at least 1".to_string(),
        ));
    }

    if config.logging.level.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "logging.level must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_on_empty_mapping() {
        let config = load_config_from_string("{}").unwrap();
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.ordering.number_attempts, 10);
        assert_eq!(config.ordering.insert_attempts, 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let yaml = r"
server:
  http_port: 9100
  bind_address: 127.0.0.1
ordering:
  insert_attempts: 5
logging:
  level: debug
";
        let config = load_config_from_string(yaml).unwrap();
        assert_eq!(config.server.http_port, 9100);
        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert_eq!(config.ordering.insert_attempts, 5);
        // Untouched section keeps its default.
        assert_eq!(config.ordering.number_attempts, 10);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn env_var_interpolation_with_default() {
        let yaml = "
server:
  http_port: ${SALES_ENGINE_TEST_PORT:-9200}
";
        let config = load_config_from_string(yaml).unwrap();
        assert_eq!(config.server.http_port, 9200);
    }

    #[test]
    fn unset_env_var_without_default_becomes_empty() {
        // The interpolated value is blank, which can never load cleanly:
        // either the YAML no longer parses or validation rejects it.
        let yaml = "
logging:
  level: \"${SALES_ENGINE_TEST_UNSET_LEVEL}\"
";
        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn zero_port_fails_validation() {
        let result = load_config_from_string("server:\n  http_port: 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn zero_retry_budgets_fail_validation() {
        assert!(load_config_from_string("ordering:\n  number_attempts: 0\n").is_err());
        assert!(load_config_from_string("ordering:\n  insert_attempts: 0\n").is_err());
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let result = load_config_from_string("server: [not-a-mapping");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = load_config(Some("does/not/exist.yaml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
