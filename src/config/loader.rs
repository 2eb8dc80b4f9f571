//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate a configuration assembled in code or amended after loading.
pub fn check_config(config: &ServerConfig) -> Result<(), ConfigError> {
    validate_config(config).map_err(ConfigError::Validation)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    let config: ServerConfig = toml::from_str(content)?;
    check_config(&config)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{Detail, FailurePolicy, SinkKind};

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.echo.max_delay_secs, 5);
        assert_eq!(config.request_log.detail, Detail::Full);
        assert_eq!(config.request_log.on_encode_failure, FailurePolicy::Forward);
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let config = parse_config(include_str!("../../reqtap.example.toml")).unwrap();
        let defaults = ServerConfig::default();
        assert_eq!(config.listener.bind_address, defaults.listener.bind_address);
        assert_eq!(config.timeouts.request_secs, defaults.timeouts.request_secs);
        assert_eq!(config.logging.sink, defaults.logging.sink);
        assert_eq!(config.echo.delay_path, defaults.echo.delay_path);
        assert_eq!(config.echo.max_delay_secs, defaults.echo.max_delay_secs);
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            r#"
            [logging]
            sink = "stderr"

            [request_log]
            detail = "simple"
            on_encode_failure = "abandon"

            [echo]
            delay_path = "/slow"
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.sink, SinkKind::Stderr);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.request_log.detail, Detail::Simple);
        assert_eq!(config.request_log.on_encode_failure, FailurePolicy::Abandon);
        assert!(config.request_log.enabled);
        assert_eq!(config.echo.delay_path, "/slow");
    }

    #[test]
    fn test_unknown_enum_value_is_parse_error() {
        let err = parse_config("[logging]\nsink = \"syslog\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_semantic_errors_surface() {
        let err = parse_config("[timeouts]\nrequest_secs = 0").unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_amended_bind_address_is_rechecked() {
        let mut config = parse_config("").unwrap();
        config.listener.bind_address = "localhost-ish".into();

        match check_config(&config).unwrap_err() {
            ConfigError::Validation(errors) => assert_eq!(
                errors,
                vec![ValidationError::BindAddress("localhost-ish".into())]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/reqtap.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
