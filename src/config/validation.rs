//! Configuration validation.
//!
//! Semantic checks only; serde handles the syntactic ones. Every problem found
//! is reported, not just the first.

use std::net::SocketAddr;

use crate::config::schema::ServerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("timeouts.request_secs ({timeout}) must exceed echo.max_delay_secs ({delay})")]
    TimeoutBelowDelay { timeout: u64, delay: u64 },

    #[error("echo.delay_path `{0}` must be a literal path like `/delay`")]
    DelayPath(String),

    #[error("logging.level `{0}` is not a known level")]
    LogLevel(String),
}

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let timeout = config.timeouts.request_secs;
    let delay = config.echo.max_delay_secs;
    if timeout == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    } else if timeout <= delay {
        errors.push(ValidationError::TimeoutBelowDelay { timeout, delay });
    }

    let path = &config.echo.delay_path;
    if !path.starts_with('/')
        || path.len() < 2
        || path.ends_with('/')
        || path.contains(['{', '}', '*'])
    {
        errors.push(ValidationError::DelayPath(path.clone()));
    }

    if !LEVELS.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::LogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
