//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the echo
//! server. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the echo server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Process-level logging settings.
    pub logging: LoggingConfig,

    /// Request logging adapter settings.
    pub request_log: RequestLogConfig,

    /// Echo responder settings.
    pub echo: EchoConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Where request records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Forward records to the `tracing` subscriber.
    #[default]
    Tracing,
    /// Plain leveled lines on stdout.
    Stdout,
    /// Plain leveled lines on stderr.
    Stderr,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub level: String,

    /// Sink used by the request logging adapter.
    pub sink: SinkKind,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            sink: SinkKind::Tracing,
        }
    }
}

/// How much of the request the logging adapter captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Detail {
    /// Method, path, time, address and user agent.
    #[default]
    Full,
    /// Method and path only.
    Simple,
}

/// What the logging adapter does when a snapshot cannot be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the error and still run the wrapped handler.
    #[default]
    Forward,
    /// Record the error and reply with an empty 200 without running the handler.
    Abandon,
}

/// Request logging adapter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestLogConfig {
    /// Wrap the echo routes with the logging adapter.
    pub enabled: bool,

    /// Snapshot flavor to record.
    pub detail: Detail,

    /// Behavior on encoding failure.
    pub on_encode_failure: FailurePolicy,
}

impl Default for RequestLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            detail: Detail::Full,
            on_encode_failure: FailurePolicy::Forward,
        }
    }
}

/// Echo responder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EchoConfig {
    /// Upper bound (and fallback) for the `t` query parameter, in seconds.
    pub max_delay_secs: u64,

    /// Path prefix served by the delaying echo responder.
    pub delay_path: String,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            max_delay_secs: 5,
            delay_path: "/delay".to_string(),
        }
    }
}
