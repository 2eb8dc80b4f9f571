//! Echo responders.
//!
//! Diagnostic handlers that reflect request metadata back as JSON. The
//! delaying variant holds the response for a bounded number of seconds taken
//! from the `t` query parameter, which is handy for mocking network latency.
//!
//! Both are stateless apart from the delay bound. Encoding failures degrade to
//! an empty body rather than an error status.

use std::num::ParseIntError;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::header,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};

use crate::config::EchoConfig;
use crate::http::codec::{encode, encode_with_delay, EncodingError};
use crate::http::snapshot::{RequestSnapshot, Snapshot};

/// Upper bound for the echo delay unless configured otherwise.
pub const MAX_DELAY_SECS: u64 = 5;

/// Query parameter carrying the requested delay.
pub const DELAY_PARAM: &str = "t";

/// Why a requested delay was not honored as given.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DelayError {
    #[error("no `t` parameter")]
    Missing,

    #[error("`{value}` is not a whole number of seconds: {source}")]
    Invalid {
        value: String,
        source: ParseIntError,
    },

    #[error("{value}s exceeds the {max}s limit")]
    TooLarge { value: u64, max: u64 },
}

/// Delay bound shared by the delaying responder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayLimit {
    max_secs: u64,
}

impl DelayLimit {
    pub fn new(max_secs: u64) -> Self {
        Self { max_secs }
    }

    pub fn max_secs(&self) -> u64 {
        self.max_secs
    }

    /// Parse `t` from a raw query string, rejecting anything above the bound.
    pub fn parse(&self, query: Option<&str>) -> Result<u64, DelayError> {
        let raw = url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
            .find(|(key, _)| key == DELAY_PARAM)
            .map(|(_, value)| value.into_owned())
            .ok_or(DelayError::Missing)?;

        let value: u64 = raw.parse().map_err(|source| DelayError::Invalid {
            value: raw.clone(),
            source,
        })?;

        if value > self.max_secs {
            return Err(DelayError::TooLarge {
                value,
                max: self.max_secs,
            });
        }
        Ok(value)
    }

    /// The delay to apply: the requested value when valid, otherwise the bound.
    pub fn effective(&self, query: Option<&str>) -> u64 {
        self.parse(query).unwrap_or_else(|e| {
            tracing::debug!(error = %e, delay_secs = self.max_secs, "Using maximum echo delay");
            self.max_secs
        })
    }
}

impl Default for DelayLimit {
    fn default() -> Self {
        Self::new(MAX_DELAY_SECS)
    }
}

impl From<&EchoConfig> for DelayLimit {
    fn from(config: &EchoConfig) -> Self {
        Self::new(config.max_delay_secs)
    }
}

/// Reflect the request's metadata as JSON.
pub async fn echo(request: Request) -> Response {
    let snapshot = RequestSnapshot::capture(&request);
    json_response(encode(&snapshot).unwrap_or_else(degraded))
}

/// Like [`echo`], after sleeping for the effective delay.
pub async fn echo_delay(State(limit): State<DelayLimit>, request: Request) -> Response {
    let snapshot = RequestSnapshot::capture(&request);
    let delay_secs = limit.effective(request.uri().query());
    let body = encode_with_delay(&snapshot, delay_secs).unwrap_or_else(degraded);

    // Only this request's task is suspended.
    tokio::time::sleep(Duration::from_secs(delay_secs)).await;

    json_response(body)
}

/// Echo routes: the delaying responder at `delay_path`, `delay_path/` and
/// anything below it; plain echo elsewhere.
pub fn router(config: &EchoConfig) -> Router {
    let slash = format!("{}/", config.delay_path);
    let nested = format!("{}/{{*rest}}", config.delay_path);
    Router::new()
        .route(&config.delay_path, any(echo_delay))
        .route(&slash, any(echo_delay))
        .route(&nested, any(echo_delay))
        .fallback(echo)
        .with_state(DelayLimit::from(config))
}

fn json_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn degraded(e: EncodingError) -> String {
    tracing::error!(error = %e, "Echo response sent without body");
    String::new()
}
