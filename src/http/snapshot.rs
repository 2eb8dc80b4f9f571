//! Request metadata snapshots.
//!
//! A snapshot is an immutable view of one request taken at the moment
//! [`Snapshot::capture`] runs. Nothing is inferred: every field is what the
//! transport layer reported, or empty.

use std::net::SocketAddr;

use axum::{
    extract::ConnectInfo,
    http::{header::USER_AGENT, Request},
};
use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;

/// A serializable view of a request, captured once per invocation.
pub trait Snapshot: Serialize + Send + 'static {
    fn capture<B>(request: &Request<B>) -> Self;
}

/// Full request metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestSnapshot {
    method: String,
    #[serde(rename = "urlPath")]
    url_path: String,
    time: String,
    unix: i64,
    #[serde(rename = "addr")]
    remote_addr: String,
    user_agent: String,
}

impl RequestSnapshot {
    /// Capture a snapshot against an explicit clock reading.
    pub fn capture_at<B>(request: &Request<B>, now: DateTime<Local>) -> Self {
        Self {
            method: request.method().as_str().to_owned(),
            url_path: request.uri().path().to_owned(),
            time: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            unix: now.timestamp(),
            remote_addr: remote_addr(request),
            user_agent: request
                .headers()
                .get(USER_AGENT)
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .unwrap_or_default(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url_path(&self) -> &str {
        &self.url_path
    }

    /// RFC 3339 timestamp, second precision.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Epoch seconds of the same instant as [`time`](Self::time).
    pub fn unix(&self) -> i64 {
        self.unix
    }

    pub fn remote_addr(&self) -> &str {
        &self.remote_addr
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Snapshot for RequestSnapshot {
    fn capture<B>(request: &Request<B>) -> Self {
        Self::capture_at(request, Local::now())
    }
}

/// Method and path only, for high-volume logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestSnapshotSimple {
    method: String,
    #[serde(rename = "urlPath")]
    url_path: String,
}

impl RequestSnapshotSimple {
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url_path(&self) -> &str {
        &self.url_path
    }
}

impl Snapshot for RequestSnapshotSimple {
    fn capture<B>(request: &Request<B>) -> Self {
        Self {
            method: request.method().as_str().to_owned(),
            url_path: request.uri().path().to_owned(),
        }
    }
}

/// Peer address installed by `into_make_service_with_connect_info`.
fn remote_addr<B>(request: &Request<B>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::HeaderValue};
    use chrono::TimeZone;

    fn request(uri: &str) -> Request<Body> {
        let mut req = Request::builder()
            .method("PATCH")
            .uri(uri)
            .header(USER_AGENT, "curl/8.0")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut()
            .insert(ConnectInfo("10.0.0.7:51234".parse::<SocketAddr>().unwrap()));
        req
    }

    #[test]
    fn test_capture_reads_transport_fields() {
        let snap = RequestSnapshot::capture(&request("/a/b?x=1&y=2"));
        assert_eq!(snap.method(), "PATCH");
        assert_eq!(snap.url_path(), "/a/b");
        assert_eq!(snap.remote_addr(), "10.0.0.7:51234");
        assert_eq!(snap.user_agent(), "curl/8.0");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let snap = RequestSnapshot::capture(&req);
        assert_eq!(snap.method(), "GET");
        assert_eq!(snap.remote_addr(), "");
        assert_eq!(snap.user_agent(), "");
    }

    #[test]
    fn test_non_ascii_user_agent_passed_through() {
        let req = Request::builder()
            .uri("/")
            .header(
                USER_AGENT,
                HeaderValue::from_bytes("Mozilla/5.0 (Zürich)".as_bytes()).unwrap(),
            )
            .body(Body::empty())
            .unwrap();
        let snap = RequestSnapshot::capture(&req);
        assert_eq!(snap.user_agent(), "Mozilla/5.0 (Zürich)");
    }

    #[test]
    fn test_method_not_normalized() {
        let req = Request::builder()
            .method("purge")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        assert_eq!(RequestSnapshotSimple::capture(&req).method(), "purge");
    }

    #[test]
    fn test_time_and_unix_agree() {
        let snap = RequestSnapshot::capture(&request("/"));
        let parsed = DateTime::parse_from_rfc3339(snap.time()).unwrap();
        assert_eq!(parsed.timestamp(), snap.unix());
    }

    #[test]
    fn test_time_has_second_precision() {
        let now = Local.timestamp_opt(1_700_000_000, 987_654_321).unwrap();
        let snap = RequestSnapshot::capture_at(&request("/"), now);
        assert_eq!(snap.unix(), 1_700_000_000);
        assert!(!snap.time().contains('.'));
        assert_eq!(
            DateTime::parse_from_rfc3339(snap.time()).unwrap().timestamp(),
            1_700_000_000
        );
    }

    #[test]
    fn test_simple_snapshot_fields() {
        let snap = RequestSnapshotSimple::capture(&request("/status?verbose"));
        assert_eq!(snap.method(), "PATCH");
        assert_eq!(snap.url_path(), "/status");
    }
}
