//! Request observability middleware and diagnostic echo endpoints.
//!
//! ```text
//!   Client ──▶ TimeoutLayer ──▶ RequestLogLayer ──▶ echo / echo_delay
//!                                    │
//!                                    ▼
//!                           LogSink (tracing, writer, memory)
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use http::{HttpServer, RequestLogLayer, RequestSnapshot, RequestSnapshotSimple};
pub use lifecycle::Shutdown;
pub use observability::{LogSink, Record};
