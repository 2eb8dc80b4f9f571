//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (ConnectInfo<SocketAddr> attached)
//!     → server.rs (Axum setup, timeout)
//!     → middleware/request_log.rs (snapshot → codec → LogSink)
//!     → echo.rs (snapshot → codec → JSON response)
//! ```

pub mod codec;
pub mod echo;
pub mod middleware;
pub mod server;
pub mod snapshot;

pub use codec::{encode, encode_with_delay, EncodingError};
pub use echo::{echo, echo_delay, DelayError, DelayLimit};
pub use middleware::RequestLogLayer;
pub use server::HttpServer;
pub use snapshot::{RequestSnapshot, RequestSnapshotSimple, Snapshot};
