//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! RequestLogLayer (per request)
//!     → sink.rs (LogSink: record_info / record_error)
//!     → TracingSink → logging.rs subscriber → stdout
//!     → WriterSink  → any io::Write
//! ```
//!
//! # Design Decisions
//! - The sink is built once at startup and injected, never global
//! - Sinks own formatting; callers pass structured records

pub mod logging;
pub mod sink;

pub use sink::{Level, LogSink, MemorySink, Record, TracingSink, WriterSink};
