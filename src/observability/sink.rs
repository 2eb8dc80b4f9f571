//! Leveled record sinks.
//!
//! The request pipeline only ever needs two capabilities from a logger:
//! record something at info level, and record something at error level.
//! [`LogSink`] is that contract. The sink owns formatting and output; callers
//! hand it a [`Record`] and move on.
//!
//! # Implementations
//! - [`TracingSink`]: forwards to the process `tracing` subscriber
//! - [`WriterSink`]: plain `[INFO]` / `[ERROR]` lines on any writer
//! - [`MemorySink`]: keeps records in memory for assertions

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::Local;

use crate::config::{LoggingConfig, SinkKind};

/// An ordered sequence of values rendered space-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: Vec<String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to the record.
    pub fn with(mut self, value: impl fmt::Display) -> Self {
        self.values.push(value.to_string());
        self
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(value)?;
        }
        Ok(())
    }
}

impl From<fmt::Arguments<'_>> for Record {
    fn from(args: fmt::Arguments<'_>) -> Self {
        Record::new().with(args)
    }
}

/// Severity of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Info => "[INFO]  ",
            Level::Error => "[ERROR] ",
        }
    }
}

/// Destination for leveled records.
///
/// Implementations must tolerate concurrent callers: each call appends one
/// self-contained record.
pub trait LogSink: Send + Sync {
    fn record_info(&self, record: Record);

    fn record_error(&self, record: Record);

    fn record_info_fmt(&self, args: fmt::Arguments<'_>) {
        self.record_info(Record::from(args));
    }

    fn record_error_fmt(&self, args: fmt::Arguments<'_>) {
        self.record_error(Record::from(args));
    }

    /// Record at error level, then terminate the process with status 1.
    fn fatal(&self, record: Record) -> ! {
        self.record_error(record);
        std::process::exit(1)
    }
}

/// Sink that emits records as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record_info(&self, record: Record) {
        tracing::info!(target: "reqtap::requests", "{}", record);
    }

    fn record_error(&self, record: Record) {
        tracing::error!(target: "reqtap::requests", "{}", record);
    }
}

/// Sink writing `[LEVEL] YYYY/MM/DD HH:MM:SS message` lines to a writer.
pub struct WriterSink<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self, level: Level, record: &Record) {
        let line = format!(
            "{}{} {}\n",
            level.tag(),
            Local::now().format("%Y/%m/%d %H:%M:%S"),
            record
        );
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = out.write_all(line.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "Failed to write log record");
        }
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn record_info(&self, record: Record) {
        self.write(Level::Info, &record);
    }

    fn record_error(&self, record: Record) {
        self.write(Level::Error, &record);
    }
}

/// Sink that keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(Level, Record)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in the order they were received.
    pub fn entries(&self) -> Vec<(Level, Record)> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn infos(&self) -> Vec<Record> {
        self.at(Level::Info)
    }

    pub fn errors(&self) -> Vec<Record> {
        self.at(Level::Error)
    }

    fn at(&self, level: Level) -> Vec<Record> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, r)| r)
            .collect()
    }

    fn push(&self, level: Level, record: Record) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((level, record));
    }
}

impl LogSink for MemorySink {
    fn record_info(&self, record: Record) {
        self.push(Level::Info, record);
    }

    fn record_error(&self, record: Record) {
        self.push(Level::Error, record);
    }
}

/// Build the sink selected by configuration.
pub fn from_config(config: &LoggingConfig) -> Arc<dyn LogSink> {
    match config.sink {
        SinkKind::Tracing => Arc::new(TracingSink),
        SinkKind::Stdout => Arc::new(WriterSink::stdout()),
        SinkKind::Stderr => Arc::new(WriterSink::stderr()),
    }
}
