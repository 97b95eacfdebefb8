//! Tracing with file-based OTLP span export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK tracer provider
//!                                         → FileSpanExporter → rotating JSON lines
//! ```
//!
//! Each exported batch becomes one line holding a complete OTLP
//! `resourceSpans` document. The file rotates at 10 MiB and keeps three
//! backups.

mod exporter;
mod init;
mod rotation;

pub use exporter::otlp_document;
pub use init::{init_tracing, TRACE_FILE};
