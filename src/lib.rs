//! Glean Server: structured event emission for server applications.
//!
//! Assembles Glean pings from typed metrics and events, wraps them in the
//! log envelope the ingestion pipeline expects, and writes each one as a
//! single JSON line to a caller-provided sink.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod telemetry;

pub use error::{ConfigError, IdentifierError, RecordError};
pub use telemetry::{AppIdentity, GleanEventsLogger, LineSink, RequestInfo};
