//! Ping and event definitions recorded through the logger.
//!
//! Each ping gets a struct implementing `PingDocument`, a marker trait for the
//! events it accepts, and `record_*` methods on `GleanEventsLogger`.

pub mod events_ping;

pub use events_ping::{BackendTestEventEvent, EventsPing, EventsPingEvent};
