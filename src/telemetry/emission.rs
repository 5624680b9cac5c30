//! Emission: the logger that turns typed pings into lines on a sink.

pub mod logger;
pub mod sink;

pub use logger::{AppIdentity, GleanEventsLogger, PingDocument};
pub use sink::LineSink;
