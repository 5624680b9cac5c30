//! Telemetry domain: metrics, events, ping assembly and emission.

mod types;

pub mod catalog;
pub mod emission;
pub mod events;
pub mod metrics;
pub mod ping;

pub use catalog::{BackendTestEventEvent, EventsPing, EventsPingEvent};
pub use emission::{AppIdentity, GleanEventsLogger, LineSink, PingDocument};
pub use events::{EventExtras, GleanEvent, IntoGleanEvent};
pub use metrics::{MetricType, MetricValue, Metrics};
pub use ping::{ClientInfo, LogEnvelope, Ping, PingInfo, PingPayload, RequestInfo};
pub use types::{
    format_iso8601_millis, new_document_id, now_iso8601_millis, now_millis,
    now_unix_nanos_string, DocumentIdSource, RandomDocumentIds,
};
