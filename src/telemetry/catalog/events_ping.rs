//! The `events` ping and the `backend.test_event` event.

use chrono::{DateTime, Utc};

use crate::error::RecordError;
use crate::telemetry::emission::{GleanEventsLogger, PingDocument};
use crate::telemetry::events::{EventExtras, GleanEvent, IntoGleanEvent};
use crate::telemetry::metrics::Metrics;
use crate::telemetry::ping::RequestInfo;

pub const EVENTS_PING_DOCUMENT_TYPE: &str = "events";

/// Marker for events that may be sent in the `events` ping.
pub trait EventsPingEvent: IntoGleanEvent + Send + Sync {}

/// `backend.test_event`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendTestEventEvent {
    /// A string extra field
    pub event_field_string: String,
    /// A quantity extra field
    pub event_field_quantity: i64,
    /// A boolean extra field
    pub event_field_bool: bool,
}

impl IntoGleanEvent for BackendTestEventEvent {
    fn glean_event(&self) -> GleanEvent {
        let extra = EventExtras::new()
            .string("event_field_string", self.event_field_string.clone())
            .quantity("event_field_quantity", self.event_field_quantity)
            .boolean("event_field_bool", self.event_field_bool);
        GleanEvent::new("backend", "test_event", extra)
    }
}

impl EventsPingEvent for BackendTestEventEvent {}

pub struct EventsPing {
    /// Test string metric
    pub metric_name: String,
    pub metric_request_bool: bool,
    /// Test quantity metric
    pub metric_request_count: i64,
    /// Test datetime metric
    pub metric_request_datetime: DateTime<Utc>,
    pub event: Option<Box<dyn EventsPingEvent>>,
}

impl PingDocument for EventsPing {
    fn document_type(&self) -> &str {
        EVENTS_PING_DOCUMENT_TYPE
    }

    fn metrics(&self) -> Metrics {
        let mut metrics = Metrics::new();
        metrics
            .set_string("metric.name", self.metric_name.clone())
            .set_boolean("metric.request_bool", self.metric_request_bool)
            .set_quantity("metric.request_count", self.metric_request_count)
            .set_datetime("metric.request_datetime", &self.metric_request_datetime);
        metrics
    }

    fn events(&self) -> Vec<GleanEvent> {
        self.event
            .iter()
            .map(|event| event.glean_event())
            .collect()
    }
}

impl GleanEventsLogger {
    /// Record and submit an `events` ping.
    pub fn record_events_ping(
        &self,
        request_info: &RequestInfo,
        params: &EventsPing,
    ) -> Result<(), RecordError> {
        self.record_ping(request_info, params)
    }

    /// Record and submit an `events` ping omitting user request info.
    pub fn record_events_ping_without_user_info(
        &self,
        params: &EventsPing,
    ) -> Result<(), RecordError> {
        self.record_events_ping(&RequestInfo::empty(), params)
    }
}
