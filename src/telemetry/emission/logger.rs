//! The Glean events logger.
//!
//! Every record call is an independent transaction: build payload, build ping,
//! wrap in the envelope, serialize, write one line. Configuration is read-only
//! after construction; only the sink is shared mutable state.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RecordError;
use crate::telemetry::emission::sink::LineSink;
use crate::telemetry::events::GleanEvent;
use crate::telemetry::metrics::Metrics;
use crate::telemetry::ping::{ClientInfo, LogEnvelope, Ping, PingInfo, PingPayload, RequestInfo};
use crate::telemetry::types::{DocumentIdSource, RandomDocumentIds};

/// Identity of the emitting application, copied into every ping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppIdentity {
    /// Application id; becomes the ping's document namespace
    pub app_id: String,
    /// Version of the application emitting the event
    pub app_display_version: String,
    /// Channel to tell prod/beta/staging/devel apart
    pub app_channel: String,
}

impl AppIdentity {
    pub fn new(
        app_id: impl Into<String>,
        app_display_version: impl Into<String>,
        app_channel: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_display_version: app_display_version.into(),
            app_channel: app_channel.into(),
        }
    }
}

/// A typed ping that knows its document type and how to flatten itself into
/// metrics and events. New pings implement this; the logger does not change.
pub trait PingDocument {
    fn document_type(&self) -> &str;
    fn metrics(&self) -> Metrics;
    fn events(&self) -> Vec<GleanEvent>;
}

#[derive(Clone)]
pub struct GleanEventsLogger {
    identity: AppIdentity,
    sink: Option<LineSink>,
    ids: Arc<dyn DocumentIdSource>,
}

impl GleanEventsLogger {
    /// A logger with no sink; record calls fail with `NotConfigured` until one is set.
    pub fn new(identity: AppIdentity) -> Self {
        Self {
            identity,
            sink: None,
            ids: Arc::new(RandomDocumentIds),
        }
    }

    pub fn with_sink(mut self, sink: LineSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_writer<W: std::io::Write + Send + 'static>(self, writer: W) -> Self {
        self.with_sink(LineSink::new(writer))
    }

    pub fn with_id_source(mut self, ids: Arc<dyn DocumentIdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.sink.is_some()
    }

    fn create_client_info(&self) -> ClientInfo {
        ClientInfo::new(
            self.identity.app_display_version.clone(),
            self.identity.app_channel.clone(),
        )
    }

    /// Serialize `payload` and wrap it with delivery metadata.
    pub fn create_ping(
        &self,
        document_type: &str,
        request_info: &RequestInfo,
        payload: &PingPayload,
    ) -> Result<Ping, RecordError> {
        Ping::build(
            &self.identity.app_id,
            document_type,
            request_info,
            payload,
            self.ids.as_ref(),
        )
    }

    /// Assemble one ping and write it to the sink as a single JSON line.
    pub fn record(
        &self,
        document_type: &str,
        request_info: &RequestInfo,
        metrics: Metrics,
        events: Vec<GleanEvent>,
    ) -> Result<(), RecordError> {
        let sink = self.sink.as_ref().ok_or(RecordError::NotConfigured)?;

        let payload = PingPayload::new(self.create_client_info(), PingInfo::now(), metrics, events);
        let ping = self.create_ping(document_type, request_info, &payload)?;
        let document_id = ping.document_id().to_string();

        let line = LogEnvelope::wrap(ping).to_json()?;
        sink.write_line(&line)?;

        debug!(
            document_type = %document_type,
            document_id = %document_id,
            "ping recorded"
        );
        Ok(())
    }

    /// Record any typed ping.
    pub fn record_ping<P: PingDocument + ?Sized>(
        &self,
        request_info: &RequestInfo,
        ping: &P,
    ) -> Result<(), RecordError> {
        self.record(ping.document_type(), request_info, ping.metrics(), ping.events())
    }

    /// Record any typed ping without user request info.
    pub fn record_ping_without_user_info<P: PingDocument + ?Sized>(
        &self,
        ping: &P,
    ) -> Result<(), RecordError> {
        self.record_ping(&RequestInfo::empty(), ping)
    }
}

impl fmt::Debug for GleanEventsLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GleanEventsLogger")
            .field("identity", &self.identity)
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}
