//! Ping documents: payload, ping and the log envelope written to the sink.
//!
//! The payload is serialized to a string and embedded in the ping as
//! `payload`; ingestion expects that string, not a nested object.

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::telemetry::events::GleanEvent;
use crate::telemetry::metrics::Metrics;
use crate::telemetry::types::{now_iso8601_millis, now_unix_nanos_string, DocumentIdSource};

/// Log type used by the data pipeline to route server events.
pub const GLEAN_EVENT_MOZLOG_TYPE: &str = "glean-server-event";
pub const LOGGER_NAME: &str = "glean";
pub const DOCUMENT_VERSION: &str = "1";
pub const TELEMETRY_SDK_BUILD: &str = concat!("glean-server v", env!("CARGO_PKG_VERSION"));

const UNKNOWN: &str = "Unknown";

/// Per-request context. Empty fields are omitted from the ping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInfo {
    pub user_agent: String,
    pub ip_address: String,
}

impl RequestInfo {
    pub fn new(user_agent: impl Into<String>, ip_address: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ip_address: ip_address.into(),
        }
    }

    /// The "omit request info" value.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    telemetry_sdk_build: String,
    first_run_date: String,
    os: String,
    os_version: String,
    architecture: String,
    app_build: String,
    app_display_version: String,
    app_channel: String,
}

impl ClientInfo {
    /// Fields the schema requires but that have no meaning server-side are "Unknown".
    pub fn new(app_display_version: impl Into<String>, app_channel: impl Into<String>) -> Self {
        Self {
            telemetry_sdk_build: TELEMETRY_SDK_BUILD.to_string(),
            first_run_date: UNKNOWN.to_string(),
            os: UNKNOWN.to_string(),
            os_version: UNKNOWN.to_string(),
            architecture: UNKNOWN.to_string(),
            app_build: UNKNOWN.to_string(),
            app_display_version: app_display_version.into(),
            app_channel: app_channel.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingInfo {
    seq: u32,
    start_time: String,
    end_time: String,
}

impl PingInfo {
    /// `seq` is always 0; there is no persisted sequence counter.
    pub fn now() -> Self {
        let now = now_iso8601_millis();
        Self {
            seq: 0,
            start_time: now.clone(),
            end_time: now,
        }
    }

    pub fn seq(&self) -> u32 {
        self.seq
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn end_time(&self) -> &str {
        &self.end_time
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingPayload {
    client_info: ClientInfo,
    ping_info: PingInfo,
    metrics: Metrics,
    events: Vec<GleanEvent>,
}

impl PingPayload {
    pub fn new(
        client_info: ClientInfo,
        ping_info: PingInfo,
        metrics: Metrics,
        events: Vec<GleanEvent>,
    ) -> Self {
        Self {
            client_info,
            ping_info,
            metrics,
            events,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ping {
    document_namespace: String,
    document_type: String,
    document_version: String,
    document_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    user_agent: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    ip_address: String,
    payload: String,
}

impl Ping {
    /// Serialize the payload, then assign a fresh document id.
    pub fn build(
        namespace: &str,
        document_type: &str,
        request_info: &RequestInfo,
        payload: &PingPayload,
        ids: &dyn DocumentIdSource,
    ) -> Result<Self, RecordError> {
        let payload_json =
            serde_json::to_string(payload).map_err(RecordError::PayloadSerialization)?;
        let document_id = ids
            .next_document_id()
            .map_err(RecordError::IdentifierGeneration)?;
        Ok(Self {
            document_namespace: namespace.to_string(),
            document_type: document_type.to_string(),
            document_version: DOCUMENT_VERSION.to_string(),
            document_id,
            user_agent: request_info.user_agent.clone(),
            ip_address: request_info.ip_address.clone(),
            payload: payload_json,
        })
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }
}

/// The outermost document: one of these is one line on the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogEnvelope {
    timestamp: String,
    logger: String,
    #[serde(rename = "Type")]
    log_type: String,
    fields: Ping,
}

impl LogEnvelope {
    pub fn wrap(ping: Ping) -> Self {
        Self {
            timestamp: now_unix_nanos_string(),
            logger: LOGGER_NAME.to_string(),
            log_type: GLEAN_EVENT_MOZLOG_TYPE.to_string(),
            fields: ping,
        }
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        serde_json::to_string(self).map_err(RecordError::EnvelopeSerialization)
    }
}
