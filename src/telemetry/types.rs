//! Shared telemetry helpers: timestamps and document id generation.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Builder;

use crate::error::IdentifierError;

/// Current time as milliseconds since Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current time as nanoseconds since Unix epoch, rendered as a decimal string.
pub fn now_unix_nanos_string() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
        .to_string()
}

/// Current UTC time as `YYYY-MM-DDTHH:mm:ss.sssZ`.
pub fn now_iso8601_millis() -> String {
    format_iso8601_millis(&Utc::now())
}

/// Format an instant as `YYYY-MM-DDTHH:mm:ss.sssZ`.
pub fn format_iso8601_millis(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Generate a random (v4) document id in canonical hyphenated form.
///
/// Fails instead of panicking when the OS entropy source is unavailable.
pub fn new_document_id() -> Result<String, IdentifierError> {
    let mut bytes = [0u8; 16];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| IdentifierError::new(e.to_string()))?;
    Ok(Builder::from_random_bytes(bytes).into_uuid().to_string())
}

/// Source of document ids for pings.
pub trait DocumentIdSource: Send + Sync {
    fn next_document_id(&self) -> Result<String, IdentifierError>;
}

/// Random v4 ids from the OS entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDocumentIds;

impl DocumentIdSource for RandomDocumentIds {
    fn next_document_id(&self) -> Result<String, IdentifierError> {
        new_document_id()
    }
}
