//! Event schema for pings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::telemetry::types::now_millis;

/// One event inside a ping. The timestamp is taken when the event is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GleanEvent {
    category: String,
    name: String,
    timestamp: i64,
    extra: BTreeMap<String, String>,
}

impl GleanEvent {
    pub fn new(category: impl Into<String>, name: impl Into<String>, extra: EventExtras) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            timestamp: now_millis(),
            extra: extra.0,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Milliseconds since Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}

/// Builder for event extras. Every value is stored as its string rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventExtras(BTreeMap<String, String>);

impl EventExtras {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn quantity(mut self, key: impl Into<String>, value: i64) -> Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    /// Rendered as `"true"` / `"false"`.
    pub fn boolean(mut self, key: impl Into<String>, value: bool) -> Self {
        self.0.insert(key.into(), value.to_string());
        self
    }
}

/// Anything that can be embedded as an event in a ping.
///
/// Pings narrow this with their own marker trait so that only the events
/// declared for that ping can be passed to its record method.
pub trait IntoGleanEvent {
    fn glean_event(&self) -> GleanEvent;
}
