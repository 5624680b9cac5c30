//! Metric groups carried in a ping payload.
//!
//! A value's type is given by the group it sits in, not by a tag on the value.
//! The typed setters on [`Metrics`] are the only way to insert, so a metric
//! always lands in the group matching its declared type.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::telemetry::types::format_iso8601_millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    String,
    Boolean,
    Quantity,
    Datetime,
}

impl MetricType {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::String => "string",
            MetricType::Boolean => "boolean",
            MetricType::Quantity => "quantity",
            MetricType::Datetime => "datetime",
        }
    }
}

/// A single metric value. Datetimes are stored pre-formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Boolean(bool),
    Quantity(i64),
    String(String),
}

/// Metric type name -> fully-qualified metric name -> value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metrics(BTreeMap<MetricType, BTreeMap<String, MetricValue>>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_string(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.insert(MetricType::String, name.into(), MetricValue::String(value.into()))
    }

    pub fn set_boolean(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        self.insert(MetricType::Boolean, name.into(), MetricValue::Boolean(value))
    }

    pub fn set_quantity(&mut self, name: impl Into<String>, value: i64) -> &mut Self {
        self.insert(MetricType::Quantity, name.into(), MetricValue::Quantity(value))
    }

    pub fn set_datetime(&mut self, name: impl Into<String>, value: &DateTime<Utc>) -> &mut Self {
        self.insert(
            MetricType::Datetime,
            name.into(),
            MetricValue::String(format_iso8601_millis(value)),
        )
    }

    /// Later writes to the same name overwrite earlier ones.
    fn insert(&mut self, kind: MetricType, name: String, value: MetricValue) -> &mut Self {
        self.0.entry(kind).or_default().insert(name, value);
        self
    }

    pub fn group(&self, kind: MetricType) -> Option<&BTreeMap<String, MetricValue>> {
        self.0.get(&kind)
    }

    pub fn get(&self, kind: MetricType, name: &str) -> Option<&MetricValue> {
        self.group(kind).and_then(|group| group.get(name))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeMap::is_empty)
    }
}
