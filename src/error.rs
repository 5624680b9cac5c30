//! Error types for the Glean server event logger.

use thiserror::Error;

/// Errors returned by a single record call. Nothing is written when one occurs.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Output sink not configured")]
    NotConfigured,

    #[error("Failed to serialize ping payload: {0}")]
    PayloadSerialization(#[source] serde_json::Error),

    #[error("Failed to serialize log envelope: {0}")]
    EnvelopeSerialization(#[source] serde_json::Error),

    #[error("Failed to generate document id: {0}")]
    IdentifierGeneration(#[source] IdentifierError),

    #[error("Failed to write ping to sink: {0}")]
    Write(#[from] std::io::Error),
}

/// A document id source could not produce an id.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct IdentifierError {
    message: String,
}

impl IdentifierError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Configuration and host setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to open output {path:?}: {source}")]
    Output {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err.to_string())
    }
}
