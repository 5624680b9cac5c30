//! Configuration System
//!
//! Layered configuration for a host process that emits Glean server events:
//! application identity, where telemetry lines go, and diagnostic logging.
//! Defaults, a global file, project files and environment variables are merged
//! in that order.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::telemetry::{AppIdentity, GleanEventsLogger, LineSink};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Serializes tests that read or write process environment variables.
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GleanServerConfig {
    /// Identity copied into every ping
    #[serde(default)]
    pub app: AppIdentity,

    /// Telemetry output
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// Where telemetry lines are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub target: OutputTarget,

    /// Required when target is "file"; opened in append mode
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.target == OutputTarget::File && self.path.is_none() {
            return Err("output.path is required when output.target = \"file\"".to_string());
        }
        Ok(())
    }

    /// Open the configured sink.
    pub fn open_sink(&self) -> Result<LineSink, ConfigError> {
        match self.target {
            OutputTarget::Stdout => Ok(LineSink::stdout()),
            OutputTarget::Stderr => Ok(LineSink::stderr()),
            OutputTarget::File => {
                let path = self
                    .path
                    .as_ref()
                    .ok_or_else(|| ConfigError::Invalid("output.path is not set".to_string()))?;
                LineSink::append_file(path).map_err(|source| ConfigError::Output {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    App(String),
    Output(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::App(msg) => write!(f, "App: {}", msg),
            ValidationError::Output(msg) => write!(f, "Output: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl GleanServerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.app.app_id.trim().is_empty() {
            errors.push(ValidationError::App("app_id cannot be empty".to_string()));
        }

        if let Err(e) = self.output.validate() {
            errors.push(ValidationError::Output(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, open the sink and build a logger.
    pub fn build_logger(&self) -> Result<GleanEventsLogger, ConfigError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ConfigError::Invalid(error_msgs.join("\n"))
        })?;
        let sink = self.output.open_sink()?;
        Ok(GleanEventsLogger::new(self.app.clone()).with_sink(sink))
    }
}
