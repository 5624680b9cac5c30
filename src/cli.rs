//! Command-line surface for the `glean-server` host binary.
//!
//! The library core has no CLI dependency; this module only parses flags,
//! resolves configuration and drives the logger.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::config::{ConfigLoader, GleanServerConfig};
use crate::telemetry::{BackendTestEventEvent, EventsPing, EventsPingEvent, RequestInfo};

#[derive(Debug, Parser)]
#[command(name = "glean-server", version, about = "Emit Glean server event pings as JSON lines")]
pub struct Cli {
    /// Explicit configuration file (skips global and project files)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project root holding config/config.toml
    #[arg(long, global = true, default_value = ".")]
    pub project: PathBuf,

    /// Debug-level diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable diagnostics entirely
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override log level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Override log format (text, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record one `events` ping
    RecordEvents(RecordEventsArgs),
    /// Print the resolved configuration as TOML
    ShowConfig,
}

#[derive(Debug, clap::Args)]
pub struct RecordEventsArgs {
    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(long)]
    pub ip_address: Option<String>,

    /// metric.name
    #[arg(long, default_value = "")]
    pub metric_name: String,

    /// metric.request_bool
    #[arg(long)]
    pub request_bool: bool,

    /// metric.request_count
    #[arg(long, default_value_t = 0)]
    pub request_count: i64,

    /// metric.request_datetime (RFC 3339); defaults to now
    #[arg(long)]
    pub request_datetime: Option<DateTime<Utc>>,

    /// Attach a backend.test_event with this string extra
    #[arg(long)]
    pub event_string: Option<String>,

    #[arg(long, default_value_t = 0, requires = "event_string")]
    pub event_quantity: i64,

    #[arg(long, requires = "event_string")]
    pub event_bool: bool,
}

impl RecordEventsArgs {
    pub fn request_info(&self) -> Option<RequestInfo> {
        if self.user_agent.is_none() && self.ip_address.is_none() {
            return None;
        }
        Some(RequestInfo::new(
            self.user_agent.clone().unwrap_or_default(),
            self.ip_address.clone().unwrap_or_default(),
        ))
    }

    pub fn to_ping(&self) -> EventsPing {
        let event = self.event_string.as_ref().map(|value| {
            Box::new(BackendTestEventEvent {
                event_field_string: value.clone(),
                event_field_quantity: self.event_quantity,
                event_field_bool: self.event_bool,
            }) as Box<dyn EventsPingEvent>
        });
        EventsPing {
            metric_name: self.metric_name.clone(),
            metric_request_bool: self.request_bool,
            metric_request_count: self.request_count,
            metric_request_datetime: self.request_datetime.unwrap_or_else(Utc::now),
            event,
        }
    }
}

impl Cli {
    /// Resolve configuration: explicit file if given, otherwise layered sources.
    pub fn load_config(&self) -> anyhow::Result<GleanServerConfig> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ConfigLoader::load(&self.project)?,
        };

        if self.quiet {
            config.logging.enabled = false;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        Ok(config)
    }

    pub fn execute(&self, config: &GleanServerConfig) -> anyhow::Result<Option<String>> {
        match &self.command {
            Commands::RecordEvents(args) => {
                let logger = config.build_logger()?;
                let ping = args.to_ping();
                match args.request_info() {
                    Some(request_info) => logger.record_events_ping(&request_info, &ping)?,
                    None => logger.record_events_ping_without_user_info(&ping)?,
                }
                Ok(None)
            }
            Commands::ShowConfig => Ok(Some(toml::to_string_pretty(config)?)),
        }
    }
}
