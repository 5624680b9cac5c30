//! Loader facade: assembles sources in precedence order and deserializes.

use std::path::{Path, PathBuf};

use config::{Environment, File};

use crate::config::merge::merge_policy;
use crate::config::sources::{global_file, project_file};
use crate::config::GleanServerConfig;
use crate::error::ConfigError;

/// Prefix for environment overrides, e.g. `GLEAN_SERVER__APP__APP_ID`.
const ENV_PREFIX: &str = "GLEAN_SERVER";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a project root.
    ///
    /// Precedence (lowest to highest): defaults, global file, project files, environment.
    pub fn load(project_root: &Path) -> Result<GleanServerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = project_file::add_to_builder(builder, project_root)?;
        let config = builder.add_source(env_source()).build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load configuration from one explicit file (plus defaults and environment).
    pub fn load_from_file(path: &Path) -> Result<GleanServerConfig, ConfigError> {
        let config = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(env_source())
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}
