//! Configuration persistence
//!
//! `SequencerConfig` lives in fartbox-types; loading and storing it through
//! confy happens here since only the host touches the filesystem.

use std::path::PathBuf;

use fartbox_types::SequencerConfig;
use thiserror::Error;
use tracing::warn;

const APP_NAME: &str = "fartbox";
const CONFIG_NAME: &str = "config";

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[source] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}

/// Load the config file, creating it with defaults on first run
pub fn try_load() -> Result<SequencerConfig, ConfigError> {
    confy::load(APP_NAME, CONFIG_NAME).map_err(ConfigError::Load)
}

/// Load the config file, falling back to defaults if it cannot be read
pub fn load() -> SequencerConfig {
    try_load().unwrap_or_else(|e| {
        warn!(error = %e, "Using default configuration");
        SequencerConfig::default()
    })
}

pub fn save(config: &SequencerConfig) -> Result<(), ConfigError> {
    confy::store(APP_NAME, CONFIG_NAME, config).map_err(ConfigError::Save)
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Load)
}
