//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod extract;

use std::path::{Path, PathBuf};

use sigex_core::SigexConfig;
use tracing::debug;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sigex")
        .join("config.json")
}

/// Load the configuration from an explicit path, else the default file
/// when it exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SigexConfig> {
    if let Some(path) = config_path {
        return Ok(SigexConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        Ok(SigexConfig::from_file(&path)?)
    } else {
        Ok(SigexConfig::default())
    }
}
