//! Configuration lookup for the CLI.

use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;

use xact_core::models::config::XactConfig;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "XACTPARSE_CONFIG";

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("xactparse")
        .join("config.json")
}

/// Load the configuration named by `XACTPARSE_CONFIG`, else the user
/// config file if present, else defaults.
pub fn load() -> anyhow::Result<XactConfig> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        debug!("Loading configuration from {}", path.display());
        return XactConfig::from_file(&path)
            .with_context(|| format!("Invalid configuration file {}", path.display()));
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        XactConfig::from_file(&path)
            .with_context(|| format!("Invalid configuration file {}", path.display()))
    } else {
        Ok(XactConfig::default())
    }
}
