//! Configuration management for the CLI

use anyhow::{Context, Result};
use predictor_lib::ServiceConfig;
use std::path::{Path, PathBuf};

/// File names tried, in order, inside the config directory
const CONFIG_FILE_NAMES: [&str; 2] = ["config.toml", "config.json"];

/// Load service settings from the config file, the environment and flags.
///
/// An explicit `--config` path must exist; the default location is optional.
pub fn load(
    explicit: Option<&Path>,
    api_url: Option<String>,
    api_key: Option<String>,
) -> Result<ServiceConfig> {
    let file = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => default_config_file(),
    };

    let config = ServiceConfig::load(file.as_deref())
        .with_context(|| match &file {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Failed to load configuration from environment".to_string(),
        })?;

    Ok(config.with_overrides(api_url, api_key))
}

/// First existing file under `~/.config/wildpredict/`
fn default_config_file() -> Option<PathBuf> {
    let dir = config_dir()?;
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

fn config_dir() -> Option<PathBuf> {
    let home = dirs_next::home_dir()?;
    Some(home.join(".config").join("wildpredict"))
}
