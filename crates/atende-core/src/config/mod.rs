mod catalog;
mod defaults;


pub use catalog::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AtendeError;
use defaults::*;

/// Top-level atende configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub catalog: Catalog,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
        }
    }
}

impl BotConfig {
    /// Directory holding the opaque session credential state.
    /// Created on demand by the session store.
    pub fn session_dir(&self) -> String {
        format!("{}/session", shellexpand(&self.data_dir))
    }
}

/// Connection lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Fixed delay before reconnecting after a transient closure.
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_secs: u64,
    /// Device name shown in the phone's linked-devices list.
    #[serde(default = "default_device_name")]
    pub device_name: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            reconnect_delay_secs: default_reconnect_delay(),
            device_name: default_device_name(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, AtendeError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| AtendeError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| AtendeError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
