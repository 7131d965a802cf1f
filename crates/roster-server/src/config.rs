//! Server configuration.

use anyhow::Result;
use roster_core::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_TOPIC, DEFAULT_UNIT_LABEL};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Name of the sync channel shared by control and display contexts.
    #[serde(default = "default_topic")]
    pub topic: String,
    /// How far a display may fall behind before it has to resynchronize.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Unit given to employees listed before any unit header.
    #[serde(default = "default_unit_label")]
    pub default_unit_label: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./frontend/dist")
}

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

fn default_unit_label() -> String {
    DEFAULT_UNIT_LABEL.to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            topic: default_topic(),
            channel_capacity: default_channel_capacity(),
            default_unit_label: default_unit_label(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Config {
    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from `config/default.toml`, then the user config
    /// directory, or fall back to defaults.
    pub fn load() -> Result<Self> {
        let local = PathBuf::from("config/default.toml");
        if local.exists() {
            return Self::load_from(&local);
        }

        if let Some(user) = dirs::config_dir().map(|d| d.join("roster").join("config.toml")) {
            if user.exists() {
                return Self::load_from(&user);
            }
        }

        Ok(Config::default())
    }
}
