//! # Configuration
//!
//! Optional TOML file (default `config.toml`, written by `initiative-host init`).
//! Every section and key has a default, so a partial or missing file is fine.
//!
//! ```toml
//! [device]
//! host = "192.168.1.50"
//! port = 5000
//! connect_timeout_secs = 3
//!
//! [roster]
//! file = "players.json"
//!
//! [logging]
//! level = "info"
//! # file = "initiative-host.log"
//! ```
//!
//! Precedence: console `connect` > CLI flags > config file > defaults.

use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::protocol::{DeviceAddress, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_PORT};
use crate::roster::DEFAULT_ROSTER_FILE;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Device IP or hostname. Empty until configured.
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl DeviceConfig {
    /// The configured address, if a host is set.
    pub fn address(&self) -> Option<DeviceAddress> {
        let host = self.host.trim();
        if host.is_empty() {
            None
        } else {
            Some(DeviceAddress::new(host, self.port))
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        // zero would make every connect time out immediately
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default = "default_roster_file")]
    pub file: String,
}

fn default_roster_file() -> String {
    DEFAULT_ROSTER_FILE.to_string()
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            file: default_roster_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown names fall back to `info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level
            .trim()
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Load `path`, or fall back to defaults when it does not exist.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        if fs::try_exists(path).await.unwrap_or(false) {
            Self::load(path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Apply CLI address overrides.
    pub fn override_device(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.device.host = host;
        }
        if let Some(port) = port {
            self.device.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.device.port, 5000);
        assert_eq!(config.device.connect_timeout_secs, 3);
        assert!(config.device.address().is_none());
        assert_eq!(config.roster.file, "players.json");
        assert_eq!(config.logging.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[device]\nhost = \"10.0.0.2\"\n").unwrap();
        assert_eq!(
            config.device.address(),
            Some(DeviceAddress::new("10.0.0.2", 5000))
        );
        assert_eq!(config.roster.file, "players.json");
    }

    #[test]
    fn bad_level_falls_back_to_info() {
        let logging = LoggingConfig {
            level: "chatty".into(),
            file: None,
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Info);
        let logging = LoggingConfig {
            level: "debug".into(),
            file: None,
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn cli_overrides() {
        let mut config = Config::default();
        config.override_device(Some("display.local".into()), None);
        assert_eq!(config.device.host, "display.local");
        assert_eq!(config.device.port, 5000);
        config.override_device(None, Some(6000));
        assert_eq!(config.device.port, 6000);
        assert_eq!(config.device.connect_timeout(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn default_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();
        Config::create_default(path).await.unwrap();
        let loaded = Config::load(path).await.unwrap();
        assert_eq!(loaded.device.port, 5000);
        assert_eq!(loaded.roster.file, "players.json");

        let missing = dir.path().join("missing.toml");
        let fallback = Config::load_or_default(missing.to_str().unwrap())
            .await
            .unwrap();
        assert!(fallback.device.host.is_empty());
    }
}
