//! Configuration loading.
//!
//! Settings come from a TOML file: server identity, the listen address,
//! and the MOTD body. Everything but the server name has a sensible
//! default so a minimal config is two lines.

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server identity.
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Message of the day.
    #[serde(default)]
    pub motd: MotdConfig,
}

/// Server identity block.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Name used in reply prefixes, e.g. `irc.example.net`.
    pub name: String,
}

/// Listen block.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address and port to bind.
    pub address: SocketAddr,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: ([0, 0, 0, 0], 6667).into(),
        }
    }
}

/// MOTD block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MotdConfig {
    /// Body lines, sent one RPL_MOTD each.
    #[serde(default)]
    pub lines: Vec<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
