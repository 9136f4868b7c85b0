//! Configuration loading.
//!
//! Credentials are deliberately not configurable here; they arrive as CLI
//! arguments and never touch the filesystem.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use tmi_proto::{DEFAULT_HOST, DEFAULT_PORT};

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML or has the wrong shape.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level bot configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Chat server endpoint.
    #[serde(default)]
    pub server: ServerConfig,

    /// Greeting sent when the channel join is acknowledged.
    /// Falls back to a built-in greeting when unset.
    #[serde(default)]
    pub greeting: Option<String>,
}

/// Chat server endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (unencrypted IRC).
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "irc.chat.twitch.tv");
        assert_eq!(config.server.port, 6667);
        assert!(config.greeting.is_none());
    }

    #[test]
    fn test_parse_full() {
        let config: Config = toml::from_str(
            r#"
            greeting = "Hello chat!"

            [server]
            host = "localhost"
            port = 16667
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 16667);
        assert_eq!(config.greeting.as_deref(), Some("Hello chat!"));
    }

    #[test]
    fn test_parse_partial_fills_defaults() {
        let config: Config = toml::from_str("[server]\nhost = \"localhost\"\n").unwrap();
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 6667);
    }
}
