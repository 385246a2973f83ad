//! Rewards API configuration module.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PORT=8080                                                          │
//! │     REWARDS_BIND_ADDR=127.0.0.1                                        │
//! │     RUST_LOG=debug                                                     │
//! │                                                                         │
//! │  2. TOML Config File (path in REWARDS_CONFIG)                          │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     0.0.0.0:3000, filter "info,rewards=debug"                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [server]
//! bind_addr = "127.0.0.1"
//! port = 8080
//!
//! [logging]
//! filter = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const ENV_CONFIG_PATH: &str = "REWARDS_CONFIG";
pub const ENV_PORT: &str = "PORT";
pub const ENV_BIND_ADDR: &str = "REWARDS_BIND_ADDR";
pub const ENV_LOG_FILTER: &str = "RUST_LOG";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_FILTER: &str = "info,rewards=debug";

/// Rewards API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener to
    pub bind_addr: String,

    /// HTTP port
    pub port: u16,

    /// tracing-subscriber filter directive
    pub log_filter: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

// Shape of the optional TOML file; every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    server: ServerSection,
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServerSection {
    bind_addr: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
    filter: Option<String>,
}

impl ApiConfig {
    /// Load configuration from the process environment and, if
    /// `REWARDS_CONFIG` is set, from that TOML file.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match env::var(ENV_CONFIG_PATH) {
            Ok(path) => {
                let path = PathBuf::from(path);
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path, source })?;
                Some(contents)
            }
            Err(_) => None,
        };

        Self::from_sources(file.as_deref(), |key| env::var(key).ok())
    }

    /// Builds configuration from file contents and an environment lookup.
    pub fn from_sources(
        file: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = ApiConfig::default();

        if let Some(contents) = file {
            let parsed: FileConfig = toml::from_str(contents)?;
            if let Some(bind_addr) = parsed.server.bind_addr {
                config.bind_addr = bind_addr;
            }
            if let Some(port) = parsed.server.port {
                config.port = port;
            }
            if let Some(filter) = parsed.logging.filter {
                config.log_filter = filter;
            }
        }

        if let Some(port) = lookup(ENV_PORT) {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PORT.to_string(),
                value: port.clone(),
            })?;
        }
        if let Some(bind_addr) = lookup(ENV_BIND_ADDR) {
            config.bind_addr = bind_addr;
        }
        if let Some(filter) = lookup(ENV_LOG_FILTER) {
            config.log_filter = filter;
        }

        if config.bind_addr.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: ENV_BIND_ADDR.to_string(),
                value: config.bind_addr,
            });
        }

        Ok(config)
    }

    /// Returns the full listen address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_sources(None, env_of(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = r#"
            [server]
            port = 8080

            [logging]
            filter = "debug"
        "#;
        let config = ApiConfig::from_sources(Some(file), env_of(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_env_overrides_file() {
        let file = "[server]\nport = 8080\nbind_addr = \"10.0.0.1\"\n";
        let env = env_of(&[("PORT", "9090"), ("REWARDS_BIND_ADDR", "127.0.0.1")]);
        let config = ApiConfig::from_sources(Some(file), env).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9090");
    }

    #[test]
    fn test_invalid_port() {
        let err = ApiConfig::from_sources(None, env_of(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));

        let err = ApiConfig::from_sources(None, env_of(&[("PORT", "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let err = ApiConfig::from_sources(Some("[server\nport = "), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
