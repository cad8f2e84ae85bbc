//! Service configuration.
//!
//! A TOML file with three optional keys:
//!
//! ```toml
//! log_level = "INFO"
//! listen_address = "[::1]:50051"
//! allowed_npubs = ["npub1..."]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

/// File read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "policy-config.toml";

/// Default `listen_address`.
pub const DEFAULT_LISTEN_ADDRESS: &str = "[::1]:50051";

/// Default `log_level`.
pub const DEFAULT_LOG_LEVEL: &str = "ERROR";

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// One of DEBUG, INFO, WARN, ERROR (any case).
    pub log_level: String,
    /// `host:port` to listen on.
    pub listen_address: String,
    /// NIP-19 `npub` strings allowed to publish.
    pub allowed_npubs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            allowed_npubs: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed. A missing
    /// file is an error too; there is no silent fallback to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string. Absent keys take defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The effective tracing level.
    pub fn level(&self) -> Level {
        parse_log_level(&self.log_level)
    }
}

/// Map a configured level name to a tracing level.
///
/// Case-insensitive. Unknown or empty names fall back to ERROR.
pub fn parse_log_level(level: &str) -> Level {
    match level.to_ascii_uppercase().as_str() {
        "DEBUG" => Level::DEBUG,
        "INFO" => Level::INFO,
        "WARN" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::ERROR,
    }
}
