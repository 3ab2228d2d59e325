//! Client configuration loaded from a TOML file.
//!
//! A missing file yields the defaults. Command line flags are applied on top
//! by the binary.

use std::{io, path::Path, time::Duration};

use serde::Deserialize;

use crate::{Error, endpoints::DEFAULT_BASE_URL, pagination::DEFAULT_PAGE_SIZE};

/// The file name looked for when no config path is given.
pub const DEFAULT_CONFIG_PATH: &str = "mengmeng.toml";

/// The top level configuration.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Where the server lives.
    #[serde(default)]
    pub server: ServerConfig,

    /// Client side behaviour.
    #[serde(default)]
    pub client: ClientConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server connection settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// The API base URL, including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per request timeout. `None` uses the HTTP client's default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ServerConfig {
    /// The request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

/// Client side settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// How many transactions to request per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Canonical timezone name, e.g. "Asia/Shanghai", used to decide what
    /// "today" is. Falls back to the system offset, then UTC.
    #[serde(default)]
    pub timezone: Option<String>,

    /// Where the CLI keeps the bearer token between invocations.
    #[serde(default = "default_session_path")]
    pub session_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            timezone: None,
            session_path: default_session_path(),
        }
    }
}

/// Log settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// A `tracing_subscriber::EnvFilter` directive, e.g. "warn" or "mengmeng_budget=debug".
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_session_path() -> String {
    ".mengmeng-session".to_owned()
}

fn default_log_level() -> String {
    "warn".to_owned()
}

impl Config {
    /// Load the config at `path`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Config] if the file exists but cannot be read or is
    /// not valid TOML for this schema. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self, Error> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no config file at {path:?}, using defaults");
                Ok(Self::default())
            }
            Err(error) => Err(Error::Config(format!("could not read {path:?}: {error}"))),
        }
    }

    /// Parse a config from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, Error> {
        toml::from_str(contents).map_err(|error| Error::Config(error.to_string()))
    }
}
