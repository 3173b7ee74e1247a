//! Configuration infrastructure
//!
//! Settings are layered with the `config` crate:
//! 1. Built-in defaults
//! 2. Optional `config/default` file (any format `config` understands)
//! 3. `BUGGY__`-prefixed environment variables, e.g. `BUGGY__SERVER__PORT`
//!
//! Two legacy variables are honoured on top: `CS1999_PORT` sets the port and
//! `BUGGY_DEBUG=true` raises the log level to debug.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use url::Url;

use crate::domain::constants::race_server;

const ENV_PREFIX: &str = "BUGGY";
const PORT_ENV: &str = "CS1999_PORT";
const DEBUG_ENV: &str = "BUGGY_DEBUG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    Load {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },

    #[error("Environment variable error: {message}")]
    Environment { message: String },
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Where component prices are scraped from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Race server root; the catalog lives at `{base_url}/specs`
    pub base_url: String,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: race_server::BASE_URL.to_string(),
            request_timeout_seconds: 30,
            user_agent: concat!("buggy-race-editor/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite:database.db`
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:database.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for the log file
    pub directory: String,

    /// Log file name inside `directory`
    pub file_name: String,

    /// Module-specific log level filters (e.g., "sqlx": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            directory: "logs".to_string(),
            file_name: "buggy-race-editor.log".to_string(),
            module_filters: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load from `config/default` and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_file("config/default", false)
    }

    /// Load from a specific file, then overlay the environment
    pub fn from_file(path: &str, required: bool) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::with_name(path).required(required))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let mut config: Self = settings.try_deserialize()?;
        config.apply_legacy_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CS1999_PORT` and `BUGGY_DEBUG` using the given lookup
    pub fn apply_legacy_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(PORT_ENV).filter(|p| !p.trim().is_empty()) {
            self.server.port = port.trim().parse().map_err(|e| ConfigError::Environment {
                message: format!("{PORT_ENV}={port} is not a valid port: {e}"),
            })?;
        }

        if lookup(DEBUG_ENV).is_some_and(|v| v.trim().eq_ignore_ascii_case("true")) {
            self.logging.level = "debug".to_string();
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                message: "server.port must be greater than 0".to_string(),
            });
        }

        if let Err(e) = Url::parse(&self.catalog.base_url) {
            return Err(ConfigError::Validation {
                message: format!("catalog.base_url '{}' is not a URL: {e}", self.catalog.base_url),
            });
        }

        if self.catalog.request_timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                message: "catalog.request_timeout_seconds must be greater than 0".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation {
                message: "database.max_connections must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
