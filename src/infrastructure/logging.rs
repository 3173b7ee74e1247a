//! Logging system configuration and initialization
//!
//! Console and/or file output through `tracing-subscriber`, with optional
//! JSON formatting. `RUST_LOG` overrides the configured level.

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt,
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

pub use crate::infrastructure::config::LoggingConfig;

type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

// Keeps the non-blocking file writer alive for the life of the process
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<tracing_appender::non_blocking::WorkerGuard>> = Mutex::new(Vec::new());
}

/// Build the filter: `RUST_LOG` if set, otherwise the configured level with
/// noisy dependencies held back unless tracing.
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow!("Invalid log level '{}': {}", config.level, e))?;

    if !config.level.eq_ignore_ascii_case("trace") {
        for directive in ["sqlx=warn", "hyper=warn", "reqwest=info", "html5ever=warn", "selectors=warn"] {
            filter = filter.add_directive(directive.parse()?);
        }
    }

    for (module, level) in &config.module_filters {
        let directive = format!("{module}={level}");
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| anyhow!("Invalid module filter '{}': {}", directive, e))?,
        );
    }

    Ok(filter)
}

pub fn log_file_path(config: &LoggingConfig) -> PathBuf {
    PathBuf::from(&config.directory).join(&config.file_name)
}

/// Initialize logging with custom configuration
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    if !config.console_output && !config.file_output {
        return Err(anyhow!("No logging output configured"));
    }

    let env_filter = build_env_filter(config)?;

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.file_output {
        std::fs::create_dir_all(&config.directory)
            .map_err(|e| anyhow!("Failed to create log directory {}: {}", config.directory, e))?;
        let (writer, guard) = non_blocking(rolling::never(&config.directory, &config.file_name));
        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard registry poisoned"))?
            .push(guard);

        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        layers.push(if config.json_format {
            layer.json().boxed()
        } else {
            layer.with_target(false).boxed()
        });
    }

    if config.console_output {
        let layer = fmt::layer().with_writer(std::io::stdout);
        layers.push(if config.json_format {
            layer.json().boxed()
        } else {
            layer.with_target(false).boxed()
        });
    }

    Registry::default()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;

    info!("Logging system initialized");
    info!("Log level: {}", config.level);
    if config.file_output {
        info!("Log file: {:?}", log_file_path(config));
    }

    Ok(())
}

/// Log system information for diagnostics
pub fn log_system_info() {
    info!("=== Buggy Race Editor ===");
    info!("Application version: {}", env!("CARGO_PKG_VERSION"));
    info!("Operating system: {}", std::env::consts::OS);
    if let Ok(current_dir) = std::env::current_dir() {
        info!("Working directory: {:?}", current_dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.console_output);
        assert!(!config.file_output);
    }

    #[test]
    fn test_log_file_path() {
        let config = LoggingConfig::default();
        assert!(log_file_path(&config).ends_with("logs/buggy-race-editor.log"));
    }

    #[test]
    fn test_no_output_is_rejected() {
        let config = LoggingConfig {
            console_output: false,
            file_output: false,
            ..Default::default()
        };
        assert!(init_logging_with_config(&config).is_err());
    }

    #[test]
    fn test_bad_module_filter_is_rejected() {
        let mut config = LoggingConfig::default();
        config.module_filters.insert("sqlx".to_string(), "loud!".to_string());

        // RUST_LOG short-circuits the configured filters
        if std::env::var("RUST_LOG").is_err() {
            assert!(build_env_filter(&config).is_err());
        }
    }
}
