//! Configuration management for the NAS proxy
//!
//! The root path is read once at startup; the directory layout derived from it
//! never changes for the lifetime of a service.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Default chunk size used when streaming resource contents
pub const DEFAULT_STREAM_BUFFER_SIZE: usize = 4096;

/// Immutable proxy configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct NasConfig {
    /// Root directory of the managed layout
    /// Environment: NAS_PROXY_ROOT_PATH
    pub root_path: String,

    /// Buffer capacity for streamed reads, in bytes
    #[serde(default = "default_stream_buffer_size")]
    pub stream_buffer_size: usize,

    /// Default log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_stream_buffer_size() -> usize {
    DEFAULT_STREAM_BUFFER_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl NasConfig {
    /// Build a configuration for `root_path` with default tuning values
    pub fn new(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            stream_buffer_size: DEFAULT_STREAM_BUFFER_SIZE,
            log_level: default_log_level(),
        }
    }

    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        // Packaged layout first, then the working directory
        let config_paths = ["nas-proxy/config", "config"];

        let mut last_error = None;

        for config_path in &config_paths {
            match Config::builder()
                .add_source(File::with_name(config_path))
                .add_source(Environment::with_prefix("NAS_PROXY").try_parsing(true))
                .build()
            {
                Ok(settings) => {
                    let config: NasConfig = settings.try_deserialize()?;
                    config.validate()?;
                    return Ok(config);
                }
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            config::ConfigError::Message(format!(
                "Failed to load configuration from any of {config_paths:?}"
            ))
        }))
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.root_path.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "root_path cannot be empty".into(),
            ));
        }

        if self.stream_buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "stream_buffer_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get the configured root as PathBuf
    pub fn root_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.root_path)
    }
}
