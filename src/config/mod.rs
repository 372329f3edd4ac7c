//! Configuration layer: typed settings with layered precedence
//! (defaults → file → environment).

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::cache::CacheConfig;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
const ENV_PREFIX: &str = "BREZZA";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Feed assembly settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Posts per feed page, shared by all four feed kinds.
    pub page_size: u32,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default tracing directive, overridable via `RUST_LOG`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// Root settings table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub feed: FeedSettings,
    pub cache: CacheConfig,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from an optional TOML file, then apply environment
    /// overrides (`BREZZA_FEED__PAGE_SIZE=6` style). Missing sources fall
    /// back to the documented defaults.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
