//! Structured logging configuration.

use crate::config::LoggingSettings;
use serde::Deserialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Default filter directive.
const DEFAULT_LEVEL: &str = "info";
/// Filter directive used with `--verbose`.
const VERBOSE_LEVEL: &str = "debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Event filter.
    pub filter: EnvFilter,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds the configuration from config file settings.
    ///
    /// `RUST_LOG` takes precedence over the configured level. `verbose`
    /// raises the fallback level to `debug` when neither is set.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        let fallback = settings
            .and_then(|s| s.level.clone())
            .unwrap_or_else(|| default_level(verbose).to_string());

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&fallback))
            .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

        Self {
            format: settings.and_then(|s| s.format).unwrap_or_default(),
            filter,
            file: settings.and_then(|s| s.file.clone()),
        }
    }
}

const fn default_level(verbose: bool) -> &'static str {
    if verbose { VERBOSE_LEVEL } else { DEFAULT_LEVEL }
}
