//! Configuration management.
//!
//! Configuration is read from a TOML file:
//!
//! ```toml
//! [import]
//! version = "v1.1"
//! rowWidth = "strict"
//!
//! [import.csvControl]
//! delimiter = ","
//! quote = "\""
//! escape = "\\"
//!
//! [logging]
//! format = "json"
//! level = "debug"
//! file = "/var/log/rosterload.log"
//! ```
//!
//! Every key is optional; missing keys take the built-in defaults.

use crate::io::ImportOptions;
use crate::observability::LogFormat;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application directory name under the platform config dir.
const APP_DIR: &str = "rosterload";
/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Main configuration for rosterload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Import defaults.
    pub import: ImportOptions,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging section in config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Output format.
    pub format: Option<LogFormat>,
    /// Filter directive, e.g. `info` or `rosterload=debug`.
    pub level: Option<String>,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
}

impl RosterConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("cannot read config file {}: {e}", path.display()))
        })?;

        Self::parse(&contents).map_err(|e| match e {
            Error::Configuration(msg) => {
                Error::Configuration(format!("{}: {msg}", path.display()))
            },
            other => other,
        })
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the text is not valid configuration.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Configuration(e.to_string()))
    }

    /// Returns the default config file location, if a home directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads configuration from the default location.
    ///
    /// Returns default configuration if no config file is found or it
    /// cannot be loaded.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(path) = Self::default_path().filter(|p| p.exists()) else {
            return Self::default();
        };

        Self::load_from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable config file");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{CsvControl, RowWidthPolicy};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RosterConfig::parse("").unwrap();
        assert_eq!(config, RosterConfig::default());
        assert_eq!(config.import.version.as_deref(), Some("v1.1"));
    }

    #[test]
    fn test_full_config() {
        let config = RosterConfig::parse(
            r#"
[import]
version = "v1.2"
rowWidth = "lenient"

[import.csvControl]
delimiter = ";"

[logging]
format = "json"
level = "debug"
file = "/tmp/rosterload.log"
"#,
        )
        .unwrap();

        assert_eq!(config.import.version.as_deref(), Some("v1.2"));
        assert_eq!(config.import.row_width, RowWidthPolicy::Lenient);
        assert_eq!(
            config.import.csv_control,
            Some(CsvControl::default().with_delimiter(';'))
        );
        assert_eq!(config.logging.format, Some(LogFormat::Json));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/rosterload.log")));
    }

    #[test]
    fn test_invalid_config_is_configuration_error() {
        let err = RosterConfig::parse("[import]\nrowWidth = \"sometimes\"\n").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nformat = \"pretty\"\n").unwrap();

        let config = RosterConfig::load_from_file(&path).unwrap();
        assert_eq!(config.logging.format, Some(LogFormat::Pretty));

        let err = RosterConfig::load_from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }
}
