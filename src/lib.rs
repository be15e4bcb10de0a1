//! # Rosterload
//!
//! Manifest-driven import of roster CSV datasets.
//!
//! A dataset is a directory holding a `manifest.csv` plus one CSV file per
//! record type. The manifest declares which record types are present; each
//! present file is parsed with configurable delimiter/quote/escape controls,
//! mapped into header-keyed records, and handed to the importer registered
//! for its (format version, record type) pair.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rosterload::io::{ImportService, ImporterRegistry, OptionOverrides};
//!
//! let service = ImportService::new(ImporterRegistry::with_builtin());
//! let dataset = service.import_directory("/data/export", &OptionOverrides::default())?;
//! for (record_type, result) in dataset.iter() {
//!     println!("{record_type}: {} records", result.len());
//! }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod io;
pub mod models;
pub mod observability;

// Re-exports for convenience
pub use config::RosterConfig;
pub use io::{
    BaseDirectory, CsvControl, DirectoryImport, GenericRecord, Header, ImportOptions,
    ImportResult, ImportService, Importer, ImporterRegistry, OptionOverrides, Override,
    RowWidthPolicy,
};
pub use models::{ManifestEntry, Record};

/// Error type for rosterload operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Configuration` | Version or csv controls missing after merge, non-ASCII control character, bad config file |
/// | `NotFound` | A data file named by the caller or the manifest does not exist |
/// | `Io` | Opening or reading a data file fails |
/// | `MalformedRow` | Row width differs from the header under strict policy, or a line cannot be decoded |
/// | `UnknownType` | No importer is registered for the (version, record type) pair |
/// | `ManifestField` | A manifest row lacks `propertyName` or `value` |
/// | `MissingField` | A typed importer's required column is absent or empty |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Import options are incomplete or invalid.
    ///
    /// Raised before any file I/O happens, so a configuration mistake never
    /// leaves a file half read.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A data file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Opening or reading a data file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A row does not fit the file's shape.
    #[error("malformed row at {}:{line}: {reason}", path.display())]
    MalformedRow {
        /// The file containing the row.
        path: PathBuf,
        /// 1-based line where the row starts.
        line: u64,
        /// What is wrong with the row.
        reason: String,
    },

    /// No importer is registered for a (version, record type) pair.
    #[error("no importer registered for record type '{record_type}' in version '{version}'")]
    UnknownType {
        /// Format version that was requested.
        version: String,
        /// Record type that was requested.
        record_type: String,
    },

    /// A manifest row lacks one of its required columns.
    #[error("manifest line {line}: missing required field '{field}'")]
    ManifestField {
        /// 1-based line in `manifest.csv`.
        line: u64,
        /// The missing column.
        field: String,
    },

    /// A typed record lacks a required column.
    #[error("{record_type} line {line}: missing required field '{field}'")]
    MissingField {
        /// Record type being imported.
        record_type: String,
        /// 1-based line in the data file.
        line: u64,
        /// The missing column.
        field: String,
    },
}

impl Error {
    /// Returns whether the error stems from configuration rather than data.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns whether the error points at missing or malformed dataset content.
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Io { .. }
                | Self::MalformedRow { .. }
                | Self::ManifestField { .. }
                | Self::MissingField { .. }
        )
    }
}

/// Result type alias for rosterload operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Configuration("version should be specified".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: version should be specified"
        );

        let err = Error::UnknownType {
            version: "v1.1".to_string(),
            record_type: "widgets".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no importer registered for record type 'widgets' in version 'v1.1'"
        );

        let err = Error::MalformedRow {
            path: PathBuf::from("users.csv"),
            line: 3,
            reason: "expected 4 fields, found 2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed row at users.csv:3: expected 4 fields, found 2"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::Configuration("x".into()).is_configuration());
        assert!(!Error::Configuration("x".into()).is_data_error());

        let missing = Error::NotFound {
            path: PathBuf::from("/data/users.csv"),
        };
        assert!(missing.is_data_error());
        assert!(!missing.is_configuration());

        let unknown = Error::UnknownType {
            version: "v2".into(),
            record_type: "users".into(),
        };
        assert!(!unknown.is_data_error());
        assert!(!unknown.is_configuration());
    }
}
