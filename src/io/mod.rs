//! Delimited-data import subsystem.
//!
//! Turns a directory of OneRoster-style CSV files into typed records.
//!
//! # Architecture
//!
//! Each file flows through the same pipeline:
//!
//! - [`DelimitedReader`] parses logical lines with configurable controls
//! - [`RecordBuilder`] takes the first line as header and keys every row by it
//! - an [`Importer`] resolved from the [`ImporterRegistry`] by
//!   `(version, record type)` yields typed [`Record`](crate::models::Record)s
//!
//! [`ImportService`] drives the pipeline for single files and for whole
//! directories, where [`ManifestResolver`] reads `manifest.csv` to learn which
//! record types are present.
//!
//! # Examples
//!
//! ## Import a directory
//!
//! ```rust,ignore
//! use rosterload::io::{ImportService, ImporterRegistry, OptionOverrides};
//! use std::sync::Arc;
//!
//! let service = ImportService::new(Arc::new(ImporterRegistry::with_builtin()));
//! let imported = service.import_directory("export/", &OptionOverrides::default())?;
//! for (record_type, result) in imported.iter() {
//!     println!("{record_type}: {} records", result.len());
//! }
//! ```
//!
//! ## Import one file with a different delimiter
//!
//! ```rust,ignore
//! use rosterload::io::{CsvControl, OptionOverrides};
//!
//! let overrides = OptionOverrides::default()
//!     .csv_control(CsvControl::default().with_delimiter(';'));
//! let users = service.import("export/users.csv", "users", &overrides)?;
//! ```

pub mod importers;
pub mod manifest;
pub mod options;
pub mod reader;
pub mod records;
pub mod registry;
pub mod services;
pub mod traits;

// Re-exports for convenience
pub use manifest::{ManifestResolver, ManifestSummary};
pub use options::{
    CsvControl, DEFAULT_VERSION, ImportOptions, OptionOverrides, Override, ResolvedOptions,
    RowWidthPolicy,
};
pub use reader::{DelimitedReader, RawFields};
pub use records::RecordBuilder;
pub use registry::ImporterRegistry;
pub use services::{BaseDirectory, DirectoryImport, ImportService};
pub use traits::{GenericRecord, Header, ImportResult, Importer};
