//! Import orchestration.
//!
//! Wires options, reading, record building, and importer dispatch together.

pub mod import;

pub use import::{BaseDirectory, DirectoryImport, ImportService};
