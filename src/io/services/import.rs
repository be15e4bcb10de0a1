//! Dataset import service.
//!
//! Orchestrates single-file and manifest-driven directory imports.

use crate::Result;
use crate::io::manifest::ManifestResolver;
use crate::io::options::{ImportOptions, OptionOverrides, ResolvedOptions};
use crate::io::reader::DelimitedReader;
use crate::io::records::RecordBuilder;
use crate::io::registry::ImporterRegistry;
use crate::io::traits::ImportResult;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument};

const MANIFEST_TYPE: &str = "manifest";
const DATA_EXTENSION: &str = ".csv";

/// A dataset directory path that ends with exactly one separator.
///
/// `/` is appended unless the path already ends with `/` or `\`, so
/// normalizing twice changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseDirectory(PathBuf);

impl BaseDirectory {
    /// Normalizes `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().as_os_str();
        let mut normalized = OsString::from(raw);
        if !matches!(raw.as_encoded_bytes().last(), Some(b'/' | b'\\')) {
            normalized.push("/");
        }
        Self(PathBuf::from(normalized))
    }

    /// Returns the normalized path, separator included.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns `<base><name>`.
    #[must_use]
    pub fn file(&self, name: impl AsRef<OsStr>) -> PathBuf {
        let mut joined = self.0.clone().into_os_string();
        joined.push(name);
        PathBuf::from(joined)
    }

    /// Returns `<base><record_type>.csv`.
    #[must_use]
    pub fn data_file(&self, record_type: &str) -> PathBuf {
        self.file(format!("{record_type}{DATA_EXTENSION}"))
    }
}

/// Results of a directory import, keyed by record type in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryImport {
    results: Vec<(String, ImportResult)>,
}

impl DirectoryImport {
    /// Returns the result for a record type.
    #[must_use]
    pub fn get(&self, record_type: &str) -> Option<&ImportResult> {
        self.results
            .iter()
            .find(|(t, _)| t == record_type)
            .map(|(_, result)| result)
    }

    /// Returns whether a record type was imported.
    #[must_use]
    pub fn contains(&self, record_type: &str) -> bool {
        self.get(record_type).is_some()
    }

    /// Iterates over (record type, result) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ImportResult)> {
        self.results.iter().map(|(t, r)| (t.as_str(), r))
    }

    /// Returns the imported record types.
    pub fn record_types(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|(t, _)| t.as_str())
    }

    /// Returns the number of imported record types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns whether nothing was imported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the total number of records across all types.
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.results.iter().map(|(_, r)| r.len()).sum()
    }
}

impl Serialize for DirectoryImport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.results.len()))?;
        for (record_type, result) in &self.results {
            map.serialize_entry(record_type, &result.records)?;
        }
        map.end()
    }
}

/// Service for importing delimited datasets.
///
/// Instance defaults are fixed at construction. Every call merges its own
/// [`OptionOverrides`] onto them and validates the result before doing any
/// I/O, so calls never affect each other.
#[derive(Debug, Clone)]
pub struct ImportService {
    /// Options every call starts from.
    defaults: ImportOptions,
    /// Importers by (version, record type).
    registry: Arc<ImporterRegistry>,
}

impl ImportService {
    /// Creates a service with the built-in default options.
    #[must_use]
    pub fn new(registry: impl Into<Arc<ImporterRegistry>>) -> Self {
        Self {
            defaults: ImportOptions::default(),
            registry: registry.into(),
        }
    }

    /// Replaces the instance defaults.
    #[must_use]
    pub fn with_defaults(mut self, defaults: ImportOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Returns the instance defaults.
    #[must_use]
    pub const fn defaults(&self) -> &ImportOptions {
        &self.defaults
    }

    /// Returns the importer registry.
    #[must_use]
    pub fn registry(&self) -> &ImporterRegistry {
        &self.registry
    }

    /// Imports one file as `record_type`.
    ///
    /// The importer is resolved before the file is opened, so an unknown
    /// type never touches the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) for
    /// invalid merged options, [`Error::UnknownType`](crate::Error::UnknownType)
    /// if no importer matches, and any error raised while reading, building,
    /// or importing records.
    pub fn import(
        &self,
        path: impl AsRef<Path>,
        record_type: &str,
        overrides: &OptionOverrides,
    ) -> Result<ImportResult> {
        let options = self.resolve_options(overrides)?;
        self.import_with(path.as_ref(), record_type, &options)
    }

    /// Imports every record type the directory's manifest declares present.
    ///
    /// `manifest.csv` is imported first; each detected type is then read
    /// from `<dir>/<type>.csv`. A type listed twice is imported once.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any file. Results of files
    /// imported before it are discarded.
    #[instrument(skip(self, dir, overrides), fields(dir = %dir.as_ref().display()))]
    pub fn import_directory(
        &self,
        dir: impl AsRef<Path>,
        overrides: &OptionOverrides,
    ) -> Result<DirectoryImport> {
        let options = self.resolve_options(overrides)?;
        let base = BaseDirectory::new(dir);

        let types = self.detect_with(&base, &options)?;

        let mut seen = HashSet::new();
        let mut results = Vec::with_capacity(types.len());
        for record_type in types {
            if !seen.insert(record_type.clone()) {
                debug!(record_type = %record_type, "Skipping duplicate manifest entry");
                continue;
            }
            let result = self.import_with(&base.data_file(&record_type), &record_type, &options)?;
            results.push((record_type, result));
        }

        let imported = DirectoryImport { results };
        info!(
            record_types = imported.len(),
            records = imported.total_records(),
            "Imported dataset"
        );
        Ok(imported)
    }

    /// Returns the record types the directory's manifest declares present.
    ///
    /// Only `manifest.csv` is read. Duplicates are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or the manifest cannot be
    /// imported.
    #[instrument(skip(self, dir, overrides), fields(dir = %dir.as_ref().display()))]
    pub fn detect_available_types(
        &self,
        dir: impl AsRef<Path>,
        overrides: &OptionOverrides,
    ) -> Result<Vec<String>> {
        let options = self.resolve_options(overrides)?;
        self.detect_with(&BaseDirectory::new(dir), &options)
    }

    /// Imports `manifest.csv` from a directory.
    ///
    /// # Errors
    ///
    /// Same as [`import`](Self::import).
    pub fn import_manifest(
        &self,
        dir: impl AsRef<Path>,
        overrides: &OptionOverrides,
    ) -> Result<ImportResult> {
        let options = self.resolve_options(overrides)?;
        let base = BaseDirectory::new(dir);
        self.import_with(&base.data_file(MANIFEST_TYPE), MANIFEST_TYPE, &options)
    }

    fn resolve_options(&self, overrides: &OptionOverrides) -> Result<ResolvedOptions> {
        self.defaults.merge(overrides).resolve()
    }

    fn detect_with(&self, base: &BaseDirectory, options: &ResolvedOptions) -> Result<Vec<String>> {
        let manifest = self.import_with(&base.data_file(MANIFEST_TYPE), MANIFEST_TYPE, options)?;
        let types = ManifestResolver::detect_types(&manifest)?;
        debug!(types = ?types, "Detected record types");
        Ok(types)
    }

    #[instrument(skip(self, path, options), fields(path = %path.display(), version = %options.version))]
    fn import_with(
        &self,
        path: &Path,
        record_type: &str,
        options: &ResolvedOptions,
    ) -> Result<ImportResult> {
        let importer = self.registry.resolve(&options.version, record_type)?;

        let reader = DelimitedReader::open(path, &options.csv_control)?;
        let (header, records) = RecordBuilder::new(options.row_width)
            .with_source(path)
            .build(reader)?;

        let result = importer.import(&header, records)?;
        debug!(records = result.len(), "Imported file");
        Ok(result)
    }
}
