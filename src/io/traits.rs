//! Core types shared by the import pipeline.
//!
//! Defines the header-keyed [`GenericRecord`] produced by the parsing stage
//! and the [`Importer`] trait that turns those records into typed
//! [`Record`]s.

use crate::Result;
use crate::models::Record;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Column names taken from the first line of a file, trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Header(Vec<String>);

impl Header {
    /// Creates a header from column names.
    #[must_use]
    pub const fn new(columns: Vec<String>) -> Self {
        Self(columns)
    }

    /// Returns the column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the header has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether a column with the given name exists.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.0.iter().any(|c| c == column)
    }
}

/// An untyped row keyed by header column names.
///
/// Lookups with a duplicated column name resolve to the rightmost column.
/// Serializes as a map of column to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericRecord {
    /// 1-based line where the row starts in its file.
    pub line: u64,
    fields: Vec<(String, String)>,
}

impl GenericRecord {
    /// Creates a record from (column, value) pairs.
    #[must_use]
    pub const fn new(line: u64, fields: Vec<(String, String)>) -> Self {
        Self { line, fields }
    }

    /// Returns the value of a column, if present.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the value of a column if present and non-empty.
    #[must_use]
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.is_empty())
    }

    /// Iterates over (column, value) pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for GenericRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Typed records produced from one file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// Record type the file was imported as.
    pub record_type: String,
    /// Records in file order.
    pub records: Vec<Record>,
}

impl ImportResult {
    /// Creates a result.
    #[must_use]
    pub fn new(record_type: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            record_type: record_type.into(),
            records,
        }
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether no records were imported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ImportResult {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Converts the generic records of one file into typed records.
///
/// Implementations are registered in an
/// [`ImporterRegistry`](crate::io::ImporterRegistry) under a format version
/// and their [`record_type`](Importer::record_type).
///
/// # Example Implementation
///
/// ```rust,ignore
/// impl Importer for WidgetImporter {
///     fn record_type(&self) -> &str {
///         "widgets"
///     }
///
///     fn import(&self, header: &Header, records: Vec<GenericRecord>) -> Result<ImportResult> {
///         let records = records.into_iter().map(Record::Generic).collect();
///         Ok(ImportResult::new(self.record_type(), records))
///     }
/// }
/// ```
pub trait Importer: Send + Sync {
    /// The record type this importer handles (e.g. `users`).
    fn record_type(&self) -> &str;

    /// Imports the records of one file.
    ///
    /// # Errors
    ///
    /// Returns an error if a record lacks a field the importer requires.
    fn import(&self, header: &Header, records: Vec<GenericRecord>) -> Result<ImportResult>;
}
