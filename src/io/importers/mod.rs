//! Built-in importers.
//!
//! - [`ManifestImporter`] for `manifest.csv`
//! - [`TypedImporter`] for every entity file with a model in
//!   [`crate::models`]
//! - [`PassthroughImporter`] for files that should stay header-keyed

use crate::io::registry::ImporterRegistry;
use crate::io::traits::{GenericRecord, Header, ImportResult, Importer};
use crate::models::{
    AcademicSession, Class, Course, Enrollment, FromRecord, ManifestEntry, Org, Record, User,
};
use crate::{Error, Result};
use std::marker::PhantomData;
use std::sync::Arc;

const PROPERTY_NAME: &str = "propertyName";
const VALUE: &str = "value";

/// Registers the OneRoster importer set under `version`.
pub fn register_builtin(registry: &mut ImporterRegistry, version: &str) {
    registry.register(version, Arc::new(ManifestImporter));
    registry.register(version, Arc::new(TypedImporter::<Org>::new()));
    registry.register(version, Arc::new(TypedImporter::<AcademicSession>::new()));
    registry.register(version, Arc::new(TypedImporter::<User>::new()));
    registry.register(version, Arc::new(TypedImporter::<Course>::new()));
    registry.register(version, Arc::new(TypedImporter::<Class>::new()));
    registry.register(version, Arc::new(TypedImporter::<Enrollment>::new()));
}

/// Imports `manifest.csv` into [`ManifestEntry`] records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestImporter;

impl Importer for ManifestImporter {
    fn record_type(&self) -> &str {
        "manifest"
    }

    fn import(&self, header: &Header, records: Vec<GenericRecord>) -> Result<ImportResult> {
        // Header line is line 1.
        for column in [PROPERTY_NAME, VALUE] {
            if !header.contains(column) {
                return Err(Error::ManifestField {
                    line: 1,
                    field: column.to_string(),
                });
            }
        }

        let entries = records
            .iter()
            .map(|record| {
                let property_name = manifest_field(record, PROPERTY_NAME)?;
                let value = manifest_field(record, VALUE)?;
                Ok(Record::Manifest(
                    ManifestEntry::new(property_name, value).with_line(record.line),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ImportResult::new(self.record_type(), entries))
    }
}

// `value` may legitimately be empty; only an absent column is an error.
fn manifest_field<'a>(record: &'a GenericRecord, column: &str) -> Result<&'a str> {
    record.get(column).ok_or_else(|| Error::ManifestField {
        line: record.line,
        field: column.to_string(),
    })
}

/// Maps every row onto the model `T`.
pub struct TypedImporter<T> {
    _model: PhantomData<fn() -> T>,
}

impl<T: FromRecord> TypedImporter<T> {
    /// Creates the importer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _model: PhantomData,
        }
    }
}

impl<T: FromRecord> Default for TypedImporter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FromRecord> Importer for TypedImporter<T> {
    fn record_type(&self) -> &str {
        T::RECORD_TYPE
    }

    fn import(&self, _header: &Header, records: Vec<GenericRecord>) -> Result<ImportResult> {
        let records = records
            .iter()
            .map(|record| T::from_record(record).map(T::into_record))
            .collect::<Result<Vec<_>>>()?;
        Ok(ImportResult::new(T::RECORD_TYPE, records))
    }
}

/// Keeps rows as [`Record::Generic`] under a caller-chosen record type.
#[derive(Debug, Clone)]
pub struct PassthroughImporter {
    record_type: String,
}

impl PassthroughImporter {
    /// Creates an importer for `record_type`.
    #[must_use]
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
        }
    }
}

impl Importer for PassthroughImporter {
    fn record_type(&self) -> &str {
        &self.record_type
    }

    fn import(&self, _header: &Header, records: Vec<GenericRecord>) -> Result<ImportResult> {
        let records = records.into_iter().map(Record::Generic).collect();
        Ok(ImportResult::new(self.record_type.clone(), records))
    }
}
