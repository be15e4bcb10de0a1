//! Typed record models.
//!
//! One struct per OneRoster 1.1 CSV record type, plus the [`Record`] enum
//! that an [`Importer`](crate::io::Importer) yields. Field mapping is purely
//! structural: values stay strings, list columns are split on `,`, and empty
//! optional columns become `None`.

mod academic_session;
mod class;
mod course;
mod enrollment;
mod manifest;
mod org;
mod user;

pub use academic_session::AcademicSession;
pub use class::Class;
pub use course::Course;
pub use enrollment::Enrollment;
pub use manifest::{ManifestEntry, ProcessingMode};
pub use org::Org;
pub use user::User;

use crate::io::GenericRecord;
use crate::{Error, Result};
use serde::Serialize;

/// A typed record produced by an importer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Record {
    /// A `manifest.csv` row.
    Manifest(ManifestEntry),
    /// An `orgs.csv` row.
    Org(Org),
    /// An `academicSessions.csv` row.
    AcademicSession(AcademicSession),
    /// A `users.csv` row.
    User(User),
    /// A `courses.csv` row.
    Course(Course),
    /// A `classes.csv` row.
    Class(Class),
    /// An `enrollments.csv` row.
    Enrollment(Enrollment),
    /// A row kept in its header-keyed form.
    Generic(GenericRecord),
}

impl Record {
    /// Returns the manifest entry, if this is one.
    #[must_use]
    pub const fn as_manifest(&self) -> Option<&ManifestEntry> {
        match self {
            Self::Manifest(entry) => Some(entry),
            _ => None,
        }
    }

    /// Returns the variant name as used in the `kind` tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Manifest(_) => "manifest",
            Self::Org(_) => "org",
            Self::AcademicSession(_) => "academicSession",
            Self::User(_) => "user",
            Self::Course(_) => "course",
            Self::Class(_) => "class",
            Self::Enrollment(_) => "enrollment",
            Self::Generic(_) => "generic",
        }
    }

    /// Returns the source line, for records that keep one.
    #[must_use]
    pub const fn line(&self) -> Option<u64> {
        match self {
            Self::Manifest(entry) if entry.line > 0 => Some(entry.line),
            Self::Generic(record) => Some(record.line),
            _ => None,
        }
    }

    /// Returns the `sourcedId` for entity records.
    #[must_use]
    pub fn sourced_id(&self) -> Option<&str> {
        let common = match self {
            Self::Org(r) => &r.common,
            Self::AcademicSession(r) => &r.common,
            Self::User(r) => &r.common,
            Self::Course(r) => &r.common,
            Self::Class(r) => &r.common,
            Self::Enrollment(r) => &r.common,
            Self::Manifest(_) | Self::Generic(_) => return None,
        };
        Some(&common.sourced_id)
    }
}

/// Conversion from a [`GenericRecord`] into a typed model.
pub trait FromRecord: Sized {
    /// Record type name, matching the data file stem (e.g. `users`).
    const RECORD_TYPE: &'static str;

    /// Builds the model from one row.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing or empty.
    fn from_record(record: &GenericRecord) -> Result<Self>;

    /// Wraps the model in a [`Record`].
    fn into_record(self) -> Record;
}

/// Columns shared by every OneRoster entity file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonFields {
    /// Entity identifier.
    pub sourced_id: String,
    /// `active` / `tobedeleted`, only present in delta exports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Last modification timestamp, only present in delta exports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_last_modified: Option<String>,
}

impl CommonFields {
    pub(crate) fn from_record(record_type: &str, record: &GenericRecord) -> Result<Self> {
        Ok(Self {
            sourced_id: required(record_type, record, "sourcedId")?,
            status: optional(record, "status"),
            date_last_modified: optional(record, "dateLastModified"),
        })
    }
}

pub(crate) fn required(record_type: &str, record: &GenericRecord, column: &str) -> Result<String> {
    record
        .non_empty(column)
        .map(String::from)
        .ok_or_else(|| Error::MissingField {
            record_type: record_type.to_string(),
            line: record.line,
            field: column.to_string(),
        })
}

pub(crate) fn optional(record: &GenericRecord, column: &str) -> Option<String> {
    record.non_empty(column).map(String::from)
}

/// Like [`required`], accepting the first non-empty of several column
/// spellings (`orgSourcedId` in OneRoster 1.1, `org` in older exports).
pub(crate) fn required_any(
    record_type: &str,
    record: &GenericRecord,
    columns: &[&str],
) -> Result<String> {
    optional_any(record, columns).ok_or_else(|| Error::MissingField {
        record_type: record_type.to_string(),
        line: record.line,
        field: columns.first().copied().unwrap_or_default().to_string(),
    })
}

pub(crate) fn optional_any(record: &GenericRecord, columns: &[&str]) -> Option<String> {
    columns.iter().find_map(|c| optional(record, c))
}

/// Splits a comma-separated list column, trying each spelling in turn.
pub(crate) fn list(record: &GenericRecord, columns: &[&str]) -> Vec<String> {
    columns
        .iter()
        .find_map(|c| record.non_empty(c))
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
