use serde::Serialize;

use super::{CommonFields, FromRecord, Record, list, optional_any, required};
use crate::Result;
use crate::io::GenericRecord;

/// OneRoster academic session (school year, term, grading period).
///
/// Dates are kept as written; no calendar validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSession {
    /// Shared identity and delta columns.
    #[serde(flatten)]
    pub common: CommonFields,
    /// Display title.
    pub title: String,
    /// `schoolYear`, `term`, `semester` or `gradingPeriod`.
    #[serde(rename = "type")]
    pub session_type: String,
    /// First day, as written.
    pub start_date: String,
    /// Last day, as written.
    pub end_date: String,
    /// Parent `sourcedId`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// School year the record belongs to.
    pub school_year: String,
    /// Child `sourcedId`s.
    pub children: Vec<String>,
}

impl FromRecord for AcademicSession {
    const RECORD_TYPE: &'static str = "academicSessions";

    fn from_record(record: &GenericRecord) -> Result<Self> {
        Ok(Self {
            common: CommonFields::from_record(Self::RECORD_TYPE, record)?,
            title: required(Self::RECORD_TYPE, record, "title")?,
            session_type: required(Self::RECORD_TYPE, record, "type")?,
            start_date: required(Self::RECORD_TYPE, record, "startDate")?,
            end_date: required(Self::RECORD_TYPE, record, "endDate")?,
            parent: optional_any(record, &["parentSourcedId", "parent"]),
            school_year: required(Self::RECORD_TYPE, record, "schoolYear")?,
            children: list(record, &["childSourcedIds", "children"]),
        })
    }

    fn into_record(self) -> Record {
        Record::AcademicSession(self)
    }
}
