use serde::Serialize;

use super::{CommonFields, FromRecord, Record, list, optional, optional_any, required, required_any};
use crate::Result;
use crate::io::GenericRecord;

/// OneRoster course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Shared identity and delta columns.
    #[serde(flatten)]
    pub common: CommonFields,
    /// Display title.
    pub title: String,
    /// School year the record belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_year: Option<String>,
    /// Course code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    /// Grade levels.
    pub grades: Vec<String>,
    /// Subject names.
    pub subjects: Vec<String>,
    /// Owning org `sourcedId`.
    pub org: String,
}

impl FromRecord for Course {
    const RECORD_TYPE: &'static str = "courses";

    fn from_record(record: &GenericRecord) -> Result<Self> {
        Ok(Self {
            common: CommonFields::from_record(Self::RECORD_TYPE, record)?,
            title: required(Self::RECORD_TYPE, record, "title")?,
            school_year: optional_any(record, &["schoolYearSourcedId", "schoolYear"]),
            course_code: optional(record, "courseCode"),
            grades: list(record, &["grades"]),
            subjects: list(record, &["subjects"]),
            org: required_any(Self::RECORD_TYPE, record, &["orgSourcedId", "org"])?,
        })
    }

    fn into_record(self) -> Record {
        Record::Course(self)
    }
}
