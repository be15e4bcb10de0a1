use serde::Serialize;

use super::{CommonFields, FromRecord, Record, list, optional, required, required_any};
use crate::Result;
use crate::io::GenericRecord;

/// OneRoster class: a course section taught in a school during terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    /// Shared identity and delta columns.
    #[serde(flatten)]
    pub common: CommonFields,
    /// Display title.
    pub title: String,
    /// Class code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_code: Option<String>,
    /// `homeroom` or `scheduled`.
    pub class_type: String,
    /// Room or location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Grade levels.
    pub grades: Vec<String>,
    /// Subject names.
    pub subjects: Vec<String>,
    /// Course `sourcedId`.
    pub course: String,
    /// School `sourcedId`.
    pub school: String,
    /// Academic session `sourcedId`s.
    pub terms: Vec<String>,
    /// Schedule periods.
    pub periods: Vec<String>,
}

impl FromRecord for Class {
    const RECORD_TYPE: &'static str = "classes";

    fn from_record(record: &GenericRecord) -> Result<Self> {
        Ok(Self {
            common: CommonFields::from_record(Self::RECORD_TYPE, record)?,
            title: required(Self::RECORD_TYPE, record, "title")?,
            class_code: optional(record, "classCode"),
            class_type: required(Self::RECORD_TYPE, record, "classType")?,
            location: optional(record, "location"),
            grades: list(record, &["grades"]),
            subjects: list(record, &["subjects"]),
            course: required_any(Self::RECORD_TYPE, record, &["courseSourcedId", "course"])?,
            school: required_any(Self::RECORD_TYPE, record, &["schoolSourcedId", "school"])?,
            terms: list(record, &["termSourcedIds", "terms"]),
            periods: list(record, &["periods"]),
        })
    }

    fn into_record(self) -> Record {
        Record::Class(self)
    }
}
