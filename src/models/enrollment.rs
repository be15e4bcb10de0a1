use serde::Serialize;

use super::{CommonFields, FromRecord, Record, optional, required, required_any};
use crate::Result;
use crate::io::GenericRecord;

/// OneRoster enrollment of a user in a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Shared identity and delta columns.
    #[serde(flatten)]
    pub common: CommonFields,
    /// User `sourcedId`.
    pub user: String,
    /// Class `sourcedId`.
    pub class: String,
    /// School `sourcedId`.
    pub school: String,
    /// Role as written (`student`, `teacher`...).
    pub role: String,
    /// Whether this is the primary teacher.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    /// Enrollment start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_date: Option<String>,
    /// Last day, as written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl FromRecord for Enrollment {
    const RECORD_TYPE: &'static str = "enrollments";

    fn from_record(record: &GenericRecord) -> Result<Self> {
        Ok(Self {
            common: CommonFields::from_record(Self::RECORD_TYPE, record)?,
            user: required_any(Self::RECORD_TYPE, record, &["userSourcedId", "user"])?,
            class: required_any(Self::RECORD_TYPE, record, &["classSourcedId", "class"])?,
            school: required_any(Self::RECORD_TYPE, record, &["schoolSourcedId", "school"])?,
            role: required(Self::RECORD_TYPE, record, "role")?,
            primary: optional(record, "primary"),
            begin_date: optional(record, "beginDate"),
            end_date: optional(record, "endDate"),
        })
    }

    fn into_record(self) -> Record {
        Record::Enrollment(self)
    }
}
