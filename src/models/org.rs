use serde::Serialize;

use super::{CommonFields, FromRecord, Record, list, optional, optional_any, required};
use crate::Result;
use crate::io::GenericRecord;

/// OneRoster organization (district, school, department...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Org {
    /// Shared identity and delta columns.
    #[serde(flatten)]
    pub common: CommonFields,
    /// Display name.
    pub name: String,
    /// `district`, `school`, `department`...
    #[serde(rename = "type")]
    pub org_type: String,
    /// Human-readable identifier, e.g. a state code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Parent `sourcedId`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Child `sourcedId`s.
    pub children: Vec<String>,
}

impl FromRecord for Org {
    const RECORD_TYPE: &'static str = "orgs";

    fn from_record(record: &GenericRecord) -> Result<Self> {
        Ok(Self {
            common: CommonFields::from_record(Self::RECORD_TYPE, record)?,
            name: required(Self::RECORD_TYPE, record, "name")?,
            org_type: required(Self::RECORD_TYPE, record, "type")?,
            identifier: optional(record, "identifier"),
            parent: optional_any(record, &["parentSourcedId", "parent"]),
            children: list(record, &["childSourcedIds", "children"]),
        })
    }

    fn into_record(self) -> Record {
        Record::Org(self)
    }
}
