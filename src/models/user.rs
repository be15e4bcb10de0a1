use serde::Serialize;

use super::{CommonFields, FromRecord, Record, list, optional, required};
use crate::Result;
use crate::io::GenericRecord;

/// OneRoster user (student, teacher, guardian...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Shared identity and delta columns.
    #[serde(flatten)]
    pub common: CommonFields,
    /// Login name.
    pub username: String,
    /// External identifiers, `{type:identifier}` pairs as written.
    pub user_ids: Vec<String>,
    /// Raw `enabledUser` value (`true` / `false`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_user: Option<String>,
    /// First name.
    pub given_name: String,
    /// Last name.
    pub family_name: String,
    /// Middle name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    /// Role as written (`student`, `teacher`...).
    pub role: String,
    /// Human-readable identifier, e.g. a state code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// SMS number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Related user `sourcedId`s (guardians, ...).
    pub agents: Vec<String>,
    /// Org `sourcedId`s the user belongs to.
    pub orgs: Vec<String>,
    /// Grade levels.
    pub grades: Vec<String>,
}

impl FromRecord for User {
    const RECORD_TYPE: &'static str = "users";

    fn from_record(record: &GenericRecord) -> Result<Self> {
        Ok(Self {
            common: CommonFields::from_record(Self::RECORD_TYPE, record)?,
            username: required(Self::RECORD_TYPE, record, "username")?,
            user_ids: list(record, &["userIds"]),
            enabled_user: optional(record, "enabledUser"),
            given_name: required(Self::RECORD_TYPE, record, "givenName")?,
            family_name: required(Self::RECORD_TYPE, record, "familyName")?,
            middle_name: optional(record, "middleName"),
            role: required(Self::RECORD_TYPE, record, "role")?,
            identifier: optional(record, "identifier"),
            email: optional(record, "email"),
            sms: optional(record, "sms"),
            phone: optional(record, "phone"),
            agents: list(record, &["agentSourcedIds", "agents"]),
            orgs: list(record, &["orgSourcedIds", "orgs"]),
            grades: list(record, &["grades"]),
        })
    }

    fn into_record(self) -> Record {
        Record::User(self)
    }
}
