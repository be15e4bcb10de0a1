//! Record type detection from `manifest.csv`.

use crate::io::traits::ImportResult;
use crate::models::{ManifestEntry, Record};
use crate::{Error, Result};
use serde::Serialize;

const FILE_MARKER: &str = "file.";
const ABSENT: &str = "absent";

/// Derives the record types present in a dataset from its manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestResolver;

impl ManifestResolver {
    /// Returns the record types the manifest declares present, in manifest
    /// order.
    ///
    /// An entry counts when its property name contains `file.` anywhere and
    /// its value is not exactly `absent`. The type is the last `.`-separated
    /// segment of the property name. Duplicates are kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestField`] if `manifest` holds anything other
    /// than manifest entries, naming the offending record's kind and line.
    pub fn detect_types(manifest: &ImportResult) -> Result<Vec<String>> {
        let mut types = Vec::new();
        for record in manifest {
            let entry = as_entry(record)?;
            if let Some(record_type) = present_type(entry) {
                types.push(record_type.to_string());
            }
        }
        Ok(types)
    }
}

fn present_type(entry: &ManifestEntry) -> Option<&str> {
    if !entry.property_name.contains(FILE_MARKER) || entry.value == ABSENT {
        return None;
    }
    entry.property_name.rsplit('.').next()
}

// Line 0 means the record carries no source line.
fn as_entry(record: &Record) -> Result<&ManifestEntry> {
    record.as_manifest().ok_or_else(|| Error::ManifestField {
        line: record.line().unwrap_or(0),
        field: format!("propertyName (found a {} record)", record.kind()),
    })
}

/// Version properties reported by a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestSummary {
    /// `manifest.version`, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_version: Option<String>,
    /// `oneroster.version`, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oneroster_version: Option<String>,
}

impl ManifestSummary {
    /// Collects the version properties; later rows win.
    #[must_use]
    pub fn from_result(manifest: &ImportResult) -> Self {
        let mut summary = Self::default();
        for entry in manifest.iter().filter_map(Record::as_manifest) {
            match entry.property_name.as_str() {
                "manifest.version" => summary.manifest_version = Some(entry.value.clone()),
                "oneroster.version" => summary.oneroster_version = Some(entry.value.clone()),
                _ => {},
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::GenericRecord;

    fn manifest(entries: &[(&str, &str)]) -> ImportResult {
        ImportResult::new(
            "manifest",
            entries
                .iter()
                .map(|(k, v)| Record::Manifest(ManifestEntry::new(*k, *v)))
                .collect(),
        )
    }

    #[test]
    fn test_detects_present_files_only() {
        let types = ManifestResolver::detect_types(&manifest(&[
            ("file.users", "present"),
            ("file.classes", "absent"),
            ("other.x", "present"),
        ]))
        .unwrap();
        assert_eq!(types, vec!["users"]);
    }

    #[test]
    fn test_marker_may_appear_anywhere() {
        let types = ManifestResolver::detect_types(&manifest(&[
            ("vendor.file.demographics", "bulk"),
            ("file.", "bulk"),
        ]))
        .unwrap();
        assert_eq!(types, vec!["demographics", ""]);
    }

    #[test]
    fn test_absent_is_case_sensitive() {
        let types = ManifestResolver::detect_types(&manifest(&[
            ("file.orgs", "Absent"),
            ("file.users", ""),
        ]))
        .unwrap();
        assert_eq!(types, vec!["orgs", "users"]);
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let types = ManifestResolver::detect_types(&manifest(&[
            ("file.users", "bulk"),
            ("file.orgs", "bulk"),
            ("file.users", "delta"),
        ]))
        .unwrap();
        assert_eq!(types, vec!["users", "orgs", "users"]);
    }

    #[test]
    fn test_non_manifest_record_is_rejected() {
        let result = ImportResult::new(
            "manifest",
            vec![
                Record::Manifest(ManifestEntry::new("file.users", "bulk").with_line(2)),
                // A quoted multi-line value above pushes this row to line 5.
                Record::Generic(GenericRecord::new(5, Vec::new())),
            ],
        );
        let err = ManifestResolver::detect_types(&result).unwrap_err();
        assert_eq!(
            err.to_string(),
            "manifest line 5: missing required field 'propertyName (found a generic record)'"
        );
    }

    #[test]
    fn test_non_manifest_record_without_line() {
        let org = crate::models::Org {
            common: crate::models::CommonFields {
                sourced_id: "org-1".to_string(),
                status: None,
                date_last_modified: None,
            },
            name: "District".to_string(),
            org_type: "district".to_string(),
            identifier: None,
            parent: None,
            children: Vec::new(),
        };
        let result = ImportResult::new("manifest", vec![Record::Org(org)]);
        let err = ManifestResolver::detect_types(&result).unwrap_err();
        assert!(matches!(
            err,
            Error::ManifestField { line: 0, ref field } if field.contains("org record")
        ));
    }

    #[test]
    fn test_summary_versions() {
        let summary = ManifestSummary::from_result(&manifest(&[
            ("manifest.version", "1.0"),
            ("oneroster.version", "1.1"),
            ("file.users", "bulk"),
        ]));
        assert_eq!(summary.manifest_version.as_deref(), Some("1.0"));
        assert_eq!(summary.oneroster_version.as_deref(), Some("1.1"));
        assert_eq!(ManifestSummary::default(), ManifestSummary::from_result(&manifest(&[])));
    }
}
