//! Property-based tests for the import pipeline.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Directory normalization is idempotent and ends with one separator
//! - Manifest detection keeps exactly the present `file.` entries
//! - Record building trims every header and data field
//! - Merging empty overrides leaves options unchanged

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use rosterload::io::{ManifestResolver, RawFields, RecordBuilder};
use rosterload::{
    BaseDirectory, CsvControl, ImportOptions, ImportResult, ManifestEntry, OptionOverrides,
    Record, RowWidthPolicy,
};

fn padded_field() -> impl Strategy<Value = String> {
    ("[ \t]{0,3}", "[a-zA-Z0-9_,.-]{0,8}", "[ \t]{0,3}")
        .prop_map(|(lead, body, trail)| format!("{lead}{body}{trail}"))
}

fn manifest_entry() -> impl Strategy<Value = (String, String)> {
    (
        prop::sample::select(vec![
            "file.users",
            "file.orgs",
            "file.classes",
            "vendor.file.extra",
            "manifest.version",
            "oneroster.version",
            "source.systemName",
        ]),
        prop::sample::select(vec!["bulk", "delta", "absent", "Absent", "", "1.0"]),
    )
        .prop_map(|(k, v)| (k.to_string(), v.to_string()))
}

proptest! {
    /// Property: normalizing twice equals normalizing once.
    #[test]
    fn prop_base_directory_idempotent(path in "[a-zA-Z0-9_./\\\\-]{0,30}") {
        let once = BaseDirectory::new(&path);
        let twice = BaseDirectory::new(once.as_path());
        prop_assert_eq!(&once, &twice);

        let raw = once.as_path().to_string_lossy().into_owned();
        prop_assert!(raw.ends_with('/') || raw.ends_with('\\'));
        prop_assert!(raw.starts_with(&path));
    }

    /// Property: derived data files are `<base><type>.csv`.
    #[test]
    fn prop_data_file_appends_name(dir in "[a-z/]{0,12}", record_type in "[a-zA-Z]{1,16}") {
        let base = BaseDirectory::new(&dir);
        let file = base.data_file(&record_type);
        let expected = format!("{}{record_type}.csv", base.as_path().to_string_lossy());
        prop_assert_eq!(file.to_string_lossy().into_owned(), expected);
    }

    /// Property: detection yields the last segment of each present `file.`
    /// entry, in order, duplicates included.
    #[test]
    fn prop_detection_matches_rule(entries in prop::collection::vec(manifest_entry(), 0..12)) {
        let result = ImportResult::new(
            "manifest",
            entries
                .iter()
                .map(|(k, v)| Record::Manifest(ManifestEntry::new(k.clone(), v.clone())))
                .collect(),
        );

        let detected = ManifestResolver::detect_types(&result).unwrap();
        let expected: Vec<String> = entries
            .iter()
            .filter(|(k, v)| k.contains("file.") && v != "absent")
            .map(|(k, _)| k.rsplit('.').next().unwrap().to_string())
            .collect();
        prop_assert_eq!(detected, expected);
    }

    /// Property: every header and data field comes out trimmed.
    #[test]
    fn prop_record_builder_trims(
        rows in prop::collection::vec(prop::collection::vec(padded_field(), 3), 1..6)
    ) {
        let lines = rows.iter().zip(1u64..).map(|(fields, line)| {
            Ok::<_, rosterload::Error>(RawFields { line, fields: fields.clone() })
        });

        let (header, records) = RecordBuilder::new(RowWidthPolicy::Strict)
            .build(lines)
            .unwrap();

        prop_assert_eq!(records.len(), rows.len() - 1);
        for column in header.columns() {
            prop_assert_eq!(column.as_str(), column.trim());
        }
        for record in &records {
            prop_assert_eq!(record.len(), 3);
            for (_, value) in record.iter() {
                prop_assert_eq!(value, value.trim());
            }
        }
    }

    /// Property: lenient building always yields header-width records.
    #[test]
    fn prop_lenient_width_matches_header(
        widths in prop::collection::vec(0usize..6, 1..6),
        header_width in 1usize..5,
    ) {
        let mut lines = vec![Ok::<_, rosterload::Error>(RawFields {
            line: 1,
            fields: (0..header_width).map(|i| format!("c{i}")).collect(),
        })];
        for (width, line) in widths.iter().zip(2u64..) {
            lines.push(Ok(RawFields { line, fields: vec!["v".to_string(); *width] }));
        }

        let (_, records) = RecordBuilder::new(RowWidthPolicy::Lenient).build(lines).unwrap();
        prop_assert_eq!(records.len(), widths.len());
        for record in &records {
            prop_assert_eq!(record.len(), header_width);
        }
    }

    /// Property: empty overrides are the identity; a version override
    /// changes only the version.
    #[test]
    fn prop_merge_identity(version in "v[0-9]\\.[0-9]", delimiter in prop::sample::select(vec![',', ';', '|', '\t'])) {
        let defaults = ImportOptions::default()
            .with_csv_control(CsvControl::default().with_delimiter(delimiter));

        prop_assert_eq!(defaults.merge(&OptionOverrides::default()), defaults.clone());

        let merged = defaults.merge(&OptionOverrides::default().version(version.clone()));
        prop_assert_eq!(merged.version, Some(version));
        prop_assert_eq!(merged.csv_control, defaults.csv_control);
        prop_assert_eq!(merged.row_width, defaults.row_width);
    }
}
