//! Header/data separation and record building.

use crate::io::options::RowWidthPolicy;
use crate::io::reader::RawFields;
use crate::io::traits::{GenericRecord, Header};
use crate::{Error, Result};
use std::path::PathBuf;

/// Builds header-keyed records from parsed lines.
///
/// The first line is always the header; there is no header detection.
/// Every field of every line is trimmed before use.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    policy: RowWidthPolicy,
    source: PathBuf,
}

impl RecordBuilder {
    /// Creates a builder with the given width policy.
    #[must_use]
    pub fn new(policy: RowWidthPolicy) -> Self {
        Self {
            policy,
            source: PathBuf::new(),
        }
    }

    /// Sets the file path reported in errors.
    #[must_use]
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = path.into();
        self
    }

    /// Splits `lines` into a header and data records.
    ///
    /// An empty input yields an empty header and no records.
    ///
    /// # Errors
    ///
    /// Propagates errors from `lines`, and returns [`Error::MalformedRow`]
    /// when a row's width differs from the header under
    /// [`RowWidthPolicy::Strict`].
    pub fn build<I>(&self, lines: I) -> Result<(Header, Vec<GenericRecord>)>
    where
        I: IntoIterator<Item = Result<RawFields>>,
    {
        let mut lines = lines.into_iter();

        let Some(first) = lines.next().transpose()? else {
            return Ok((Header::default(), Vec::new()));
        };
        let header = Header::new(trim_all(first.fields));

        let mut records = Vec::new();
        for raw in lines {
            let raw = raw?;
            let row = trim_all(raw.fields);
            records.push(self.pair(&header, raw.line, row)?);
        }

        Ok((header, records))
    }

    fn pair(&self, header: &Header, line: u64, mut row: Vec<String>) -> Result<GenericRecord> {
        if row.len() != header.len() {
            match self.policy {
                RowWidthPolicy::Strict => {
                    return Err(Error::MalformedRow {
                        path: self.source.clone(),
                        line,
                        reason: format!(
                            "expected {} fields to match the header, found {}",
                            header.len(),
                            row.len()
                        ),
                    });
                },
                RowWidthPolicy::Lenient => row.resize(header.len(), String::new()),
            }
        }

        let fields = header.columns().iter().cloned().zip(row).collect();
        Ok(GenericRecord::new(line, fields))
    }
}

fn trim_all(fields: Vec<String>) -> Vec<String> {
    fields
        .into_iter()
        .map(|f| {
            let trimmed = f.trim();
            if trimmed.len() == f.len() {
                f
            } else {
                trimmed.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(rows: &[&[&str]]) -> Vec<Result<RawFields>> {
        rows.iter()
            .zip(1u64..)
            .map(|(fields, line)| {
                Ok(RawFields {
                    line,
                    fields: fields.iter().map(|f| (*f).to_string()).collect(),
                })
            })
            .collect()
    }

    #[test]
    fn test_first_line_is_header() {
        let (header, records) = RecordBuilder::default()
            .build(lines(&[&["a", "b", "c"], &["1", "2,2", "3"]]))
            .unwrap();
        assert_eq!(header.columns(), ["a", "b", "c"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("b"), Some("2,2"));
        assert_eq!(records[0].line, 2);
    }

    #[test]
    fn test_header_like_data_is_still_header() {
        let (header, records) = RecordBuilder::default()
            .build(lines(&[&["1", "2"], &["3", "4"]]))
            .unwrap();
        assert_eq!(header.columns(), ["1", "2"]);
        assert_eq!(records[0].get("1"), Some("3"));
    }

    #[test]
    fn test_trims_header_and_data() {
        let (header, records) = RecordBuilder::default()
            .build(lines(&[&[" a ", "\tb"], &["  1", "2  "]]))
            .unwrap();
        assert_eq!(header.columns(), ["a", "b"]);
        assert_eq!(records[0].get("a"), Some("1"));
        assert_eq!(records[0].get("b"), Some("2"));
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let (header, records) = RecordBuilder::default()
            .build(lines(&[&["a", "b"]]))
            .unwrap();
        assert_eq!(header.len(), 2);
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let (header, records) = RecordBuilder::default().build(lines(&[])).unwrap();
        assert!(header.is_empty());
        assert!(records.is_empty());
    }

    #[test]
    fn test_strict_rejects_width_mismatch() {
        let err = RecordBuilder::new(RowWidthPolicy::Strict)
            .with_source("users.csv")
            .build(lines(&[&["a", "b"], &["1", "2"], &["3"]]))
            .unwrap_err();
        match err {
            Error::MalformedRow { path, line, reason } => {
                assert_eq!(path, PathBuf::from("users.csv"));
                assert_eq!(line, 3);
                assert!(reason.contains("expected 2"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_pads_and_truncates() {
        let (_, records) = RecordBuilder::new(RowWidthPolicy::Lenient)
            .build(lines(&[&["a", "b"], &["1"], &["2", "3", "extra"]]))
            .unwrap();
        assert_eq!(records[0].get("b"), Some(""));
        assert_eq!(records[1].len(), 2);
        assert_eq!(records[1].get("b"), Some("3"));
    }

    #[test]
    fn test_propagates_line_errors() {
        let input = vec![
            Ok(RawFields {
                line: 1,
                fields: vec!["a".into()],
            }),
            Err(Error::Configuration("boom".into())),
        ];
        assert!(RecordBuilder::default().build(input).is_err());
    }
}
