//! `manifest.csv` entries.
//!
//! The manifest lists which files a dataset contains and whether each is
//! processed in `bulk` or `delta` mode, or is `absent`.

use serde::Serialize;

/// A manifest row: one `propertyName` / `value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Property name, e.g. `file.users` or `manifest.version`.
    pub property_name: String,
    /// Property value, e.g. `bulk`, `absent`, `1.0`.
    pub value: String,
    /// 1-based line in `manifest.csv`; 0 when built by hand.
    #[serde(skip)]
    pub line: u64,
}

impl ManifestEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(property_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            value: value.into(),
            line: 0,
        }
    }

    /// Sets the source line.
    #[must_use]
    pub const fn with_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    /// Classifies the value as a file processing mode.
    #[must_use]
    pub fn processing_mode(&self) -> ProcessingMode {
        match self.value.as_str() {
            "bulk" => ProcessingMode::Bulk,
            "delta" => ProcessingMode::Delta,
            "absent" => ProcessingMode::Absent,
            other => ProcessingMode::Other(other.to_string()),
        }
    }
}

/// Processing mode declared for a manifest file entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// Full snapshot.
    Bulk,
    /// Changes since the previous export.
    Delta,
    /// File not included.
    Absent,
    /// Anything else; still counts as present.
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_mode() {
        assert_eq!(
            ManifestEntry::new("file.orgs", "bulk").processing_mode(),
            ProcessingMode::Bulk
        );
        assert_eq!(
            ManifestEntry::new("file.users", "delta").processing_mode(),
            ProcessingMode::Delta
        );
        assert_eq!(
            ManifestEntry::new("file.classes", "absent").processing_mode(),
            ProcessingMode::Absent
        );
        // Case-sensitive, same as type detection.
        assert_eq!(
            ManifestEntry::new("file.classes", "Absent").processing_mode(),
            ProcessingMode::Other("Absent".to_string())
        );
    }
}
