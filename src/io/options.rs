//! Import options: defaults, per-call overrides, and validation.
//!
//! Options are never mutated in place. Each import call merges its
//! [`OptionOverrides`] onto the service defaults, producing a fresh
//! [`ImportOptions`], and validates the result into [`ResolvedOptions`]
//! before any file is touched.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Format version used when none is configured.
pub const DEFAULT_VERSION: &str = "v1.1";

/// Delimited-text control characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvControl {
    /// Field separator.
    pub delimiter: char,
    /// Quote (enclosure) character.
    pub quote: char,
    /// Escape character for quotes inside quoted fields.
    pub escape: char,
}

impl Default for CsvControl {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            escape: '\\',
        }
    }
}

impl CsvControl {
    /// Sets the delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the quote character.
    #[must_use]
    pub const fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Sets the escape character.
    #[must_use]
    pub const fn with_escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    /// Returns the controls as bytes for the CSV parser.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if any control is not a single-byte
    /// ASCII character.
    pub fn as_bytes(&self) -> Result<(u8, u8, u8)> {
        Ok((
            ascii_byte("delimiter", self.delimiter)?,
            ascii_byte("quote", self.quote)?,
            ascii_byte("escape", self.escape)?,
        ))
    }
}

fn ascii_byte(name: &str, c: char) -> Result<u8> {
    u8::try_from(c)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            Error::Configuration(format!(
                "csvControl.{name} must be a single ASCII character, got {c:?}"
            ))
        })
}

/// How rows whose width differs from the header are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowWidthPolicy {
    /// Reject the row with [`Error::MalformedRow`].
    #[default]
    Strict,
    /// Pad missing trailing fields with empty strings, drop extra fields.
    Lenient,
}

/// Import options before validation.
///
/// Both `version` and `csv_control` are optional here so that overrides can
/// clear them; [`ImportOptions::resolve`] enforces that they are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportOptions {
    /// Format version selecting the importer set.
    pub version: Option<String>,
    /// Delimited-text controls.
    pub csv_control: Option<CsvControl>,
    /// Row width mismatch handling.
    pub row_width: RowWidthPolicy,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            version: Some(DEFAULT_VERSION.to_string()),
            csv_control: Some(CsvControl::default()),
            row_width: RowWidthPolicy::Strict,
        }
    }
}

impl ImportOptions {
    /// Creates options with no version and no csv controls.
    ///
    /// Such options fail validation until both are supplied.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            version: None,
            csv_control: None,
            row_width: RowWidthPolicy::Strict,
        }
    }

    /// Sets the format version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the csv controls.
    #[must_use]
    pub const fn with_csv_control(mut self, control: CsvControl) -> Self {
        self.csv_control = Some(control);
        self
    }

    /// Sets the row width policy.
    #[must_use]
    pub const fn with_row_width(mut self, policy: RowWidthPolicy) -> Self {
        self.row_width = policy;
        self
    }

    /// Returns a new value with `overrides` applied on top of `self`.
    ///
    /// The merge is shallow: a `csv_control` override replaces all three
    /// control characters at once.
    #[must_use]
    pub fn merge(&self, overrides: &OptionOverrides) -> Self {
        Self {
            version: overrides.version.apply(self.version.as_ref()),
            csv_control: overrides.csv_control.apply(self.csv_control.as_ref()),
            row_width: overrides.row_width.unwrap_or(self.row_width),
        }
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the version is missing or empty,
    /// if csv controls are missing, or if a control is not ASCII.
    pub fn resolve(&self) -> Result<ResolvedOptions> {
        let version = self
            .version
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Configuration("version should be specified as option".into()))?;

        let csv_control = self
            .csv_control
            .ok_or_else(|| Error::Configuration("csvControl should be specified as option".into()))?;
        csv_control.as_bytes()?;

        Ok(ResolvedOptions {
            version: version.to_string(),
            csv_control,
            row_width: self.row_width,
        })
    }
}

/// A single overridable setting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Override<T> {
    /// Inherit the default.
    #[default]
    Keep,
    /// Replace the default.
    Set(T),
    /// Remove the default, leaving the setting unset.
    Clear,
}

impl<T: Clone> Override<T> {
    fn apply(&self, base: Option<&T>) -> Option<T> {
        match self {
            Self::Keep => base.cloned(),
            Self::Set(value) => Some(value.clone()),
            Self::Clear => None,
        }
    }
}

/// Per-call overrides merged onto the service defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionOverrides {
    /// Format version override.
    pub version: Override<String>,
    /// Csv controls override.
    pub csv_control: Override<CsvControl>,
    /// Row width policy override.
    pub row_width: Option<RowWidthPolicy>,
}

impl OptionOverrides {
    /// Overrides the version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Override::Set(version.into());
        self
    }

    /// Overrides the csv controls.
    #[must_use]
    pub const fn csv_control(mut self, control: CsvControl) -> Self {
        self.csv_control = Override::Set(control);
        self
    }

    /// Overrides the row width policy.
    #[must_use]
    pub const fn row_width(mut self, policy: RowWidthPolicy) -> Self {
        self.row_width = Some(policy);
        self
    }

    /// Clears the version, whatever the defaults say.
    #[must_use]
    pub fn clear_version(mut self) -> Self {
        self.version = Override::Clear;
        self
    }

    /// Clears the csv controls, whatever the defaults say.
    #[must_use]
    pub fn clear_csv_control(mut self) -> Self {
        self.csv_control = Override::Clear;
        self
    }
}

/// Validated options for one import call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Format version.
    pub version: String,
    /// Delimited-text controls, known to be ASCII.
    pub csv_control: CsvControl,
    /// Row width mismatch handling.
    pub row_width: RowWidthPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_defaults() {
        let options = ImportOptions::default();
        assert_eq!(options.version.as_deref(), Some("v1.1"));
        let control = options.csv_control.unwrap();
        assert_eq!(control.delimiter, ',');
        assert_eq!(control.quote, '"');
        assert_eq!(control.escape, '\\');
        assert_eq!(options.row_width, RowWidthPolicy::Strict);
    }

    #[test]
    fn test_merge_empty_overrides_is_identity() {
        let defaults = ImportOptions::default();
        let merged = defaults.merge(&OptionOverrides::default());
        assert_eq!(merged, defaults);
    }

    #[test]
    fn test_merge_version_only() {
        let defaults = ImportOptions::default();
        let merged = defaults.merge(&OptionOverrides::default().version("v2"));
        assert_eq!(merged.version.as_deref(), Some("v2"));
        assert_eq!(merged.csv_control, Some(CsvControl::default()));
        // Defaults are untouched.
        assert_eq!(defaults.version.as_deref(), Some("v1.1"));
    }

    #[test]
    fn test_merge_csv_control_replaces_whole_group() {
        let defaults = ImportOptions::default();
        let control = CsvControl::default().with_delimiter(';');
        let merged = defaults.merge(&OptionOverrides::default().csv_control(control));
        assert_eq!(merged.csv_control, Some(control));
    }

    #[test]
    fn test_cleared_csv_control_fails_validation() {
        let merged = ImportOptions::default().merge(&OptionOverrides::default().clear_csv_control());
        let err = merged.resolve().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("csvControl"));
    }

    #[test_case(None ; "missing")]
    #[test_case(Some("") ; "empty")]
    #[test_case(Some("   ") ; "blank")]
    fn test_invalid_version_fails_validation(version: Option<&str>) {
        let options = ImportOptions {
            version: version.map(String::from),
            ..ImportOptions::default()
        };
        let err = options.resolve().unwrap_err();
        assert!(matches!(err, Error::Configuration(ref msg) if msg.contains("version")));
    }

    #[test]
    fn test_empty_options_need_both_fields() {
        assert!(ImportOptions::empty().resolve().is_err());
        assert!(ImportOptions::empty().with_version("v1.1").resolve().is_err());
        let resolved = ImportOptions::empty()
            .with_version("v1.1")
            .with_csv_control(CsvControl::default())
            .resolve()
            .unwrap();
        assert_eq!(resolved.version, "v1.1");
    }

    #[test_case('\u{e9}' ; "latin")]
    #[test_case('\u{2192}' ; "arrow")]
    fn test_non_ascii_control_rejected(c: char) {
        let options = ImportOptions::default()
            .with_csv_control(CsvControl::default().with_delimiter(c));
        let err = options.resolve().unwrap_err();
        assert!(err.to_string().contains("delimiter"));
    }

    #[test]
    fn test_deserialize_partial_options() {
        let options: ImportOptions = toml::from_str(
            r#"
version = "v1.2"
rowWidth = "lenient"

[csvControl]
delimiter = "|"
"#,
        )
        .unwrap();
        assert_eq!(options.version.as_deref(), Some("v1.2"));
        assert_eq!(options.row_width, RowWidthPolicy::Lenient);
        let control = options.csv_control.unwrap();
        assert_eq!(control.delimiter, '|');
        assert_eq!(control.quote, '"');
    }
}
