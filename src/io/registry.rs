//! Importer lookup by format version and record type.

use crate::io::importers;
use crate::io::options::DEFAULT_VERSION;
use crate::io::traits::Importer;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Maps `(version, record type)` to an [`Importer`].
///
/// Versions are independent: registering `users` under `v1.2` has no effect
/// on lookups under `v1.1`.
#[derive(Default, Clone)]
pub struct ImporterRegistry {
    importers: HashMap<String, HashMap<String, Arc<dyn Importer>>>,
}

impl ImporterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in importers for
    /// [`DEFAULT_VERSION`].
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        importers::register_builtin(&mut registry, DEFAULT_VERSION);
        registry
    }

    /// Registers an importer under `version` and its own record type.
    ///
    /// Returns the importer previously registered for the same pair.
    pub fn register(
        &mut self,
        version: impl Into<String>,
        importer: Arc<dyn Importer>,
    ) -> Option<Arc<dyn Importer>> {
        let record_type = importer.record_type().to_string();
        self.importers
            .entry(version.into())
            .or_default()
            .insert(record_type, importer)
    }

    /// Looks up the importer for a pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] if the version is unknown or has no
    /// importer for `record_type`.
    pub fn resolve(&self, version: &str, record_type: &str) -> Result<Arc<dyn Importer>> {
        self.importers
            .get(version)
            .and_then(|by_type| by_type.get(record_type))
            .cloned()
            .ok_or_else(|| Error::UnknownType {
                version: version.to_string(),
                record_type: record_type.to_string(),
            })
    }

    /// Returns the registered versions, sorted.
    #[must_use]
    pub fn versions(&self) -> Vec<&str> {
        let mut versions: Vec<_> = self.importers.keys().map(String::as_str).collect();
        versions.sort_unstable();
        versions
    }

    /// Returns the record types registered under `version`, sorted.
    #[must_use]
    pub fn record_types(&self, version: &str) -> Vec<&str> {
        let mut types: Vec<_> = self
            .importers
            .get(version)
            .map(|by_type| by_type.keys().map(String::as_str).collect())
            .unwrap_or_default();
        types.sort_unstable();
        types
    }
}

impl fmt::Debug for ImporterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for version in self.versions() {
            map.entry(&version, &self.record_types(version));
        }
        map.finish()
    }
}
