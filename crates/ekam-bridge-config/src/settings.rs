//! Read-only snapshot of host-provided settings.
//!
//! Editors deliver configuration as JSON objects grouped by namespace (the
//! shape of a `workspace/configuration` payload). The host integration layer
//! populates one [`SettingsStore`] at startup and passes it into activation;
//! nothing in this repository mutates it afterwards.

use std::collections::BTreeMap;

use serde_json::Value;

/// Namespaced settings sections as delivered by the host.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    sections: BTreeMap<String, Value>,
}

impl SettingsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from `(namespace, section)` pairs.
    #[must_use]
    pub fn from_sections<I, K>(sections: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            sections: sections
                .into_iter()
                .map(|(namespace, section)| (namespace.into(), section))
                .collect(),
        }
    }

    /// Stores a section under its namespace, replacing any previous value.
    ///
    /// Intended for the host integration layer while assembling the snapshot.
    pub fn insert_section(&mut self, namespace: impl Into<String>, section: Value) {
        self.sections.insert(namespace.into(), section);
    }

    /// Returns the raw section for a namespace, when present.
    #[must_use]
    pub fn section(&self, namespace: &str) -> Option<&Value> {
        self.sections.get(namespace)
    }

    /// Returns `true` when no sections have been provided.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
