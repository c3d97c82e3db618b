//! Locale dictionaries: key → string maps serialized as flat JSON objects.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{L10nError, Result};

/// Mapping from locale key to string for one locale.
///
/// Entries keep insertion order, so a dictionary built from sorted strings
/// serializes the same way every time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleDictionary {
    entries: IndexMap<String, String>,
}

impl LocaleDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dictionary file. `locale` is only used for error reporting.
    pub fn from_json(locale: &str, bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|source| L10nError::Json {
            locale: locale.to_string(),
            source,
        })
    }

    /// Pretty JSON with 2-space indentation and a trailing newline.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries).map(|json| format!("{}\n", json))
    }

    /// Insert or overwrite; returns the previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.entries.values_mut()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
