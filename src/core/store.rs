//! Locale store: named caches of locale dictionaries.
//!
//! A [`LocaleStore`] is an owned value; create one per pipeline run and pass
//! it to the substitutor and enforcer. Independent pipelines in the same
//! store are kept apart by cache id.

use std::{collections::HashMap, fmt, path::Path, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    core::dictionary::LocaleDictionary,
    error::{L10nError, Result},
};

pub const DEFAULT_CACHE_ID: &str = "default";

/// How missing translations are treated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementMode {
    Silent,
    #[default]
    Warn,
    Strict,
}

impl fmt::Display for EnforcementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnforcementMode::Silent => write!(f, "silent"),
            EnforcementMode::Warn => write!(f, "warn"),
            EnforcementMode::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for EnforcementMode {
    type Err = L10nError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "silent" => Ok(EnforcementMode::Silent),
            "warn" => Ok(EnforcementMode::Warn),
            "strict" => Ok(EnforcementMode::Strict),
            other => Err(L10nError::config(format!(
                "enforcement mode must be one of silent, warn, strict (got '{}')",
                other
            ))),
        }
    }
}

/// One pipeline's locales: the native id plus every loaded dictionary,
/// in load order.
#[derive(Debug, Clone)]
pub struct LocaleCache {
    native: String,
    enforcement: EnforcementMode,
    locales: IndexMap<String, LocaleDictionary>,
}

impl LocaleCache {
    fn new(native: String, enforcement: EnforcementMode) -> Self {
        Self {
            native,
            enforcement,
            locales: IndexMap::new(),
        }
    }

    pub fn native_id(&self) -> &str {
        &self.native
    }

    pub fn enforcement(&self) -> EnforcementMode {
        self.enforcement
    }

    /// The native dictionary, or an empty one if it was never loaded.
    pub fn native_dictionary(&self) -> &LocaleDictionary {
        static EMPTY: std::sync::OnceLock<LocaleDictionary> = std::sync::OnceLock::new();
        self.locales
            .get(&self.native)
            .unwrap_or_else(|| EMPTY.get_or_init(LocaleDictionary::new))
    }

    pub fn locale(&self, id: &str) -> Option<&LocaleDictionary> {
        self.locales.get(id)
    }

    /// Every loaded locale id, native included, in load order.
    pub fn locale_ids(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Non-native locales in load order.
    pub fn targets(&self) -> impl Iterator<Item = (&str, &LocaleDictionary)> {
        self.locales
            .iter()
            .filter(|(id, _)| **id != self.native)
            .map(|(id, dict)| (id.as_str(), dict))
    }
}

#[derive(Debug, Default)]
pub struct LocaleStore {
    caches: HashMap<String, LocaleCache>,
}

impl LocaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset `cache_id` with a native locale and enforcement mode name.
    pub fn configure(&mut self, cache_id: &str, native: &str, enforce: &str) -> Result<()> {
        let mode = enforce.parse()?;
        self.configure_with(cache_id, native, mode)
    }

    pub fn configure_with(
        &mut self,
        cache_id: &str,
        native: &str,
        enforcement: EnforcementMode,
    ) -> Result<()> {
        if native.trim().is_empty() {
            return Err(L10nError::config("native locale id must not be empty"));
        }
        debug!(cache_id, native, %enforcement, "configured locale cache");
        self.caches.insert(
            cache_id.to_string(),
            LocaleCache::new(native.to_string(), enforcement),
        );
        Ok(())
    }

    /// Insert or replace one locale's dictionary.
    pub fn load_locale(
        &mut self,
        cache_id: &str,
        locale_id: &str,
        dictionary: LocaleDictionary,
    ) -> Result<()> {
        let cache = self
            .caches
            .get_mut(cache_id)
            .ok_or_else(|| L10nError::Load(cache_id.to_string()))?;
        debug!(cache_id, locale_id, entries = dictionary.len(), "loaded locale");
        cache.locales.insert(locale_id.to_string(), dictionary);
        Ok(())
    }

    /// Parse a dictionary file's bytes and load it.
    pub fn load_locale_json(&mut self, cache_id: &str, locale_id: &str, bytes: &[u8]) -> Result<()> {
        if !self.caches.contains_key(cache_id) {
            return Err(L10nError::Load(cache_id.to_string()));
        }
        let dictionary = LocaleDictionary::from_json(locale_id, bytes)?;
        self.load_locale(cache_id, locale_id, dictionary)
    }

    pub fn get_cache(&self, cache_id: &str) -> Result<&LocaleCache> {
        self.caches
            .get(cache_id)
            .ok_or_else(|| L10nError::Load(cache_id.to_string()))
    }
}

/// Locale id for a dictionary file: its base name without extension.
///
/// - "en.json" -> Some("en")
/// - "locales/zh-CN.json" -> Some("zh-CN")
pub fn locale_id_from_path(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
