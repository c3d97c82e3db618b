use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        DelimiterPair, EnforcementMode, HashAlgorithm, Keyer, SearchBy, Selector, Simulator,
        Strategy, default_delimiters, default_key_delimiters, default_simulated_locales,
        default_substitution_table, digest::DEFAULT_HASH_LENGTH, store::DEFAULT_CACHE_ID,
    },
    error::L10nError,
};

pub const CONFIG_FILE_NAME: &str = ".l10nrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Tags whose inner content is translatable.
    #[serde(default = "default_elements")]
    pub elements: Vec<String>,
    /// Attributes whose value is translatable on any tag.
    #[serde(default = "default_attributes")]
    pub attributes: Vec<String>,
    /// Marker attributes making a tag's inner content translatable.
    #[serde(default = "default_directives")]
    pub directives: Vec<String>,
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,
    #[serde(default = "default_hash_length")]
    pub hash_length: usize,
    #[serde(default = "default_native_locale")]
    pub native_locale: String,

    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_locales_dir")]
    pub locales_dir: String,
    /// Where localized copies are written. Defaults to `sourceRoot`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,

    #[serde(default = "default_cache_id")]
    pub cache_id: String,
    #[serde(default)]
    pub enforce: EnforcementMode,

    #[serde(default)]
    pub search_by: SearchBy,
    #[serde(default = "default_delimiters")]
    pub delimiters: Vec<DelimiterPair>,
    #[serde(default = "default_key_delimiters")]
    pub key_delimiters: DelimiterPair,
    #[serde(default)]
    pub localize_links: bool,

    #[serde(default)]
    pub simulate: SimulateConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateConfig {
    #[serde(default = "default_simulated_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_substitution_table")]
    pub dictionary: IndexMap<String, String>,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            locales: default_simulated_locales(),
            dictionary: default_substitution_table(),
        }
    }
}

fn default_elements() -> Vec<String> {
    ["title", "p", "h1", "h2", "h3", "h4", "h5", "h6"]
        .map(String::from)
        .to_vec()
}

fn default_attributes() -> Vec<String> {
    ["alt", "title"].map(String::from).to_vec()
}

fn default_directives() -> Vec<String> {
    vec!["localize".to_string()]
}

fn default_hash_length() -> usize {
    DEFAULT_HASH_LENGTH
}

fn default_native_locale() -> String {
    "en".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["**/*.html".to_string()]
}

fn default_locales_dir() -> String {
    "./locales".to_string()
}

fn default_cache_id() -> String {
    DEFAULT_CACHE_ID.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            elements: default_elements(),
            attributes: default_attributes(),
            directives: default_directives(),
            hash_algorithm: HashAlgorithm::default(),
            hash_length: default_hash_length(),
            native_locale: default_native_locale(),
            source_root: default_source_root(),
            includes: default_includes(),
            ignores: Vec::new(),
            locales_dir: default_locales_dir(),
            out_dir: None,
            cache_id: default_cache_id(),
            enforce: EnforcementMode::default(),
            search_by: SearchBy::default(),
            delimiters: default_delimiters(),
            key_delimiters: default_key_delimiters(),
            localize_links: false,
            simulate: SimulateConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Everything that would otherwise fail halfway through a run is checked
    /// here: glob patterns, hash length, delimiters, and required ids.
    pub fn validate(&self) -> Result<(), L10nError> {
        for (field, patterns) in [("ignores", &self.ignores), ("includes", &self.includes)] {
            for pattern in patterns {
                Pattern::new(pattern).map_err(|e| {
                    L10nError::config(format!(
                        "invalid glob pattern in '{}': \"{}\" ({})",
                        field, pattern, e
                    ))
                })?;
            }
        }

        self.keyer()?;
        self.strategy()?;

        if self.native_locale.trim().is_empty() {
            return Err(L10nError::config("'nativeLocale' must not be empty"));
        }
        if self.cache_id.trim().is_empty() {
            return Err(L10nError::config("'cacheId' must not be empty"));
        }
        if self
            .delimiters
            .iter()
            .any(|pair| pair.open.is_empty() || pair.close.is_empty())
        {
            return Err(L10nError::config("'delimiters' must not contain empty strings"));
        }

        Ok(())
    }

    pub fn selector(&self) -> Selector {
        Selector::new(&self.elements, &self.attributes, &self.directives)
    }

    pub fn keyer(&self) -> Result<Keyer, L10nError> {
        Keyer::new(self.hash_algorithm, self.hash_length)
    }

    pub fn strategy(&self) -> Result<Strategy, L10nError> {
        match self.search_by {
            SearchBy::Hash => Strategy::hash(self.delimiters.clone()),
            SearchBy::Key => Strategy::key(&self.key_delimiters),
        }
    }

    pub fn simulator(&self) -> Simulator {
        Simulator::new(
            self.simulate.locales.clone(),
            self.simulate.dictionary.clone(),
        )
    }

    pub fn out_dir(&self) -> &str {
        self.out_dir.as_deref().unwrap_or(&self.source_root)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
