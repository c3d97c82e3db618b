use std::path::{Component, Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use super::args::CommonArgs;
use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        LocaleStore,
        files::{load_locales_dir, locale_files, scan_documents},
        store::locale_id_from_path,
    },
};

/// Configuration and resolved paths for one command run.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (e.g., `--native-locale en`)
/// 2. `.l10nrc.json` config file
/// 3. Built-in defaults
pub struct RunContext {
    pub config: Config,
    /// Project root; relative config paths resolve against it.
    pub root_dir: PathBuf,
    pub verbose: bool,
}

impl RunContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        Self::with_root(PathBuf::from("."), common_args)
    }

    pub fn with_root(root_dir: PathBuf, common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let config_result = load_config(&root_dir)?;

        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let mut config = config_result.config;
        if let Some(ref native_locale) = common_args.native_locale {
            config.native_locale = native_locale.clone();
        }
        if let Some(ref source_root) = common_args.source_root {
            config.source_root = source_root.to_string_lossy().to_string();
        }
        if let Some(ref locales_dir) = common_args.locales_dir {
            config.locales_dir = locales_dir.to_string_lossy().to_string();
        }
        config.validate()?;

        debug!(root = %root_dir.display(), native = %config.native_locale, "loaded configuration");
        Ok(Self {
            config,
            root_dir,
            verbose,
        })
    }

    /// Resolve a config path against the project root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            return p.to_path_buf();
        }
        let rel: PathBuf = p
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        if rel.as_os_str().is_empty() {
            return self.root_dir.clone();
        }
        self.root_dir.join(rel)
    }

    pub fn source_root(&self) -> PathBuf {
        self.resolve(&self.config.source_root)
    }

    pub fn locales_dir(&self) -> PathBuf {
        self.resolve(&self.config.locales_dir)
    }

    pub fn out_dir(&self) -> PathBuf {
        self.resolve(self.config.out_dir())
    }

    pub fn native_locale_path(&self) -> PathBuf {
        self.locales_dir()
            .join(format!("{}.json", self.config.native_locale))
    }

    /// Ids of the target locales that have a dictionary file.
    pub fn target_locale_ids(&self) -> Vec<String> {
        let Ok(files) = locale_files(&self.locales_dir()) else {
            return Vec::new();
        };
        files
            .iter()
            .filter_map(locale_id_from_path)
            .filter(|id| *id != self.config.native_locale)
            .collect()
    }

    /// Documents to process. Previously localized copies are skipped so they
    /// are never extracted or localized again.
    pub fn documents(&self) -> Result<Vec<PathBuf>> {
        let out_dir = self.out_dir();
        let mut excluded: Vec<PathBuf> = self
            .target_locale_ids()
            .iter()
            .map(|locale| out_dir.join(locale))
            .collect();
        excluded.push(self.locales_dir());

        scan_documents(
            &self.source_root(),
            &self.config.includes,
            &self.config.ignores,
            &excluded,
            self.verbose,
        )
    }

    /// A store with the configured cache and every dictionary loaded.
    /// Returns the store and the number of locale files read.
    pub fn load_store(&self) -> Result<(LocaleStore, usize)> {
        let mut store = LocaleStore::new();
        store.configure_with(
            &self.config.cache_id,
            &self.config.native_locale,
            self.config.enforce,
        )?;
        let loaded = load_locales_dir(
            &mut store,
            &self.config.cache_id,
            &self.config.native_locale,
            &self.locales_dir(),
        )?;
        Ok((store, loaded))
    }
}
