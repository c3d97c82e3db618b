//! Filesystem side of the pipeline: finding documents and loading locale
//! dictionary files into a [`LocaleStore`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::core::store::{LocaleStore, locale_id_from_path};

/// Collect document paths under `root` whose root-relative path matches one
/// of `includes` and none of `ignores`. Anything below `excluded` is skipped.
/// Returned paths are sorted.
pub fn scan_documents(
    root: &Path,
    includes: &[String],
    ignores: &[String],
    excluded: &[PathBuf],
    verbose: bool,
) -> Result<Vec<PathBuf>> {
    let compile = |patterns: &[String]| -> Result<Vec<Pattern>> {
        patterns
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("Invalid glob pattern: \"{}\"", p)))
            .collect()
    };
    let includes = compile(includes)?;
    let ignores = compile(ignores)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || excluded.iter().any(|dir| path.starts_with(dir)) {
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let relative = relative.to_string_lossy();
        if includes.iter().any(|p| p.matches(&relative))
            && !ignores.iter().any(|p| p.matches(&relative))
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Dictionary files (`*.json`) in `dir`, sorted by file name.
pub fn locale_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!(
            "Locales directory '{}' does not exist.\n\
             Hint: Run `l10n extract` first or check the 'localesDir' setting.",
            dir.display()
        );
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Configure `cache_id` and load every dictionary in `dir`: the native
/// locale first, then the rest in file-name order.
///
/// Returns the number of locale files loaded.
pub fn load_locales_dir(
    store: &mut LocaleStore,
    cache_id: &str,
    native: &str,
    dir: &Path,
) -> Result<usize> {
    let files = locale_files(dir)?;
    let (natives, targets): (Vec<_>, Vec<_>) = files
        .into_iter()
        .partition(|path| locale_id_from_path(path).as_deref() == Some(native));

    if natives.is_empty() {
        bail!(
            "Native locale file '{}.json' not found in '{}'.\n\
             Hint: Run `l10n extract` first.",
            native,
            dir.display()
        );
    }

    let mut loaded = 0;
    for path in natives.iter().chain(targets.iter()) {
        let Some(locale) = locale_id_from_path(path) else {
            continue;
        };
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        store
            .load_locale_json(cache_id, &locale, &bytes)
            .with_context(|| format!("Failed to load locale file: {}", path.display()))?;
        loaded += 1;
    }
    Ok(loaded)
}

/// Write a file, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write file: {}", path.display()))
}
