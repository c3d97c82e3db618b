//! Translation completeness enforcement.
//!
//! Every non-native locale is diffed against the native dictionary. What
//! happens with the gaps depends on the cache's [`EnforcementMode`]:
//!
//! - `silent`: nothing is computed
//! - `warn`: each gap is printed as a warning
//! - `strict`: each gap is printed as an error, and the run fails once the
//!   whole scan is done

use std::io::{self, Write};

use colored::Colorize;

use crate::{
    core::store::{EnforcementMode, LocaleCache, LocaleStore},
    error::{L10nError, Result},
};

/// A native key absent from a target locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingEntry {
    pub key: String,
    pub native: String,
}

/// Missing entries of one target locale, in native dictionary order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnforcementReport {
    pub native_locale: String,
    pub locale: String,
    pub missing: Vec<MissingEntry>,
}

impl EnforcementReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Compute one report per target locale, regardless of mode.
pub fn missing_translations(cache: &LocaleCache) -> Vec<EnforcementReport> {
    let native = cache.native_dictionary();
    cache
        .targets()
        .map(|(locale, target)| EnforcementReport {
            native_locale: cache.native_id().to_string(),
            locale: locale.to_string(),
            missing: native
                .iter()
                .filter(|(key, _)| !target.contains_key(key))
                .map(|(key, value)| MissingEntry {
                    key: key.to_string(),
                    native: value.to_string(),
                })
                .collect(),
        })
        .collect()
}

/// Run enforcement for `cache_id`, writing diagnostics to stderr.
pub fn enforce(store: &LocaleStore, cache_id: &str) -> Result<Vec<EnforcementReport>> {
    enforce_to(store, cache_id, &mut io::stderr().lock())
}

/// Run enforcement for `cache_id`, writing diagnostics to `writer`.
pub fn enforce_to<W: Write>(
    store: &LocaleStore,
    cache_id: &str,
    writer: &mut W,
) -> Result<Vec<EnforcementReport>> {
    let cache = store.get_cache(cache_id)?;
    let mode = cache.enforcement();
    if mode == EnforcementMode::Silent {
        return Ok(Vec::new());
    }

    let reports = missing_translations(cache);
    for report in &reports {
        for entry in &report.missing {
            let _ = writeln!(writer, "{}", diagnostic_line(mode, &report.locale, entry));
        }
    }

    let failing = reports.iter().filter(|r| !r.is_complete()).count();
    if mode == EnforcementMode::Strict && failing > 0 {
        return Err(L10nError::Enforcement {
            locales: failing,
            missing: reports.iter().map(|r| r.missing.len()).sum(),
        });
    }
    Ok(reports)
}

fn diagnostic_line(mode: EnforcementMode, locale: &str, entry: &MissingEntry) -> String {
    let severity = match mode {
        EnforcementMode::Strict => "error:".bold().red(),
        _ => "warning:".bold().yellow(),
    };
    format!(
        "{} [{}] missing translation for key {}: {:?}",
        severity,
        locale.cyan(),
        entry.key.bold(),
        entry.native
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dictionary::LocaleDictionary;
    use pretty_assertions::assert_eq;

    fn store(mode: &str) -> LocaleStore {
        colored::control::set_override(false);
        let native: LocaleDictionary = [("A", "Apple"), ("B", "Banana"), ("C", "Cherry")]
            .into_iter()
            .collect();
        let target: LocaleDictionary = [("A", "Apfel"), ("C", "Kirsche")].into_iter().collect();

        let mut store = LocaleStore::new();
        store.configure("site", "en", mode).unwrap();
        store.load_locale("site", "en", native).unwrap();
        store.load_locale("site", "de", target).unwrap();
        store
    }

    fn run(mode: &str) -> (Result<Vec<EnforcementReport>>, String) {
        let store = store(mode);
        let mut out = Vec::new();
        let result = enforce_to(&store, "site", &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_warn_reports_without_failing() {
        let (result, output) = run("warn");
        let reports = result.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].missing,
            vec![MissingEntry {
                key: "B".to_string(),
                native: "Banana".to_string()
            }]
        );
        assert_eq!(
            output,
            "warning: [de] missing translation for key B: \"Banana\"\n"
        );
    }

    #[test]
    fn test_strict_reports_then_fails() {
        let (result, output) = run("strict");
        assert!(matches!(
            result,
            Err(L10nError::Enforcement {
                locales: 1,
                missing: 1
            })
        ));
        assert_eq!(
            output,
            "error: [de] missing translation for key B: \"Banana\"\n"
        );
    }

    #[test]
    fn test_silent_does_nothing() {
        let (result, output) = run("silent");
        assert!(result.unwrap().is_empty());
        assert!(output.is_empty());
    }

    #[test]
    fn test_strict_scans_every_locale_before_failing() {
        let mut store = store("strict");
        store
            .load_locale("site", "fr", LocaleDictionary::new())
            .unwrap();
        let mut out = Vec::new();
        let result = enforce_to(&store, "site", &mut out);

        assert!(matches!(
            result,
            Err(L10nError::Enforcement {
                locales: 2,
                missing: 4
            })
        ));
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.lines().count(), 4);
        assert!(output.lines().last().unwrap().contains("[fr]"));
    }

    #[test]
    fn test_complete_locale_passes_strict() {
        let mut store = LocaleStore::new();
        let dict: LocaleDictionary = [("A", "Apple")].into_iter().collect();
        store.configure("site", "en", "strict").unwrap();
        store.load_locale("site", "en", dict.clone()).unwrap();
        store.load_locale("site", "de", dict).unwrap();

        let reports = enforce_to(&store, "site", &mut Vec::new()).unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].is_complete());
    }

    #[test]
    fn test_unconfigured_cache() {
        let store = LocaleStore::new();
        assert!(matches!(
            enforce_to(&store, "nope", &mut Vec::new()),
            Err(L10nError::Load(_))
        ));
    }
}
