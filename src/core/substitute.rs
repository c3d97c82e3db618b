//! Per-locale substitution of document content.
//!
//! Two strategies are available:
//!
//! - [`HashStrategy`]: every native string found exactly between one of the
//!   configured delimiter pairs (`>…<`, `"…"`, `'…'` by default) is replaced by
//!   the target locale's string for the same key. Text that is not delimited
//!   this way is left alone, so substrings of unrelated content are never hit.
//! - [`KeyStrategy`]: the document is a template; `{{{name}}}` tokens are
//!   looked up by name in the target dictionary.
//!
//! After substitution an optional hyperlink rewrite runs over every `href`
//! value of the transformed document.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use enum_dispatch::enum_dispatch;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    core::{
        dictionary::LocaleDictionary,
        document::{DocumentParser, HtmlParser},
        store::LocaleStore,
    },
    error::{L10nError, Result},
};

/// Attribute holding a hyperlink target.
const HREF: &str = "href";

/// Reported path for content localized without a file record.
const INLINE_CONTENT: &str = "<inline content>";

/// Compiled size limit for the hash matcher; large dictionaries exceed the
/// regex default.
const MATCHER_SIZE_LIMIT: usize = 256 * (1 << 20);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct DelimiterPair {
    pub open: String,
    pub close: String,
}

impl DelimiterPair {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    fn wrap(&self, text: &str) -> String {
        format!("{}{}{}", self.open, text, self.close)
    }
}

impl From<(String, String)> for DelimiterPair {
    fn from((open, close): (String, String)) -> Self {
        Self { open, close }
    }
}

impl From<DelimiterPair> for (String, String) {
    fn from(pair: DelimiterPair) -> Self {
        (pair.open, pair.close)
    }
}

/// `>…<`, `"…"`, `'…'`: whole element content or a whole quoted attribute.
pub fn default_delimiters() -> Vec<DelimiterPair> {
    vec![
        DelimiterPair::new(">", "<"),
        DelimiterPair::new("\"", "\""),
        DelimiterPair::new("'", "'"),
    ]
}

pub fn default_key_delimiters() -> DelimiterPair {
    DelimiterPair::new("{{{", "}}}")
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SearchBy {
    #[default]
    Hash,
    Key,
}

#[enum_dispatch]
pub trait Substitute {
    /// Rewrite `content` from the native locale into `target`.
    fn substitute(
        &self,
        content: &str,
        native: &LocaleDictionary,
        target: &LocaleDictionary,
    ) -> Result<String>;
}

#[enum_dispatch(Substitute)]
#[derive(Debug, Clone)]
pub enum Strategy {
    HashStrategy,
    KeyStrategy,
}

impl Strategy {
    pub fn hash(delimiters: Vec<DelimiterPair>) -> Result<Self> {
        Ok(HashStrategy::new(delimiters)?.into())
    }

    pub fn key(delimiters: &DelimiterPair) -> Result<Self> {
        Ok(KeyStrategy::new(delimiters)?.into())
    }
}

#[derive(Debug, Clone)]
pub struct HashStrategy {
    delimiters: Vec<DelimiterPair>,
}

impl HashStrategy {
    pub fn new(delimiters: Vec<DelimiterPair>) -> Result<Self> {
        if delimiters.is_empty() {
            return Err(L10nError::config("at least one delimiter pair is required"));
        }
        Ok(Self { delimiters })
    }

    /// Wrapped native string to wrapped replacement, one entry per delimiter
    /// pair. Untranslated strings map to themselves so their text is still
    /// claimed and never matched by a shorter needle.
    fn replacements(
        &self,
        native: &LocaleDictionary,
        target: &LocaleDictionary,
    ) -> HashMap<String, String> {
        let mut replacements = HashMap::new();
        for (key, source) in native.iter() {
            // An empty source would match every bare `><` or `""`.
            if source.is_empty() {
                continue;
            }
            let localized = target.get(key).unwrap_or_else(|| {
                trace!(key, "no translation, leaving source text");
                source
            });
            for pair in &self.delimiters {
                replacements
                    .entry(pair.wrap(source))
                    .or_insert_with(|| pair.wrap(localized));
            }
        }
        replacements
    }
}

impl Substitute for HashStrategy {
    /// All needles are matched in a single pass over the original content,
    /// longest first, so replaced text is never matched again.
    fn substitute(
        &self,
        content: &str,
        native: &LocaleDictionary,
        target: &LocaleDictionary,
    ) -> Result<String> {
        let replacements = self.replacements(native, target);
        if replacements.is_empty() {
            return Ok(content.to_string());
        }

        let mut needles: Vec<&str> = replacements.keys().map(String::as_str).collect();
        needles.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let pattern = needles
            .iter()
            .map(|needle| regex::escape(needle))
            .collect::<Vec<_>>()
            .join("|");
        let matcher = RegexBuilder::new(&pattern)
            .size_limit(MATCHER_SIZE_LIMIT)
            .build()
            .map_err(|e| L10nError::config(format!("cannot build substitution matcher: {}", e)))?;

        Ok(matcher
            .replace_all(content, |caps: &regex::Captures<'_>| {
                let found = &caps[0];
                replacements
                    .get(found)
                    .cloned()
                    .unwrap_or_else(|| found.to_string())
            })
            .into_owned())
    }
}

#[derive(Debug, Clone)]
pub struct KeyStrategy {
    token: Regex,
}

impl KeyStrategy {
    pub fn new(delimiters: &DelimiterPair) -> Result<Self> {
        if delimiters.open.is_empty() || delimiters.close.is_empty() {
            return Err(L10nError::config("key delimiters must not be empty"));
        }
        let pattern = format!(
            "{}(.+?){}",
            regex::escape(&delimiters.open),
            regex::escape(&delimiters.close)
        );
        let token = Regex::new(&pattern).map_err(|e| L10nError::config(e.to_string()))?;
        Ok(Self { token })
    }
}

impl Substitute for KeyStrategy {
    fn substitute(
        &self,
        content: &str,
        _native: &LocaleDictionary,
        target: &LocaleDictionary,
    ) -> Result<String> {
        Ok(self
            .token
            .replace_all(content, |caps: &regex::Captures<'_>| {
                let name = &caps[1];
                match target.get(name) {
                    Some(value) => value.to_string(),
                    None => {
                        trace!(name, "unknown template key, leaving token");
                        caps[0].to_string()
                    }
                }
            })
            .into_owned())
    }
}

/// Byte content of an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    /// No content; passed through without producing outputs.
    Empty,
    Buffer(Vec<u8>),
    /// Not fully buffered; rejected.
    Stream,
}

/// A document to localize, addressed by path relative to a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub base: PathBuf,
    pub contents: Contents,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>, base: impl Into<PathBuf>, contents: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            base: base.into(),
            contents: Contents::Buffer(contents),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedDocument {
    pub locale: String,
    pub path: PathBuf,
    pub contents: String,
}

/// Insert the locale as a directory right below the base path:
/// `www/index.html` with base `www/` becomes `www/de/index.html`.
pub fn default_out_path(record: &FileRecord, locale: &str) -> PathBuf {
    match record.path.strip_prefix(&record.base) {
        Ok(relative) => record.base.join(locale).join(relative),
        Err(_) => {
            let name = record.path.file_name().map(Path::new).unwrap_or(record.path.as_path());
            record.base.join(locale).join(name)
        }
    }
}

/// Prefix root-relative links with the locale: `/about` becomes `/de/about`.
/// Protocol-relative, absolute and relative links are returned unchanged.
pub fn prefix_root_links(href: &str, locale: &str) -> String {
    if href.starts_with('/') && !href.starts_with("//") {
        format!("/{}{}", locale, href)
    } else {
        href.to_string()
    }
}

pub type OutPathFn = Box<dyn Fn(&FileRecord, &str) -> PathBuf + Send + Sync>;
pub type HrefRewriteFn = Box<dyn Fn(&str, &str) -> String + Send + Sync>;

pub struct Substitutor<P = HtmlParser> {
    parser: P,
    strategy: Strategy,
    out_path: Option<OutPathFn>,
    href_rewrite: Option<HrefRewriteFn>,
}

impl Substitutor<HtmlParser> {
    pub fn new(strategy: Strategy) -> Self {
        Self::with_parser(HtmlParser, strategy)
    }
}

impl<P: DocumentParser> Substitutor<P> {
    pub fn with_parser(parser: P, strategy: Strategy) -> Self {
        Self {
            parser,
            strategy,
            out_path: None,
            href_rewrite: None,
        }
    }

    pub fn out_path(mut self, f: impl Fn(&FileRecord, &str) -> PathBuf + Send + Sync + 'static) -> Self {
        self.out_path = Some(Box::new(f));
        self
    }

    pub fn href_rewrite(mut self, f: impl Fn(&str, &str) -> String + Send + Sync + 'static) -> Self {
        self.href_rewrite = Some(Box::new(f));
        self
    }

    /// One `(locale, content)` pair per non-native locale, in load order.
    pub fn localize_content(
        &self,
        store: &LocaleStore,
        cache_id: &str,
        content: &str,
    ) -> Result<Vec<(String, String)>> {
        let cache = store.get_cache(cache_id)?;
        let native = cache.native_dictionary();

        cache
            .targets()
            .map(|(locale, target)| -> Result<(String, String)> {
                let substituted = self.strategy.substitute(content, native, target)?;
                let localized = match &self.href_rewrite {
                    Some(rewrite) => self.rewrite_links(&substituted, locale, rewrite)?,
                    None => substituted,
                };
                Ok((locale.to_string(), localized))
            })
            .collect()
    }

    /// Localize a file record into one document per non-native locale.
    pub fn localize(
        &self,
        store: &LocaleStore,
        cache_id: &str,
        record: &FileRecord,
    ) -> Result<Vec<LocalizedDocument>> {
        store.get_cache(cache_id)?;

        let bytes = match &record.contents {
            Contents::Empty => return Ok(Vec::new()),
            Contents::Stream => {
                return Err(L10nError::UnsupportedInput {
                    path: record.path.display().to_string(),
                    reason: "streaming input is not supported".to_string(),
                });
            }
            Contents::Buffer(bytes) => bytes,
        };
        let content = std::str::from_utf8(bytes).map_err(|_| L10nError::UnsupportedInput {
            path: record.path.display().to_string(),
            reason: "content is not valid UTF-8".to_string(),
        })?;

        let outputs = self
            .localize_content(store, cache_id, content)
            .map_err(|err| match err {
                L10nError::UnsupportedInput { reason, .. } => L10nError::UnsupportedInput {
                    path: record.path.display().to_string(),
                    reason,
                },
                err => err,
            })?;
        debug!(path = %record.path.display(), locales = outputs.len(), "localized document");

        Ok(outputs
            .into_iter()
            .map(|(locale, contents)| {
                let path = match &self.out_path {
                    Some(f) => f(record, &locale),
                    None => default_out_path(record, &locale),
                };
                LocalizedDocument {
                    locale,
                    path,
                    contents,
                }
            })
            .collect())
    }

    /// The substituted content is parsed again; a translation that breaks the
    /// markup makes the input unsupported rather than a parse failure of the
    /// source document.
    fn rewrite_links(&self, content: &str, locale: &str, rewrite: &HrefRewriteFn) -> Result<String> {
        let document = self
            .parser
            .parse(content.as_bytes())
            .map_err(|err| L10nError::UnsupportedInput {
                path: INLINE_CONTENT.to_string(),
                reason: format!("localized output for '{}' does not parse: {}", locale, err),
            })?;
        let mut spans: Vec<_> = document
            .tags()
            .iter()
            .filter_map(|tag| tag.attribute(HREF).and_then(|attr| attr.value_span))
            .collect();
        spans.sort_by_key(|span| span.start);

        let mut output = content.to_string();
        for span in spans.into_iter().rev() {
            let href = &content[span.start..span.end];
            output.replace_range(span.start..span.end, &rewrite(href, locale));
        }
        Ok(output)
    }
}
