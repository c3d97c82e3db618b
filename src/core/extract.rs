//! Native dictionary extraction.
//!
//! Every document is parsed and run through the [`Selector`]; all candidate
//! strings are pooled, sorted, and keyed. Sorting before keying keeps the
//! output file stable across runs and easy to review in diffs.

use tracing::{debug, warn};

use crate::{
    core::{
        dictionary::LocaleDictionary,
        digest::Keyer,
        document::{DocumentParser, HtmlParser},
        selector::Selector,
    },
    error::Result,
};

/// Two distinct strings truncated to the same key. The later one in sort
/// order is kept in the dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub key: String,
    pub replaced: String,
    pub kept: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub dictionary: LocaleDictionary,
    pub collisions: Vec<KeyCollision>,
}

pub struct Extractor<P = HtmlParser> {
    parser: P,
    selector: Selector,
    keyer: Keyer,
}

impl Extractor<HtmlParser> {
    pub fn new(selector: Selector, keyer: Keyer) -> Self {
        Self::with_parser(HtmlParser, selector, keyer)
    }
}

impl<P: DocumentParser> Extractor<P> {
    pub fn with_parser(parser: P, selector: Selector, keyer: Keyer) -> Self {
        Self {
            parser,
            selector,
            keyer,
        }
    }

    /// Collect candidate strings from one document, unsorted.
    pub fn candidates(&self, document: &[u8]) -> Result<Vec<String>> {
        let tree = self.parser.parse(document)?;
        let units = self.selector.select(&tree);
        debug!(units = units.len(), "selected translatable units");
        Ok(units.into_iter().map(|unit| unit.text).collect())
    }

    /// Build the native dictionary from complete document buffers.
    ///
    /// Returns `Ok(None)` when no translatable content was found. Fails on the
    /// first document that cannot be parsed.
    pub fn extract<D: AsRef<[u8]>>(&self, documents: &[D]) -> Result<Option<Extraction>> {
        let mut strings = Vec::new();
        for document in documents {
            strings.extend(self.candidates(document.as_ref())?);
        }
        Ok(self.build(strings))
    }

    /// Sort and key an already collected set of strings.
    ///
    /// Strings are ordered by UTF-16 code units, not bytes, so the dictionary
    /// order and the winner of a key collision match other tools reading the
    /// same locale files.
    pub fn build(&self, mut strings: Vec<String>) -> Option<Extraction> {
        strings.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));

        let mut dictionary = LocaleDictionary::new();
        let mut collisions = Vec::new();
        for text in strings {
            let key = self.keyer.key(&text);
            if let Some(previous) = dictionary.get(&key)
                && previous != text
            {
                warn!(%key, replaced = previous, kept = %text, "locale key collision");
                collisions.push(KeyCollision {
                    key: key.clone(),
                    replaced: previous.to_string(),
                    kept: text.clone(),
                });
            }
            dictionary.insert(key, text);
        }

        if dictionary.is_empty() {
            None
        } else {
            Some(Extraction {
                dictionary,
                collisions,
            })
        }
    }
}
