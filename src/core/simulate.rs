//! Pseudo-translation for development.
//!
//! A character substitution table (vowels to accented vowels by default) is
//! applied to every native string, skipping anything inside `<…>` so markup
//! stays intact. Every requested locale gets the same result.

use indexmap::IndexMap;

use crate::{
    core::dictionary::LocaleDictionary,
    error::{L10nError, Result},
};

pub fn default_simulated_locales() -> Vec<String> {
    ["de", "es", "fr"].map(String::from).to_vec()
}

pub fn default_substitution_table() -> IndexMap<String, String> {
    [("a", "á"), ("e", "é"), ("i", "í"), ("o", "ó"), ("u", "ú")]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

#[derive(Debug, Clone)]
pub struct Simulator {
    locales: Vec<String>,
    table: IndexMap<String, String>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(default_simulated_locales(), default_substitution_table())
    }
}

impl Simulator {
    pub fn new(locales: Vec<String>, table: IndexMap<String, String>) -> Self {
        Self { locales, table }
    }

    /// Apply the table to one string, entry by entry, outside of markup.
    pub fn transform(&self, text: &str) -> String {
        self.table
            .iter()
            .filter(|(from, _)| !from.is_empty())
            .fold(text.to_string(), |acc, (from, to)| {
                replace_outside_markup(&acc, from, to)
            })
    }

    /// Pseudo-translate a single native dictionary into every configured
    /// locale. No input is a no-op; more than one is an error.
    pub fn simulate(
        &self,
        natives: &[LocaleDictionary],
    ) -> Result<IndexMap<String, LocaleDictionary>> {
        let native = match natives {
            [] => return Ok(IndexMap::new()),
            [native] => native,
            many => return Err(L10nError::Input(many.len())),
        };

        let mut translated = native.clone();
        for value in translated.values_mut() {
            *value = self.transform(value);
        }

        Ok(self
            .locales
            .iter()
            .map(|locale| (locale.clone(), translated.clone()))
            .collect())
    }
}

/// Replace `from` with `to` wherever the match does not sit inside a tag.
///
/// A position counts as inside a tag when a `>` follows it before any `<`.
/// Nested `<` in attribute values is not handled.
fn replace_outside_markup(text: &str, from: &str, to: &str) -> String {
    let inside = inside_markup(text);
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for (start, matched) in text.match_indices(from) {
        if inside[start] {
            continue;
        }
        output.push_str(&text[last..start]);
        output.push_str(to);
        last = start + matched.len();
    }
    output.push_str(&text[last..]);
    output
}

/// For every byte offset, whether the rest of the text reaches `>` before `<`.
fn inside_markup(text: &str) -> Vec<bool> {
    let bytes = text.as_bytes();
    let mut inside = vec![false; bytes.len() + 1];
    let mut closes = false;
    for i in (0..bytes.len()).rev() {
        match bytes[i] {
            b'>' => closes = true,
            b'<' => closes = false,
            _ => {}
        }
        inside[i] = closes;
    }
    inside
}
