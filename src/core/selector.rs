//! Structural selection of translatable text.
//!
//! Three rules pick text out of a [`Document`]:
//!
//! - `elements`: the inner markup of every tag with one of these names
//! - `directives`: the inner markup of every tag carrying one of these attributes
//! - `attributes`: the value of any of these attributes on any tag
//!
//! The first two are unioned per tag, so a `<p localize>` contributes once.

use std::collections::HashSet;

use crate::core::document::{Document, Tag};

/// Where a unit came from. Only used for diagnostics; units have no identity
/// beyond their text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOrigin {
    Content { tag: String },
    Attribute { tag: String, attribute: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableUnit {
    pub text: String,
    pub origin: UnitOrigin,
}

#[derive(Debug, Clone, Default)]
pub struct Selector {
    elements: HashSet<String>,
    attributes: Vec<String>,
    directives: Vec<String>,
}

impl Selector {
    pub fn new<S: AsRef<str>>(elements: &[S], attributes: &[S], directives: &[S]) -> Self {
        let lower = |items: &[S]| -> Vec<String> {
            items
                .iter()
                .map(|s| s.as_ref().to_ascii_lowercase())
                .collect()
        };
        Self {
            elements: lower(elements).into_iter().collect(),
            attributes: lower(attributes),
            directives: lower(directives),
        }
    }

    fn selects_content(&self, tag: &Tag) -> bool {
        self.elements.contains(&tag.name) || self.directives.iter().any(|d| tag.has_attribute(d))
    }

    /// Translatable units in tree order: tag contents first, then attribute values.
    pub fn select(&self, document: &Document) -> Vec<TranslatableUnit> {
        let tags = document.tags();

        let contents = tags
            .iter()
            .filter(|tag| self.selects_content(tag))
            .map(|tag| TranslatableUnit {
                text: document.inner_html(tag).to_string(),
                origin: UnitOrigin::Content {
                    tag: tag.name.clone(),
                },
            });

        let attributes = tags.iter().flat_map(|tag| {
            self.attributes.iter().filter_map(move |name| {
                tag.attribute(name).map(|attr| TranslatableUnit {
                    text: attr.value.clone(),
                    origin: UnitOrigin::Attribute {
                        tag: tag.name.clone(),
                        attribute: attr.name.clone(),
                    },
                })
            })
        });

        contents.chain(attributes).collect()
    }
}
