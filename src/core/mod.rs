//! Localization engine.
//!
//! ## Pipeline
//!
//! 1. **Extract**: documents → [`Selector`] → [`Keyer`] → native [`LocaleDictionary`]
//! 2. **Load**: dictionary files → [`LocaleStore`]
//! 3. **Localize**: [`LocaleStore`] + document → one copy per target locale ([`Substitutor`])
//! 4. **Enforce**: [`LocaleStore`] → missing-key reports ([`enforce`])
//!
//! [`Simulator`] produces pseudo-translated dictionaries for step 2 without
//! real translations.

pub mod dictionary;
pub mod digest;
pub mod document;
pub mod enforce;
pub mod extract;
pub mod files;
pub mod selector;
pub mod simulate;
pub mod store;
pub mod substitute;

pub use dictionary::LocaleDictionary;
pub use digest::{HashAlgorithm, Keyer};
pub use document::{Document, DocumentParser, HtmlParser};
pub use enforce::{EnforcementReport, MissingEntry, enforce, enforce_to};
pub use extract::{Extraction, Extractor, KeyCollision};
pub use selector::{Selector, TranslatableUnit};
pub use simulate::{Simulator, default_simulated_locales, default_substitution_table};
pub use store::{EnforcementMode, LocaleCache, LocaleStore};
pub use substitute::{
    Contents, DelimiterPair, FileRecord, LocalizedDocument, SearchBy, Strategy, Substitutor,
    default_delimiters, default_key_delimiters, default_out_path, prefix_root_links,
};
