//! l10n - hash-keyed localization for static HTML sites
//!
//! Translatable strings are pulled out of HTML documents into a native locale
//! dictionary keyed by content digest. Translated dictionaries are then
//! substituted back to produce one copy of the site per locale.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Localization engine (extract, load, localize, enforce, simulate)
//! - `error`: Library error type

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
