//! Error taxonomy for the localization engine.
//!
//! Library operations return [`L10nError`]; the CLI layer wraps these in
//! `anyhow` with file-level context.

use thiserror::Error;

/// Result alias used throughout `core`.
pub type Result<T, E = L10nError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum L10nError {
    /// A document could not be parsed into a tree.
    #[error("parse error at byte {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// The document cannot be processed: streamed rather than fully
    /// buffered, not UTF-8, or its localized form no longer parses.
    #[error("unsupported input {path}: {reason}")]
    UnsupportedInput { path: String, reason: String },

    /// An option is invalid or a required value is missing.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An operation referenced a cache id that was never configured.
    #[error("locale cache '{0}' has not been configured")]
    Load(String),

    /// A locale dictionary file is not a flat JSON object of strings.
    #[error("invalid dictionary for locale '{locale}': {source}")]
    Json {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    /// Strict enforcement found at least one missing translation.
    #[error("{missing} missing translation(s) across {locales} locale(s)")]
    Enforcement { locales: usize, missing: usize },

    /// The simulator was handed more than one native dictionary.
    #[error("simulate one native dictionary at a time (got {0})")]
    Input(usize),
}

impl L10nError {
    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        L10nError::Parse {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        L10nError::Config(message.into())
    }
}
