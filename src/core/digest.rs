//! Content-derived locale keys.
//!
//! A key is the lowercase hex digest of a string, truncated to a configured
//! length. Identical text always yields the same key; distinct text may
//! collide at short lengths.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::error::{L10nError, Result};

pub const DEFAULT_HASH_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Length of the full hex digest.
    pub fn hex_len(self) -> usize {
        match self {
            HashAlgorithm::Md5 => 32,
            HashAlgorithm::Sha1 => 40,
            HashAlgorithm::Sha256 => 64,
            HashAlgorithm::Sha512 => 128,
        }
    }

    /// Full lowercase hex digest of `bytes`.
    pub fn digest_hex(self, bytes: &[u8]) -> String {
        match self {
            HashAlgorithm::Md5 => format!("{:x}", md5::compute(bytes)),
            HashAlgorithm::Sha1 => hex::encode(Sha1::digest(bytes)),
            HashAlgorithm::Sha256 => hex::encode(Sha256::digest(bytes)),
            HashAlgorithm::Sha512 => hex::encode(Sha512::digest(bytes)),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Md5 => write!(f, "md5"),
            HashAlgorithm::Sha1 => write!(f, "sha1"),
            HashAlgorithm::Sha256 => write!(f, "sha256"),
            HashAlgorithm::Sha512 => write!(f, "sha512"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = L10nError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(L10nError::config(format!(
                "unknown hash algorithm '{}' (expected md5, sha1, sha256 or sha512)",
                other
            ))),
        }
    }
}

/// Produces truncated digest keys for translatable strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyer {
    algorithm: HashAlgorithm,
    length: usize,
}

impl Keyer {
    /// Fails with `ConfigError` when `length` is zero or longer than the digest.
    pub fn new(algorithm: HashAlgorithm, length: usize) -> Result<Self> {
        if length == 0 || length > algorithm.hex_len() {
            return Err(L10nError::config(format!(
                "hash length {} out of range for {} (1..={})",
                length,
                algorithm,
                algorithm.hex_len()
            )));
        }
        Ok(Self { algorithm, length })
    }

    pub fn key(&self, text: &str) -> String {
        let mut hex = self.algorithm.digest_hex(text.as_bytes());
        hex.truncate(self.length);
        hex
    }
}

impl Default for Keyer {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Md5,
            length: DEFAULT_HASH_LENGTH,
        }
    }
}
