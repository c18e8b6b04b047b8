//! Cache key derivation for clarification requests

use std::fmt;

use sha2::{Digest, Sha256};

use crate::domain::clarify::{Language, Mode};

/// Fixed-length (64 hex chars) key identifying a clarification request.
///
/// Text is trimmed and lowercased before hashing so requests that differ only
/// in case or surrounding whitespace share a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClarifyCacheKey(String);

impl ClarifyCacheKey {
    pub fn derive(text: &str, language: Language, mode: Mode) -> Self {
        let normalized = text.trim().to_lowercase();
        let raw = format!("{}:{}:{}", language.as_str(), mode.as_str(), normalized);

        let digest = Sha256::digest(raw.as_bytes());
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix safe for log lines
    pub fn prefix(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl fmt::Display for ClarifyCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
