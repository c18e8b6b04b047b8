//! Clarification request and outcome types

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Output language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Prose,
    Bullets,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prose => "prose",
            Self::Bullets => "bullets",
        }
    }
}

/// Text to simplify plus the requested output shape
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClarifyRequest {
    #[validate(
        length(min = 1, max = 5000, message = "text must be between 1 and 5000 characters"),
        custom(function = "validate_not_blank")
    )]
    pub text: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub mode: Mode,
}

impl ClarifyRequest {
    pub fn new(text: impl Into<String>, language: Language, mode: Mode) -> Self {
        Self {
            text: text.into(),
            language,
            mode,
        }
    }
}

fn validate_not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("text must contain non-whitespace characters".into());
        return Err(error);
    }
    Ok(())
}

/// Successful clarification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarifyOutcome {
    pub simplified: String,
    pub language: Language,
    pub mode: Mode,
    pub cached: bool,
}
