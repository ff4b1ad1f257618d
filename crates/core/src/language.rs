//! Language records and the language directory interface.
//!
//! Languages are configuration entities owned by the consuming application;
//! the engine only looks them up to resolve a mapping unit's source
//! language. English is special: configuration shipped without a language
//! tag is assumed to be authored in English, and a site does not need a
//! configured English record for such configuration to remain addressable.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Language code assumed for configuration without a stored language tag.
pub const DEFAULT_LANGCODE: &str = "en";

/// Valid text direction values.
const VALID_DIRECTIONS: &[&str] = &["ltr", "rtl"];

/// Language record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    /// Language code (e.g., "en", "fr", "pt-br").
    pub id: String,

    /// Human-readable label (e.g., "English").
    pub label: String,

    /// Sort weight for language ordering.
    #[serde(default)]
    pub weight: i32,

    /// Locked languages exist for internal bookkeeping and cannot be edited
    /// or deleted through the UI.
    #[serde(default)]
    pub locked: bool,

    /// Text direction: "ltr" or "rtl".
    #[serde(default = "default_direction")]
    pub direction: String,
}

fn default_direction() -> String {
    "ltr".to_string()
}

impl Language {
    /// Create an unlocked left-to-right language.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            weight: 0,
            locked: false,
            direction: default_direction(),
        }
    }

    /// The placeholder record for English configuration on sites that have
    /// no configured English language.
    ///
    /// Configuration shipped without a language tag is assumed to be
    /// authored in English, so such a unit must stay addressable even when
    /// "en" was never configured.
    pub fn built_in_english() -> Self {
        Self::new(DEFAULT_LANGCODE, "Built-in English")
    }
}

/// Validate that a label is non-empty and at most 255 characters.
pub fn validate_label(label: &str) -> Result<()> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        anyhow::bail!("language label must not be empty");
    }
    if trimmed.len() > 255 {
        anyhow::bail!(
            "language label must be at most 255 characters, got {}",
            trimmed.len()
        );
    }
    Ok(())
}

/// Validate that a direction string is "ltr" or "rtl".
pub fn validate_direction(direction: &str) -> Result<()> {
    if VALID_DIRECTIONS.contains(&direction) {
        Ok(())
    } else {
        anyhow::bail!("invalid direction '{direction}': must be 'ltr' or 'rtl'")
    }
}

/// Validate that a language code follows BCP 47 primary subtag format.
///
/// Accepts: lowercase alpha 2-3 chars, optionally followed by
/// hyphen-separated alphanumeric subtags (e.g., "en", "pt-br", "zh-hans").
pub fn validate_langcode(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 12 {
        anyhow::bail!("language code must be 1-12 characters, got '{id}'");
    }

    let mut parts = id.split('-');

    // Primary subtag: 2-3 lowercase letters
    match parts.next() {
        Some(primary) if (2..=3).contains(&primary.len()) => {
            if !primary.bytes().all(|b| b.is_ascii_lowercase()) {
                anyhow::bail!("language code primary subtag must be lowercase letters, got '{id}'");
            }
        }
        _ => {
            anyhow::bail!("language code must start with a 2-3 letter primary subtag, got '{id}'");
        }
    }

    // Optional subtags: alphanumeric, 1-8 chars each
    for subtag in parts {
        if subtag.is_empty()
            || subtag.len() > 8
            || !subtag.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            anyhow::bail!(
                "language code subtag must be 1-8 alphanumeric characters, got '{subtag}' in '{id}'"
            );
        }
    }

    Ok(())
}

/// Directory of the languages configured on the system.
pub trait LanguageDirectory: Send + Sync {
    /// Load a configured language by code.
    fn load(&self, code: &str) -> Option<Language>;

    /// All configured languages, ordered by weight then code.
    fn list_all(&self) -> Vec<Language>;
}
