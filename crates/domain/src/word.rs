//! Emoji-labelled words and their identity key
//!
//! A [`Word`] is valid by construction:
//! - Text is trimmed, internal whitespace runs collapse to a single space
//! - Text is non-empty and at most 48 characters
//! - Emoji is trimmed, at most 16 characters, and never empty
//!
//! Identity is the [`WordKey`]; the emoji and the original casing are
//! descriptive only.

use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::DomainError;

/// Maximum number of characters in a word's text
pub const MAX_WORD_CHARS: usize = 48;

/// Maximum number of characters in a word's emoji
pub const MAX_EMOJI_CHARS: usize = 16;

/// Emoji used when the generator returns none
pub const FALLBACK_EMOJI: &str = "❔";

/// Trim and collapse internal whitespace runs to one space.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// WordKey
// ============================================================================

/// Normalized text used as a word's identity: trimmed, whitespace-collapsed,
/// lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WordKey(String);

impl WordKey {
    pub fn new(text: &str) -> Self {
        Self(collapse_whitespace(text).to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Word
// ============================================================================

/// An immutable emoji-labelled word.
#[derive(Debug, Clone, Serialize)]
pub struct Word {
    text: String,
    emoji: String,
    #[serde(skip)]
    key: WordKey,
}

impl Word {
    /// Create a new validated word.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The text is empty after normalization
    /// - The text exceeds 48 characters
    /// - The emoji exceeds 16 characters
    pub fn new(text: impl AsRef<str>, emoji: impl AsRef<str>) -> Result<Self, DomainError> {
        let text = collapse_whitespace(text.as_ref());
        if text.is_empty() {
            return Err(DomainError::validation("Word text cannot be empty"));
        }
        if text.chars().count() > MAX_WORD_CHARS {
            return Err(DomainError::validation(format!(
                "Word text cannot exceed {} characters",
                MAX_WORD_CHARS
            )));
        }

        let emoji = emoji.as_ref().trim();
        if emoji.chars().count() > MAX_EMOJI_CHARS {
            return Err(DomainError::validation(format!(
                "Word emoji cannot exceed {} characters",
                MAX_EMOJI_CHARS
            )));
        }
        let emoji = if emoji.is_empty() {
            FALLBACK_EMOJI
        } else {
            emoji
        };

        Ok(Self::trusted(&text, emoji))
    }

    /// Build a word from text already known to be valid (seeds, tests).
    pub(crate) fn trusted(text: &str, emoji: &str) -> Self {
        Self {
            key: WordKey::new(text),
            text: text.to_string(),
            emoji: emoji.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    pub fn key(&self) -> &WordKey {
        &self.key
    }

    /// Whether `other` has the same identity and the same presentation.
    pub fn same_representation(&self, other: &Word) -> bool {
        self.text == other.text && self.emoji == other.emoji
    }
}

impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Word {}

impl Hash for Word {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_trimmed_collapsed_and_lowercased() {
        assert_eq!(WordKey::new("  Hot   Spring ").as_str(), "hot spring");
        assert_eq!(WordKey::new("STEAM"), WordKey::new("steam"));
        assert!(WordKey::new("   ").is_empty());
    }

    #[test]
    fn word_normalizes_text_but_keeps_casing() {
        let word = Word::new("  Hot   Spring ", " ♨️ ").unwrap();
        assert_eq!(word.text(), "Hot Spring");
        assert_eq!(word.emoji(), "♨️");
        assert_eq!(word.key().as_str(), "hot spring");
    }

    #[test]
    fn empty_text_is_rejected() {
        let err = Word::new(" \t ", "💧").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn overlong_text_and_emoji_are_rejected() {
        assert!(Word::new("x".repeat(MAX_WORD_CHARS + 1), "💧").is_err());
        assert!(Word::new("x".repeat(MAX_WORD_CHARS), "💧").is_ok());
        assert!(Word::new("Rain", "🌧".repeat(MAX_EMOJI_CHARS + 1)).is_err());
    }

    #[test]
    fn missing_emoji_gets_fallback() {
        let word = Word::new("Mud", "  ").unwrap();
        assert_eq!(word.emoji(), FALLBACK_EMOJI);
    }

    #[test]
    fn equality_ignores_emoji_and_casing() {
        let a = Word::new("Steam", "💨").unwrap();
        let b = Word::new("steam ", "☁️").unwrap();
        assert_eq!(a, b);
        assert!(!a.same_representation(&b));
    }

    #[test]
    fn serializes_text_and_emoji_only() {
        let word = Word::new("Fire", "🔥").unwrap();
        let json = serde_json::to_value(&word).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "Fire", "emoji": "🔥" }));
    }
}
