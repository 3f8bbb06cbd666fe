//! Room vocabulary: the ordered set of discovered words.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::word::{Word, WordKey};

/// Words every new room starts with, in display order.
pub fn seed_words() -> Vec<Word> {
    vec![
        Word::trusted("Water", "💧"),
        Word::trusted("Fire", "🔥"),
        Word::trusted("Wind", "🌬️"),
        Word::trusted("Earth", "🌍"),
    ]
}

/// Ordering applied when listing a vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Case-insensitive by text, ties by discovery order
    #[default]
    Alphabetical,
    /// By emoji code points, ties by discovery order
    Emoji,
    /// Discovery order
    Time,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alphabetical => write!(f, "alphabetical"),
            Self::Emoji => write!(f, "emoji"),
            Self::Time => write!(f, "time"),
        }
    }
}

impl FromStr for SortMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alphabetical" | "alpha" => Ok(Self::Alphabetical),
            "emoji" => Ok(Self::Emoji),
            "time" | "chronological" => Ok(Self::Time),
            other => Err(DomainError::validation(format!(
                "Unknown sort mode: {}",
                other
            ))),
        }
    }
}

/// A word plus the moment it entered the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyEntry {
    pub word: Word,
    pub discovered_at: DateTime<Utc>,
}

impl VocabularyEntry {
    pub fn new(word: Word, discovered_at: DateTime<Utc>) -> Self {
        Self {
            word,
            discovered_at,
        }
    }
}

/// Result of [`Vocabulary::insert_if_absent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOutcome {
    /// True when this call appended the word.
    pub inserted: bool,
    /// The stored representation for the word's key.
    pub canonical: Word,
}

/// Ordered collection of unique words.
///
/// Invariant: no two entries share a [`WordKey`]. Storage order is discovery
/// order and is never rearranged; sorted views are computed on demand.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
    index: HashMap<WordKey, usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vocabulary holding only the seed words, all discovered at `now`.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let mut vocabulary = Self::new();
        for word in seed_words() {
            vocabulary.insert_if_absent(word, now);
        }
        vocabulary
    }

    /// Rebuild a vocabulary from entries in discovery order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if two entries share a key, which
    /// means the backing storage lost its uniqueness guarantee.
    pub fn from_entries(
        entries: impl IntoIterator<Item = VocabularyEntry>,
    ) -> Result<Self, DomainError> {
        let mut vocabulary = Self::new();
        for entry in entries {
            if vocabulary.index.contains_key(entry.word.key()) {
                return Err(DomainError::validation(format!(
                    "Duplicate word in stored vocabulary: {}",
                    entry.word.key()
                )));
            }
            vocabulary.push(entry);
        }
        Ok(vocabulary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn get(&self, key: &WordKey) -> Option<&Word> {
        self.index.get(key).map(|&i| &self.entries[i].word)
    }

    /// Append `word` unless its key is already present.
    pub fn insert_if_absent(&mut self, word: Word, discovered_at: DateTime<Utc>) -> InsertOutcome {
        if let Some(existing) = self.get(word.key()) {
            return InsertOutcome {
                inserted: false,
                canonical: existing.clone(),
            };
        }
        let canonical = word.clone();
        self.push(VocabularyEntry::new(word, discovered_at));
        InsertOutcome {
            inserted: true,
            canonical,
        }
    }

    fn push(&mut self, entry: VocabularyEntry) {
        self.index.insert(entry.word.key().clone(), self.entries.len());
        self.entries.push(entry);
    }

    /// All words in the requested order. Sorts are stable, so ties keep
    /// discovery order.
    pub fn list(&self, mode: SortMode) -> Vec<Word> {
        let mut words: Vec<Word> = self.entries.iter().map(|e| e.word.clone()).collect();
        match mode {
            SortMode::Time => {}
            SortMode::Alphabetical => words.sort_by(|a, b| a.key().cmp(b.key())),
            SortMode::Emoji => words.sort_by(|a, b| a.emoji().cmp(b.emoji())),
        }
        words
    }
}
