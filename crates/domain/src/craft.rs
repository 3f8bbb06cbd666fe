//! Craft requests, results and the per-request state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::word::Word;

/// An unordered pair of distinct words, stored with the smaller key first.
///
/// `CraftPair::new(fire, water)` and `CraftPair::new(water, fire)` are equal,
/// so generators, caches and logs see one logical request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftPair {
    first: Word,
    second: Word,
}

impl CraftPair {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if both words share a key.
    pub fn new(a: Word, b: Word) -> Result<Self, DomainError> {
        if a == b {
            return Err(DomainError::validation("cannot craft a word with itself"));
        }
        let (first, second) = if a.key() <= b.key() { (a, b) } else { (b, a) };
        Ok(Self { first, second })
    }

    pub fn first(&self) -> &Word {
        &self.first
    }

    pub fn second(&self) -> &Word {
        &self.second
    }
}

impl fmt::Display for CraftPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.first.text(), self.second.text())
    }
}

/// Unvalidated word proposed by a generator.
///
/// Generators hand back raw text; only [`CandidateWord::into_word`] turns it
/// into a [`Word`] that may enter a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateWord {
    pub text: String,
    #[serde(default)]
    pub emoji: String,
}

impl CandidateWord {
    pub fn new(text: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emoji: emoji.into(),
        }
    }

    /// Normalize and validate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` under the same rules as [`Word::new`].
    pub fn into_word(self) -> Result<Word, DomainError> {
        Word::new(self.text, self.emoji)
    }
}

/// Outcome of a successful craft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CraftResult {
    /// Canonical stored representation of the crafted word.
    pub word: Word,
    /// True for exactly one craft per newly discovered key.
    pub is_new_to_vocabulary: bool,
}

/// Lifecycle of a single craft request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CraftPhase {
    #[default]
    Pending,
    Generating,
    Merging,
    Done,
    Failed,
}

impl CraftPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Move to `next`, rejecting transitions the lifecycle does not allow.
    pub fn advance(self, next: CraftPhase) -> Result<CraftPhase, DomainError> {
        use CraftPhase::*;
        let allowed = matches!(
            (self, next),
            (Pending, Generating)
                | (Pending, Failed)
                | (Generating, Merging)
                | (Generating, Failed)
                | (Merging, Done)
                | (Merging, Failed)
        );
        if allowed {
            Ok(next)
        } else {
            Err(DomainError::invalid_state_transition(format!(
                "{} -> {}",
                self, next
            )))
        }
    }
}

impl fmt::Display for CraftPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "Pending",
            Self::Generating => "Generating",
            Self::Merging => "Merging",
            Self::Done => "Done",
            Self::Failed => "Failed",
        };
        write!(f, "{}", name)
    }
}
