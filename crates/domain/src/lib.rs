//! Infinite Craft domain: words, room vocabularies and craft requests.
//!
//! Pure types and invariants only. Anything that talks to the outside world
//! (generation backends, storage, HTTP) lives in the engine crate.

pub mod craft;
pub mod error;
pub mod ids;
pub mod vocabulary;
pub mod word;

pub use craft::{CandidateWord, CraftPair, CraftPhase, CraftResult};
pub use error::DomainError;
pub use ids::{CraftId, RoomId};
pub use vocabulary::{seed_words, InsertOutcome, SortMode, Vocabulary, VocabularyEntry};
pub use word::{Word, WordKey, FALLBACK_EMOJI, MAX_EMOJI_CHARS, MAX_WORD_CHARS};
