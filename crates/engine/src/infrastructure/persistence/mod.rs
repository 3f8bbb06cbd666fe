//! Vocabulary persistence adapters.

mod memory;
mod sqlite;

pub use memory::InMemoryVocabularyRepo;
pub use sqlite::SqliteVocabularyRepo;
