//! In-memory stores with serialized access.
//!
//! Each room's vocabulary lives in exactly one [`VocabularyStore`]; the
//! [`RoomRegistry`] hands out shared references to it.

mod rooms;
mod vocabulary;

pub use rooms::RoomRegistry;
pub use vocabulary::{VocabularyError, VocabularyStore};
