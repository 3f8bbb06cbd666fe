//! Vocabulary use cases.

use std::sync::Arc;

use infcraft_domain::{RoomId, SortMode, Word};

use crate::stores::{RoomRegistry, VocabularyError};

/// Container for vocabulary use cases.
pub struct VocabularyUseCases {
    pub list: Arc<ListNouns>,
}

impl VocabularyUseCases {
    pub fn new(list: Arc<ListNouns>) -> Self {
        Self { list }
    }
}

/// List a room's words (`getNouns`).
pub struct ListNouns {
    rooms: Arc<RoomRegistry>,
}

impl ListNouns {
    pub fn new(rooms: Arc<RoomRegistry>) -> Self {
        Self { rooms }
    }

    pub async fn execute(&self, room: &RoomId, sort: SortMode) -> Result<Vec<Word>, VocabularyError> {
        let store = self.rooms.room(room).await?;
        Ok(store.list(sort).await)
    }
}
