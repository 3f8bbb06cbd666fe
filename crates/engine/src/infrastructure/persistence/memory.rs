//! In-process vocabulary storage (tests and throwaway servers).

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;

use infcraft_domain::{RoomId, VocabularyEntry};

use crate::infrastructure::ports::{RepoError, VocabularyRepo};

/// Vocabulary repository that forgets everything on restart.
#[derive(Default)]
pub struct InMemoryVocabularyRepo {
    rooms: DashMap<RoomId, Vec<VocabularyEntry>>,
}

impl InMemoryVocabularyRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VocabularyRepo for InMemoryVocabularyRepo {
    async fn load(&self, room: &RoomId) -> Result<Vec<VocabularyEntry>, RepoError> {
        Ok(self
            .rooms
            .get(room)
            .map(|entries| entries.clone())
            .unwrap_or_default())
    }

    async fn append(&self, room: &RoomId, entry: &VocabularyEntry) -> Result<(), RepoError> {
        self.append_all(room, std::slice::from_ref(entry)).await
    }

    async fn append_all(
        &self,
        room: &RoomId,
        entries: &[VocabularyEntry],
    ) -> Result<(), RepoError> {
        // One entry guard for the whole batch: validate everything, then push.
        let mut stored = self.rooms.entry(room.clone()).or_default();
        let mut keys: HashSet<_> = stored.iter().map(|e| e.word.key().clone()).collect();
        for entry in entries {
            if !keys.insert(entry.word.key().clone()) {
                return Err(RepoError::constraint(format!(
                    "word '{}' already stored for room {}",
                    entry.word.key(),
                    room
                )));
            }
        }
        stored.extend(entries.iter().cloned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use infcraft_domain::Word;

    fn entry(text: &str, emoji: &str) -> VocabularyEntry {
        VocabularyEntry::new(Word::new(text, emoji).unwrap(), Utc::now())
    }

    #[tokio::test]
    async fn unknown_room_loads_empty() {
        let repo = InMemoryVocabularyRepo::new();
        let room = RoomId::new("nowhere").unwrap();
        assert!(repo.load(&room).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn appends_are_scoped_per_room_and_unique() {
        let repo = InMemoryVocabularyRepo::new();
        let lobby = RoomId::new("lobby").unwrap();
        let other = RoomId::new("other").unwrap();

        repo.append(&lobby, &entry("Steam", "💨")).await.unwrap();
        repo.append(&other, &entry("Steam", "☁️")).await.unwrap();
        let dup = repo.append(&lobby, &entry("steam", "♨️")).await;

        assert!(matches!(dup, Err(RepoError::ConstraintViolation(_))));
        assert_eq!(repo.load(&lobby).await.unwrap().len(), 1);
        assert_eq!(repo.load(&other).await.unwrap()[0].word.emoji(), "☁️");
    }

    #[tokio::test]
    async fn conflicting_batch_stores_nothing() {
        let repo = InMemoryVocabularyRepo::new();
        let room = RoomId::default_room();
        repo.append(&room, &entry("Steam", "💨")).await.unwrap();

        let result = repo
            .append_all(&room, &[entry("Mud", "🟤"), entry("STEAM", "☁️")])
            .await;

        assert!(matches!(result, Err(RepoError::ConstraintViolation(_))));
        let stored = repo.load(&room).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].word.text(), "Steam");
    }

    #[tokio::test]
    async fn batch_keeps_its_order() {
        let repo = InMemoryVocabularyRepo::new();
        let room = RoomId::default_room();

        repo.append_all(&room, &[entry("Mud", "🟤"), entry("Clay", "🧱")])
            .await
            .unwrap();

        let texts: Vec<String> = repo
            .load(&room)
            .await
            .unwrap()
            .iter()
            .map(|e| e.word.text().to_string())
            .collect();
        assert_eq!(texts, vec!["Mud", "Clay"]);
    }
}
