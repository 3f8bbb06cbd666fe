//! Per-room vocabulary store.

use std::sync::Arc;

use tokio::sync::Mutex;

use infcraft_domain::{
    DomainError, InsertOutcome, RoomId, SortMode, Vocabulary, VocabularyEntry, Word, WordKey,
};

use crate::infrastructure::ports::{ClockPort, RepoError, VocabularyRepo};

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("Stored vocabulary for room {room} is inconsistent: {source}")]
    Corrupt {
        room: RoomId,
        #[source]
        source: DomainError,
    },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Single owner of one room's vocabulary.
///
/// All mutation goes through [`insert_if_absent`](Self::insert_if_absent),
/// which holds the room lock across check, persist and append. Nothing else
/// holds the lock across an await on an external service.
pub struct VocabularyStore {
    room: RoomId,
    vocabulary: Mutex<Vocabulary>,
    repo: Arc<dyn VocabularyRepo>,
    clock: Arc<dyn ClockPort>,
}

impl VocabularyStore {
    /// Load `room` from `repo`, seeding and persisting the seed words when the
    /// room has never been used.
    pub async fn open(
        room: RoomId,
        repo: Arc<dyn VocabularyRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Result<Self, VocabularyError> {
        let entries = repo.load(&room).await?;

        let vocabulary = if entries.is_empty() {
            let seeded = Vocabulary::seeded(clock.now());
            repo.append_all(&room, seeded.entries()).await?;
            tracing::info!(room_id = %room, words = seeded.len(), "Seeded new room vocabulary");
            seeded
        } else {
            let loaded = Vocabulary::from_entries(entries).map_err(|source| {
                VocabularyError::Corrupt {
                    room: room.clone(),
                    source,
                }
            })?;
            tracing::debug!(room_id = %room, words = loaded.len(), "Loaded room vocabulary");
            loaded
        };

        Ok(Self {
            room,
            vocabulary: Mutex::new(vocabulary),
            repo,
            clock,
        })
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }

    /// All words in `mode` order.
    pub async fn list(&self, mode: SortMode) -> Vec<Word> {
        self.vocabulary.lock().await.list(mode)
    }

    /// Stored representation for `key`, if any.
    pub async fn get(&self, key: &WordKey) -> Option<Word> {
        self.vocabulary.lock().await.get(key).cloned()
    }

    pub async fn word_count(&self) -> usize {
        self.vocabulary.lock().await.len()
    }

    /// Add `word` unless its key is already present.
    ///
    /// Exactly one concurrent caller observes `inserted = true` for a given
    /// key. When persisting fails the in-memory vocabulary is untouched.
    pub async fn insert_if_absent(&self, word: Word) -> Result<InsertOutcome, VocabularyError> {
        let mut vocabulary = self.vocabulary.lock().await;

        if let Some(existing) = vocabulary.get(word.key()) {
            return Ok(InsertOutcome {
                inserted: false,
                canonical: existing.clone(),
            });
        }

        let entry = VocabularyEntry::new(word, self.clock.now());
        self.repo.append(&self.room, &entry).await?;

        let outcome = vocabulary.insert_if_absent(entry.word, entry.discovered_at);
        debug_assert!(outcome.inserted);
        tracing::debug!(
            room_id = %self.room,
            word = %outcome.canonical,
            size = vocabulary.len(),
            "Word added to vocabulary"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::persistence::InMemoryVocabularyRepo;
    use crate::infrastructure::ports::MockVocabularyRepo;
    use chrono::Utc;

    fn word(text: &str, emoji: &str) -> Word {
        Word::new(text, emoji).unwrap()
    }

    fn texts(words: &[Word]) -> Vec<String> {
        words.iter().map(|w| w.text().to_string()).collect()
    }

    async fn fresh_store() -> (VocabularyStore, Arc<InMemoryVocabularyRepo>) {
        let repo = Arc::new(InMemoryVocabularyRepo::new());
        let store = VocabularyStore::open(
            RoomId::default_room(),
            repo.clone(),
            Arc::new(FixedClock(Utc::now())),
        )
        .await
        .unwrap();
        (store, repo)
    }

    #[tokio::test]
    async fn new_room_is_seeded_and_persisted() {
        let (store, repo) = fresh_store().await;

        assert_eq!(
            texts(&store.list(SortMode::Time).await),
            vec!["Water", "Fire", "Wind", "Earth"]
        );
        assert_eq!(repo.load(&RoomId::default_room()).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn alphabetical_listing_of_seeds() {
        let (store, _) = fresh_store().await;
        assert_eq!(
            texts(&store.list(SortMode::Alphabetical).await),
            vec!["Earth", "Fire", "Water", "Wind"]
        );
    }

    #[tokio::test]
    async fn existing_room_is_not_reseeded() {
        let repo = Arc::new(InMemoryVocabularyRepo::new());
        let room = RoomId::new("mud-room").unwrap();
        repo.append(&room, &VocabularyEntry::new(word("Mud", "🟤"), Utc::now()))
            .await
            .unwrap();

        let store = VocabularyStore::open(room, repo, Arc::new(FixedClock(Utc::now())))
            .await
            .unwrap();

        assert_eq!(texts(&store.list(SortMode::Time).await), vec!["Mud"]);
    }

    #[tokio::test]
    async fn insert_is_idempotent_on_normalized_text() {
        let (store, repo) = fresh_store().await;

        let first = store.insert_if_absent(word("Steam", "💨")).await.unwrap();
        let second = store.insert_if_absent(word("  sTEAM ", "☁️")).await.unwrap();

        assert!(first.inserted);
        assert!(!second.inserted);
        assert!(second.canonical.same_representation(&first.canonical));
        assert_eq!(store.word_count().await, 5);
        assert_eq!(repo.load(store.room()).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn seed_word_insert_returns_seed() {
        let (store, _) = fresh_store().await;
        let outcome = store.insert_if_absent(word("water", "🌊")).await.unwrap();
        assert!(!outcome.inserted);
        assert_eq!(outcome.canonical.text(), "Water");
        assert_eq!(outcome.canonical.emoji(), "💧");
    }

    #[tokio::test]
    async fn failed_persist_leaves_vocabulary_untouched() {
        let mut repo = MockVocabularyRepo::new();
        repo.expect_load().returning(|_| {
            Ok(vec![VocabularyEntry::new(
                Word::new("Water", "💧").unwrap(),
                Utc::now(),
            )])
        });
        repo.expect_append()
            .returning(|_, _| Err(RepoError::database("vocabulary.append", "disk full")));

        let store = VocabularyStore::open(
            RoomId::default_room(),
            Arc::new(repo),
            Arc::new(FixedClock(Utc::now())),
        )
        .await
        .unwrap();

        let result = store.insert_if_absent(word("Steam", "💨")).await;

        assert!(matches!(result, Err(VocabularyError::Repo(_))));
        assert_eq!(store.word_count().await, 1);
        assert!(store.get(&WordKey::new("steam")).await.is_none());
    }

    #[tokio::test]
    async fn duplicate_rows_in_storage_are_reported() {
        let mut repo = MockVocabularyRepo::new();
        repo.expect_load().returning(|_| {
            Ok(vec![
                VocabularyEntry::new(Word::new("Mud", "🟤").unwrap(), Utc::now()),
                VocabularyEntry::new(Word::new("MUD", "🟫").unwrap(), Utc::now()),
            ])
        });

        let result = VocabularyStore::open(
            RoomId::default_room(),
            Arc::new(repo),
            Arc::new(FixedClock(Utc::now())),
        )
        .await;

        assert!(matches!(result, Err(VocabularyError::Corrupt { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_of_one_word_have_a_single_winner() {
        let (store, _) = fresh_store().await;
        let store = Arc::new(store);

        let tasks: Vec<_> = ["Steam", "steam", " STEAM", "Steam ", "sTeAm", "steam"]
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let store = Arc::clone(&store);
                let emoji = if i % 2 == 0 { "💨" } else { "☁️" };
                let candidate = word(text, emoji);
                tokio::spawn(async move { store.insert_if_absent(candidate).await.unwrap() })
            })
            .collect();

        let outcomes = futures_util::future::join_all(tasks).await;
        let outcomes: Vec<InsertOutcome> = outcomes.into_iter().map(|r| r.unwrap()).collect();

        assert_eq!(outcomes.iter().filter(|o| o.inserted).count(), 1);
        let winner = outcomes.iter().find(|o| o.inserted).unwrap().canonical.clone();
        assert!(outcomes
            .iter()
            .all(|o| o.canonical.same_representation(&winner)));
        assert_eq!(store.word_count().await, 5);
    }
}
