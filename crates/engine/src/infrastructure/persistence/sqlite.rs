//! SQLite-backed vocabulary storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use infcraft_domain::{RoomId, VocabularyEntry, Word};

use crate::infrastructure::ports::{RepoError, VocabularyRepo};

/// SQLite implementation for room vocabularies.
///
/// Rows keep their autoincrement `position`, which is the room's discovery
/// order. `UNIQUE (room_id, word_key)` backs the no-duplicates invariant at the
/// storage level as well.
pub struct SqliteVocabularyRepo {
    pool: SqlitePool,
}

impl SqliteVocabularyRepo {
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("vocabulary", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vocabulary_words (
                position INTEGER PRIMARY KEY AUTOINCREMENT,
                room_id TEXT NOT NULL,
                word_key TEXT NOT NULL,
                text TEXT NOT NULL,
                emoji TEXT NOT NULL,
                discovered_at TEXT NOT NULL,
                UNIQUE (room_id, word_key)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("vocabulary", e))?;

        Ok(Self { pool })
    }

    /// Insert `entries` in one transaction; any failure rolls back the batch.
    async fn insert_all(
        &self,
        room: &RoomId,
        entries: &[VocabularyEntry],
        operation: &'static str,
    ) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database(operation, e))?;

        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO vocabulary_words (room_id, word_key, text, emoji, discovered_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(room.as_str())
            .bind(entry.word.key().as_str())
            .bind(entry.word.text())
            .bind(entry.word.emoji())
            .bind(entry.discovered_at.to_rfc3339())
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error(room, entry, e, operation))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database(operation, e))?;
        Ok(())
    }
}

#[async_trait]
impl VocabularyRepo for SqliteVocabularyRepo {
    async fn load(&self, room: &RoomId) -> Result<Vec<VocabularyEntry>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT text, emoji, discovered_at
            FROM vocabulary_words
            WHERE room_id = ?
            ORDER BY position ASC
            "#,
        )
        .bind(room.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("vocabulary.load", e))?;

        rows.into_iter()
            .map(|row| {
                let text: String = row.get("text");
                let emoji: String = row.get("emoji");
                let discovered_at: String = row.get("discovered_at");

                let word = Word::new(&text, &emoji).map_err(RepoError::serialization)?;
                let discovered_at = DateTime::parse_from_rfc3339(&discovered_at)
                    .map_err(RepoError::serialization)?
                    .with_timezone(&Utc);
                Ok(VocabularyEntry::new(word, discovered_at))
            })
            .collect()
    }

    async fn append(&self, room: &RoomId, entry: &VocabularyEntry) -> Result<(), RepoError> {
        self.insert_all(room, std::slice::from_ref(entry), "vocabulary.append")
            .await
    }

    async fn append_all(
        &self,
        room: &RoomId,
        entries: &[VocabularyEntry],
    ) -> Result<(), RepoError> {
        self.insert_all(room, entries, "vocabulary.append_all").await
    }
}

fn insert_error(
    room: &RoomId,
    entry: &VocabularyEntry,
    error: sqlx::Error,
    operation: &'static str,
) -> RepoError {
    let unique = error
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);
    if unique {
        RepoError::constraint(format!(
            "word '{}' already stored for room {}",
            entry.word.key(),
            room
        ))
    } else {
        RepoError::database(operation, error)
    }
}
