//! Repository port traits for vocabulary persistence.

use async_trait::async_trait;

use infcraft_domain::{RoomId, VocabularyEntry};

use super::error::RepoError;

// =============================================================================
// Vocabulary Storage
// =============================================================================

/// Durable storage for room vocabularies.
///
/// `append` is only ever called from inside a room's merge critical section,
/// so implementations see appends for one room strictly in order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VocabularyRepo: Send + Sync {
    /// Entries for `room` in discovery order; empty for an unknown room.
    async fn load(&self, room: &RoomId) -> Result<Vec<VocabularyEntry>, RepoError>;

    /// Persist `entry` as the newest word of `room`.
    async fn append(&self, room: &RoomId, entry: &VocabularyEntry) -> Result<(), RepoError>;

    /// Persist `entries` in order, all or nothing.
    async fn append_all(
        &self,
        room: &RoomId,
        entries: &[VocabularyEntry],
    ) -> Result<(), RepoError>;
}
