//! Registry of open rooms.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;

use infcraft_domain::RoomId;

use super::vocabulary::{VocabularyError, VocabularyStore};
use crate::infrastructure::ports::{ClockPort, VocabularyRepo};

/// Hands out the single [`VocabularyStore`] of each room, opening it on first
/// use. Concurrent first requests for a room wait on one load.
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Arc<OnceCell<Arc<VocabularyStore>>>>,
    repo: Arc<dyn VocabularyRepo>,
    clock: Arc<dyn ClockPort>,
}

impl RoomRegistry {
    pub fn new(repo: Arc<dyn VocabularyRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            rooms: DashMap::new(),
            repo,
            clock,
        }
    }

    pub async fn room(&self, id: &RoomId) -> Result<Arc<VocabularyStore>, VocabularyError> {
        // Clone the cell out so no map shard lock is held across the load.
        let cell = self.rooms.entry(id.clone()).or_default().clone();

        let opened = cell
            .get_or_try_init(|| async {
                let store =
                    VocabularyStore::open(id.clone(), self.repo.clone(), self.clock.clone())
                        .await?;
                Ok::<_, VocabularyError>(Arc::new(store))
            })
            .await
            .map(Arc::clone);

        if let Err(e) = &opened {
            // Drop the empty cell unless another caller is still waiting on it.
            let removed = self.rooms.remove_if(id, |_, current| {
                Arc::ptr_eq(current, &cell)
                    && !current.initialized()
                    && Arc::strong_count(current) == 2
            });
            tracing::warn!(
                room_id = %id,
                error = %e,
                forgotten = removed.is_some(),
                "Failed to open room"
            );
        }

        opened
    }

    /// Number of rooms opened so far.
    pub fn open_rooms(&self) -> usize {
        self.rooms.iter().filter(|cell| cell.initialized()).count()
    }
}
