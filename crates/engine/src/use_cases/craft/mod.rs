//! Craft use case: combine two words of a room into a (possibly new) word.
//!
//! Flow per request: `Pending -> Generating -> Merging -> {Done, Failed}`.
//! Only the merge step takes the room lock; generation runs unlocked so a slow
//! backend never blocks other crafts in the same room.

use std::sync::Arc;

use tracing::Instrument;

use infcraft_domain::{
    CraftId, CraftPair, CraftPhase, CraftResult, DomainError, RoomId, Word, WordKey,
};

use crate::infrastructure::ports::{GenerationError, WordGeneratorPort};
use crate::stores::{RoomRegistry, VocabularyError, VocabularyStore};

/// Container for craft use cases.
pub struct CraftUseCases {
    pub craft: Arc<CraftCoordinator>,
}

impl CraftUseCases {
    pub fn new(craft: Arc<CraftCoordinator>) -> Self {
        Self { craft }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CraftError {
    #[error("{0}")]
    Validation(DomainError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("Vocabulary storage failed: {0}")]
    Storage(#[from] VocabularyError),
    #[error("Craft failed internally: {0}")]
    Internal(String),
}

/// Tracks and logs one request's phase.
struct CraftTracker {
    id: CraftId,
    phase: CraftPhase,
}

impl CraftTracker {
    fn new(id: CraftId) -> Self {
        Self {
            id,
            phase: CraftPhase::Pending,
        }
    }

    fn enter(&mut self, next: CraftPhase) -> Result<(), CraftError> {
        self.phase = self
            .phase
            .advance(next)
            .map_err(|e| CraftError::Internal(e.to_string()))?;
        tracing::debug!(craft_id = %self.id, phase = %self.phase, "Craft phase changed");
        Ok(())
    }

    /// Record failure and hand the error back.
    fn fail(&mut self, error: CraftError) -> CraftError {
        if let Ok(phase) = self.phase.advance(CraftPhase::Failed) {
            self.phase = phase;
        }
        tracing::warn!(craft_id = %self.id, error = %error, "Craft failed");
        error
    }
}

/// Orchestrates craft requests end to end (`craftNoun`).
pub struct CraftCoordinator {
    rooms: Arc<RoomRegistry>,
    generator: Arc<dyn WordGeneratorPort>,
}

impl CraftCoordinator {
    pub fn new(rooms: Arc<RoomRegistry>, generator: Arc<dyn WordGeneratorPort>) -> Self {
        Self { rooms, generator }
    }

    /// Craft `a` with `b` in `room`.
    ///
    /// Generation and merge run on a spawned task: a caller that goes away
    /// mid-request does not stop the result from reaching the vocabulary.
    pub async fn craft(&self, room: &RoomId, a: Word, b: Word) -> Result<CraftResult, CraftError> {
        let craft_id = CraftId::new();
        let span = tracing::info_span!("craft", room_id = %room, craft_id = %craft_id);
        let mut tracker = CraftTracker::new(craft_id);

        let (store, pair) = match self.prepare(room, a, b).instrument(span.clone()).await {
            Ok(prepared) => prepared,
            Err(e) => return Err(span.in_scope(|| tracker.fail(e))),
        };

        let generator = Arc::clone(&self.generator);
        let task = tokio::spawn(
            async move { run(tracker, store, generator, pair).await }.instrument(span),
        );

        task.await.map_err(|e| {
            tracing::error!(craft_id = %craft_id, error = %e, "Craft task did not complete");
            CraftError::Internal(e.to_string())
        })?
    }

    /// Validate the request and resolve both words to their stored form.
    async fn prepare(
        &self,
        room: &RoomId,
        a: Word,
        b: Word,
    ) -> Result<(Arc<VocabularyStore>, CraftPair), CraftError> {
        let requested = CraftPair::new(a, b).map_err(CraftError::Validation)?;
        let store = self.rooms.room(room).await?;

        let first = resolve(&store, requested.first()).await?;
        let second = resolve(&store, requested.second()).await?;
        let pair = CraftPair::new(first, second).map_err(CraftError::Validation)?;

        tracing::info!(pair = %pair, "Crafting");
        Ok((store, pair))
    }
}

async fn resolve(store: &VocabularyStore, word: &Word) -> Result<Word, CraftError> {
    store.get(word.key()).await.ok_or_else(|| {
        CraftError::Validation(DomainError::validation(format!(
            "'{}' is not in this room's vocabulary",
            word.text()
        )))
    })
}

async fn run(
    mut tracker: CraftTracker,
    store: Arc<VocabularyStore>,
    generator: Arc<dyn WordGeneratorPort>,
    pair: CraftPair,
) -> Result<CraftResult, CraftError> {
    tracker.enter(CraftPhase::Generating)?;
    let candidate = match generator.generate(&pair).await {
        Ok(candidate) => candidate,
        Err(e) => return Err(tracker.fail(e.into())),
    };

    let blank = WordKey::new(&candidate.text).is_empty();
    let word = match candidate.into_word() {
        Ok(word) => word,
        Err(e) if blank => return Err(tracker.fail(CraftError::Validation(e))),
        // Overlong text or emoji: the backend broke the reply contract.
        Err(e) => {
            let error = GenerationError::invalid_response(format!("Unusable word: {}", e));
            return Err(tracker.fail(error.into()));
        }
    };

    tracker.enter(CraftPhase::Merging)?;
    let outcome = match store.insert_if_absent(word).await {
        Ok(outcome) => outcome,
        Err(e) => return Err(tracker.fail(e.into())),
    };

    tracker.enter(CraftPhase::Done)?;
    tracing::info!(
        word = %outcome.canonical,
        is_new = outcome.inserted,
        "Craft complete"
    );

    Ok(CraftResult {
        word: outcome.canonical,
        is_new_to_vocabulary: outcome.inserted,
    })
}
