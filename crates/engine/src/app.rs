//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, VocabularyRepo, WordGeneratorPort};
use crate::stores::RoomRegistry;
use crate::use_cases::{
    CraftCoordinator, CraftUseCases, ListNouns, VocabularyUseCases,
};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub rooms: Arc<RoomRegistry>,
}

/// Container for all use cases.
pub struct UseCases {
    pub craft: CraftUseCases,
    pub vocabulary: VocabularyUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        repo: Arc<dyn VocabularyRepo>,
        generator: Arc<dyn WordGeneratorPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let rooms = Arc::new(RoomRegistry::new(repo, clock));

        let craft = CraftUseCases::new(Arc::new(CraftCoordinator::new(
            rooms.clone(),
            generator,
        )));
        let vocabulary = VocabularyUseCases::new(Arc::new(ListNouns::new(rooms.clone())));

        Self {
            use_cases: UseCases { craft, vocabulary },
            rooms,
        }
    }
}
