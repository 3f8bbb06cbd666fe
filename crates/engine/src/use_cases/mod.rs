//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across stores and ports to fulfill user stories.

pub mod craft;
pub mod vocabulary;

pub use craft::{CraftCoordinator, CraftError, CraftUseCases};
pub use vocabulary::{ListNouns, VocabularyUseCases};
