//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Word generation (could swap the LLM-backed generator for a recipe table)
//! - LLM calls (could swap Ollama -> Claude/OpenAI)
//! - Vocabulary persistence (could swap SQLite -> Postgres)
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::VocabularyRepo;

#[cfg(test)]
pub use repos::MockVocabularyRepo;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{
    ChatMessage, FinishReason, LlmPort, LlmRequest, LlmResponse, MessageRole,
    WordGeneratorPort,
};

#[cfg(test)]
pub use external::{MockLlmPort, MockWordGeneratorPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{GenerationCause, GenerationError, LlmError, RepoError};
