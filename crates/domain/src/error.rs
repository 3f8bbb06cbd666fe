//! Unified error types for the domain layer
//!
//! Every domain constructor and state transition reports failure through
//! [`DomainError`], so adapters never have to fall back to strings or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., empty word text, self-craft)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl DomainError {
    /// Creates a validation error for rejected input.
    ///
    /// Use this when a caller handed the domain something it can never accept:
    /// - Word text that is empty after normalization
    /// - Text or emoji that exceed their length limits
    /// - A craft pair made of the same word twice
    ///
    /// # Example
    /// ```ignore
    /// if key.is_empty() {
    ///     return Err(DomainError::validation("Word text cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("cannot craft a word with itself");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation failed: cannot craft a word with itself"
        );
    }

    #[test]
    fn test_invalid_id_error() {
        let err = DomainError::invalid_id("Room id cannot be empty");
        assert!(matches!(err, DomainError::InvalidId(_)));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_invalid_state_transition_error() {
        let err = DomainError::invalid_state_transition("Done -> Generating");
        assert_eq!(
            err.to_string(),
            "Invalid state transition: Done -> Generating"
        );
    }
}
