//! Error types for port operations.

use std::fmt;

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage-level uniqueness or shape constraint violated.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("LLM rejected credentials: {0}")]
    Unauthorized(String),
    #[error("LLM unavailable: {0}")]
    Unavailable(String),
    #[error("LLM request timed out: {0}")]
    Timeout(String),
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Why a word could not be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationCause {
    /// Missing or rejected credentials
    Unauthorized,
    /// Backend unreachable or failing
    Unavailable,
    /// Backend did not answer in time
    Timeout,
    /// Backend answered, but not with a usable word
    InvalidResponse,
}

impl fmt::Display for GenerationCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unauthorized => "unauthorized",
            Self::Unavailable => "unavailable",
            Self::Timeout => "timeout",
            Self::InvalidResponse => "invalid response",
        };
        write!(f, "{}", name)
    }
}

/// Failure of a [`WordGeneratorPort`](super::WordGeneratorPort).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Word generation failed ({cause}): {message}")]
pub struct GenerationError {
    pub cause: GenerationCause,
    pub message: String,
}

impl GenerationError {
    pub fn new(cause: GenerationCause, message: impl Into<String>) -> Self {
        Self {
            cause,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(GenerationCause::Unauthorized, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(GenerationCause::Unavailable, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GenerationCause::Timeout, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(GenerationCause::InvalidResponse, message)
    }
}

impl From<LlmError> for GenerationError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Unauthorized(msg) => Self::unauthorized(msg),
            LlmError::Timeout(msg) => Self::timeout(msg),
            LlmError::Unavailable(msg) | LlmError::RequestFailed(msg) => Self::unavailable(msg),
            LlmError::InvalidResponse(msg) => Self::invalid_response(msg),
        }
    }
}
