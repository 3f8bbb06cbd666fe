//! Response bodies for the room transport.

use serde::{Deserialize, Serialize};

/// A word as clients see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounData {
    pub text: String,
    #[serde(default)]
    pub emoji: String,
}

/// Result of a craft, flattened the way the web client consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftNounResponse {
    pub text: String,
    pub emoji: String,
    /// False when the crafted noun was already in the room
    pub is_new_to_room: bool,
}

/// Error classification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // === Client Errors (4xx) ===
    /// Request data failed validation
    ValidationError,
    /// The generation backend rejected our credentials
    Unauthorized,

    // === Server Errors (5xx) ===
    /// Internal server error
    InternalError,
    /// Generation backend is unavailable or answered garbage
    ServiceUnavailable,
    /// Generation backend timed out
    Timeout,

    /// Unknown variant for forward compatibility
    #[serde(other)]
    Unknown,
}

/// Error envelope returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorCode,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
        }
    }
}
