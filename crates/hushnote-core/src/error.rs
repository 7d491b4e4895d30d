//! Error types for hushnote.

use thiserror::Error;

/// Result type alias using hushnote's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for hushnote operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed client input (wrong PIN length, non-digit characters, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// PIN verification or reset confirmation failed
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Note not found or not owned by the requester
    #[error("Note not found: {0}")]
    NoteNotFound(uuid::Uuid),

    /// Note image not found or not owned by the requester
    #[error("Image not found: {0}")]
    ImageNotFound(uuid::Uuid),

    /// Credential hashing failed
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(e.to_string())
    }
}
