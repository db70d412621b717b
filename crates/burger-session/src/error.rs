//! Session error types.

use burger_api::ApiError;
use burger_storage::StorageError;
use thiserror::Error;

/// Session operation error.
///
/// Failures are always recorded in the session state before being returned;
/// the typed error exists for callers that log or branch on the cause.
#[derive(Error, Debug)]
pub enum SessionError {
    /// API error
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Invalid transition in the session lifecycle machine
    #[error("Invalid session state transition: {0}")]
    InvalidTransition(String),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
