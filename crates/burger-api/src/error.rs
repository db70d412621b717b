//! API error taxonomy.
//!
//! Errors are tagged at the HTTP boundary; downstream code matches on the
//! variant, never on message text.

use burger_storage::StorageError;
use thiserror::Error;

/// Wire literal the remote API uses to signal an expired access credential.
///
/// External contract of the remote API: this exact string is recognized when
/// a failure envelope is parsed, and nowhere else.
pub const JWT_EXPIRED_MESSAGE: &str = "jwt expired";

/// Error type for API operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport/network failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Application-level failure: `success: false` or a non-OK status
    #[error("API request failed: {}", .message.as_deref().unwrap_or("no message"))]
    Application { message: Option<String> },

    /// The access credential expired; the one error kind that triggers
    /// automatic recovery
    #[error("access credential expired")]
    ExpiredCredential,

    /// An authenticated call was attempted without a complete credential pair
    #[error("no stored credential pair")]
    MissingCredentials,

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Classify a parsed failure envelope by its message.
    pub(crate) fn from_failure_message(message: Option<String>) -> Self {
        match message.as_deref() {
            Some(JWT_EXPIRED_MESSAGE) => ApiError::ExpiredCredential,
            _ => ApiError::Application { message },
        }
    }

    /// The message carried by the failure, if any.
    ///
    /// State reducers surface this to the user and fall back to a fixed
    /// per-operation default when it is `None`.
    pub fn message(&self) -> Option<String> {
        match self {
            ApiError::Application { message } => message.clone(),
            ApiError::ExpiredCredential => Some(JWT_EXPIRED_MESSAGE.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// Whether this is the recoverable expired-credential failure.
    pub fn is_expired_credential(&self) -> bool {
        matches!(self, ApiError::ExpiredCredential)
    }
}
