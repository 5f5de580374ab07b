//! Error Types

use thiserror::Error;

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors surfaced by the backend contract
///
/// The flow layer treats both variants the same way: the call failed and
/// the message (if any) is shown to the user. Distinguishing them matters
/// only for retry heuristics and diagnostics.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend received the call and refused it
    #[error("{0}")]
    Rejected(String),

    /// The call never completed (network failure, timeout)
    #[error("transport error: {0}")]
    Transport(String),
}

impl BackendError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, BackendError::Transport(_))
    }

    /// Convert to a user-friendly message
    ///
    /// The backend's own message is surfaced verbatim when present; an
    /// empty message falls back to a generic one.
    pub fn user_message(&self) -> String {
        let msg = match self {
            BackendError::Rejected(msg) | BackendError::Transport(msg) => msg,
        };
        if msg.is_empty() {
            "Failed to confirm payment. Please contact support.".into()
        } else {
            msg.clone()
        }
    }
}

impl From<anyhow::Error> for BackendError {
    fn from(err: anyhow::Error) -> Self {
        BackendError::Rejected(err.to_string())
    }
}
