//! Error type for the backend REST client.

use crate::error::SessionError;

/// Errors surfaced by [`PromptApiClient`](super::PromptApiClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A local gate refused the operation before any request was issued.
    #[error(transparent)]
    Blocked(#[from] SessionError),

    /// The request never produced an HTTP response (connect, timeout, body
    /// read).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status. The message is taken
    /// from the backend's error body when it parses, the raw body otherwise.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape, or failed
    /// boundary validation.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
