//! Handler error module
//!
//! Failure kinds returned by the inner request handler. Translation to HTTP
//! status and body happens in exactly one place, the outermost dispatch in
//! `handler::router`.

use thiserror::Error;

/// Failure kinds for a single request. Every variant is terminal for the
/// current request only.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Path matched no route
    #[error("no route for path")]
    NotFound,

    /// Request rejected by the boundary layer; status and message are
    /// forwarded to the client verbatim
    #[error("request error {status}: {message}")]
    Request { status: u16, message: String },

    /// Anything else; the detail stays server-side
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("serialization failed: {err}"))
    }
}
