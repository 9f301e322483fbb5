use thiserror::Error;

/// Closed error taxonomy for the API layer.
///
/// Every failure a caller can observe from this crate is one of these
/// variants; no other error type escapes the service layer. Each variant
/// carries a human-readable description suitable for direct display.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A request path failed to compose into a valid URL. Fatal to that
    /// call only.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    /// Safe to retry at the caller's discretion; this layer never retries.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response body did not match the expected schema. Indicates a
    /// client/server contract mismatch and is never silently coerced.
    #[error("Could not read the server response: {0}")]
    Decode(String),

    /// HTTP 401. The session is invalid; callers should log out or
    /// restore, not retry the call.
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,

    /// HTTP 403. Permission denied; not a session problem.
    #[error("You don't have permission to do that.")]
    Forbidden,

    /// Any other non-2xx status, with a best-effort extracted message.
    #[error("{0}")]
    Server(String),

    /// A request payload failed local validation before it was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ApiError {
    /// Whether this error means the current token is no longer usable.
    pub fn is_session_invalid(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
