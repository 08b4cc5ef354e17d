//! Failure taxonomy for API and session operations.

/// Errors produced by REST calls and login.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Bad credentials, or a token the server no longer accepts.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// Input rejected before any request was sent.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Non-success HTTP status other than 401.
    #[error("request failed: status {status}")]
    Status { status: u16 },

    /// The response body did not match the expected schema.
    #[error("response parse failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether this error means the current session is no longer valid.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}
