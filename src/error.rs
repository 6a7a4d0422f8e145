//! Error types for directory lookups.
//!
//! Every failure a lookup can hit is one variant of [`LookupError`]. Input
//! validation failures ([`ConfigError`]) and transport failures
//! ([`TransportError`]) convert into it with `?`, so callers only ever see
//! one error type and can still match on the exact cause.

/// Invalid construction or lookup input, detected before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("The API URL cannot be blank")]
    EmptyEndpoint,

    #[error("The subscription key cannot be blank")]
    EmptyCredential,

    #[error("The lookup key cannot be blank")]
    EmptyLookupKey,

    #[error("The subscription key contains characters that are not allowed in an HTTP header")]
    InvalidCredential,

    #[error("Invalid API URL '{0}'")]
    InvalidEndpoint(String),
}

/// Failures reported by the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("TLS error: {0}")]
    TlsError(String),

    #[error("Request was cancelled")]
    Cancelled,
}

/// The outcome of a lookup that did not produce a person record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A successful response whose body was not valid JSON.
    #[error("API response was not valid JSON")]
    MalformedResponse,

    /// Valid JSON, but without the expected result list.
    #[error("API did not provide a proper response")]
    UnexpectedShape,

    /// The result list was empty or its first entry was empty.
    #[error("NetID or UIN not found")]
    NotFound,

    /// The service answered with a non-success status.
    #[error("Response Code: {status} | Error: {message}")]
    RemoteRejected { status: u16, message: String },
}

impl LookupError {
    /// Stable, machine-readable tag for the failure.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Config(_) => "config",
            LookupError::Transport(TransportError::ConnectionFailed(_)) => "connection_failed",
            LookupError::Transport(TransportError::Timeout(_)) => "timeout",
            LookupError::Transport(TransportError::TlsError(_)) => "tls_error",
            LookupError::Transport(TransportError::Cancelled) => "cancelled",
            LookupError::MalformedResponse => "malformed_response",
            LookupError::UnexpectedShape => "unexpected_shape",
            LookupError::NotFound => "not_found",
            LookupError::RemoteRejected { .. } => "remote_rejected",
        }
    }
}
