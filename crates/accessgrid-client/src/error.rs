//! Client error taxonomy.

use crate::transport::TransportError;

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, AccessGridError>;

/// Errors surfaced to callers of the client.
#[derive(Debug, thiserror::Error)]
pub enum AccessGridError {
    /// Missing or invalid client configuration; raised before any network call
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The API rejected the credentials (HTTP 401)
    #[error("authentication failed: {message}")]
    Authentication {
        /// Raw response body
        message: String,
    },
    /// The account cannot pay for the operation (HTTP 402)
    #[error("insufficient account balance")]
    InsufficientBalance,
    /// Any other non-2xx response
    #[error("API request failed (status {status}): {message}")]
    ApiRequest {
        /// HTTP status code
        status: u16,
        /// The body's `message` field, or the raw body
        message: String,
    },
    /// A 2xx body did not match the expected shape
    #[error("failed to deserialize response: {0}")]
    Deserialization(#[source] serde_json::Error),
    /// A request body could not be encoded
    #[error("failed to serialize request body: {0}")]
    Serialization(String),
    /// The transport failed before a response was received
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failure class of an [`AccessGridError`], for branching without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`AccessGridError::Configuration`]
    Configuration,
    /// See [`AccessGridError::Authentication`]
    Authentication,
    /// See [`AccessGridError::InsufficientBalance`]
    InsufficientBalance,
    /// See [`AccessGridError::ApiRequest`]
    ApiRequest,
    /// See [`AccessGridError::Deserialization`]
    Deserialization,
    /// See [`AccessGridError::Serialization`]
    Serialization,
    /// See [`AccessGridError::Transport`]
    Transport,
}

impl AccessGridError {
    /// The failure class.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::InsufficientBalance => ErrorKind::InsufficientBalance,
            Self::ApiRequest { .. } => ErrorKind::ApiRequest,
            Self::Deserialization(_) => ErrorKind::Deserialization,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }

    /// HTTP status of the response that caused this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::InsufficientBalance => Some(402),
            Self::ApiRequest { status, .. } => Some(*status),
            _ => None,
        }
    }
}
