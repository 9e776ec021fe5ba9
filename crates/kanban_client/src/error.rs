//! Error types for the session client.

use kanban_storage::StoreError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Classification of a failed gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No response was received.
    Transport,
    /// The server answered 401.
    Unauthorized,
    /// The server answered 404.
    NotFound,
    /// The server answered 409 with a detail message.
    Conflict,
    /// The server supplied a detail message with another status.
    ServerDetail,
    /// A successful response carried a body that could not be decoded.
    InvalidResponse,
    /// Any other failure status.
    Other,
}

/// A normalized gateway failure.
///
/// The display text is exactly the message written to the operation status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestFailure {
    /// Human-readable message.
    pub message: String,
    /// Failure classification.
    pub kind: FailureKind,
    /// HTTP status, `None` for transport failures.
    pub status: Option<u16>,
}

impl RequestFailure {
    /// Returns true if the server rejected the session.
    pub fn is_unauthorized(&self) -> bool {
        self.kind == FailureKind::Unauthorized
    }
}

/// Errors returned by the session facade.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A gateway call failed.
    #[error(transparent)]
    Request(#[from] RequestFailure),

    /// The call needs a signed-in user and no valid token is reachable.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The call was rejected locally before reaching the server.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The token store failed.
    #[error("token store error: {0}")]
    Store(#[from] StoreError),

    /// The HTTP adapter could not be built.
    #[error("client setup failed: {0}")]
    Setup(String),
}

impl ClientError {
    /// Returns the gateway failure, if this is one.
    pub fn as_request(&self) -> Option<&RequestFailure> {
        match self {
            ClientError::Request(failure) => Some(failure),
            _ => None,
        }
    }

    /// Returns true if the caller should send the user to the login view.
    pub fn requires_login(&self) -> bool {
        match self {
            ClientError::NotAuthenticated => true,
            ClientError::Request(failure) => failure.is_unauthorized(),
            _ => false,
        }
    }
}
