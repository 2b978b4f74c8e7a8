//! Client error types.

use thiserror::Error;
use wayfarer_core::{FetchError, PersistenceError, UnconfiguredServiceError};

/// Client errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure (DNS, TLS, timeout, connection reset).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, usually a JSON error object.
        body: String,
    },

    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A row decoded but is missing data the catalog needs.
    #[error("invalid row: {0}")]
    InvalidRow(String),

    /// Object storage failure.
    #[error("object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// Endpoint or key missing.
    #[error(transparent)]
    Unconfigured(#[from] UnconfiguredServiceError),
}

impl From<Error> for FetchError {
    fn from(error: Error) -> Self {
        match error {
            Error::Http(e) if e.is_decode() => FetchError::Malformed(e.to_string()),
            Error::Http(e) => FetchError::Unreachable(e.to_string()),
            Error::Status { status, body } => FetchError::Rejected {
                status,
                message: body,
            },
            Error::Decode(e) => FetchError::Malformed(e.to_string()),
            Error::InvalidRow(message) => FetchError::Malformed(message),
            Error::ObjectStore(e) => FetchError::Unreachable(e.to_string()),
            Error::Unconfigured(e) => FetchError::Unconfigured(e),
        }
    }
}

impl From<Error> for PersistenceError {
    fn from(error: Error) -> Self {
        match error {
            Error::Http(e) if e.is_decode() => PersistenceError::Malformed(e.to_string()),
            Error::Http(e) => PersistenceError::Unreachable(e.to_string()),
            Error::Status { status, body } => PersistenceError::Rejected {
                status,
                message: body,
            },
            Error::Decode(e) => PersistenceError::Malformed(e.to_string()),
            Error::InvalidRow(message) => PersistenceError::Malformed(message),
            Error::ObjectStore(e) => PersistenceError::Unreachable(e.to_string()),
            Error::Unconfigured(e) => PersistenceError::Unconfigured(e),
        }
    }
}
