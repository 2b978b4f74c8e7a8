//! Core error types.
//!
//! Every failure in this crate degrades a single catalog view. None of these
//! errors is fatal to the process.

use std::fmt;

use thiserror::Error;

/// The item store has no endpoint or credential configured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("item store is not configured (missing {})", .missing.join(", "))]
pub struct UnconfiguredServiceError {
    /// Names of the missing settings.
    pub missing: Vec<&'static str>,
}

impl UnconfiguredServiceError {
    /// Create an error naming the missing settings.
    pub fn new(missing: Vec<&'static str>) -> Self {
        Self { missing }
    }
}

/// What is wrong with a draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A required field is empty or absent.
    Missing,
    /// A list field holds more entries than allowed.
    TooMany {
        /// Maximum allowed entries.
        max: usize,
    },
    /// The value is present but unusable.
    Invalid(String),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Missing => write!(f, "is required"),
            ValidationIssue::TooMany { max } => write!(f, "allows at most {}", max),
            ValidationIssue::Invalid(reason) => write!(f, "is invalid: {}", reason),
        }
    }
}

/// Client-side draft validation failure, scoped to one field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field `{field}` {issue}")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub issue: ValidationIssue,
}

impl ValidationError {
    /// A required field is missing.
    pub fn missing(field: &'static str) -> Self {
        Self {
            field,
            issue: ValidationIssue::Missing,
        }
    }

    /// A list field exceeds its maximum.
    pub fn too_many(field: &'static str, max: usize) -> Self {
        Self {
            field,
            issue: ValidationIssue::TooMany { max },
        }
    }

    /// A field holds an unusable value.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            issue: ValidationIssue::Invalid(reason.into()),
        }
    }
}

/// Reading a collection from the item store failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The store could not be reached.
    #[error("item store unreachable: {0}")]
    Unreachable(String),

    /// The store answered with an error status.
    #[error("item store rejected fetch ({status}): {message}")]
    Rejected {
        /// HTTP-style status code.
        status: u16,
        /// Message returned by the store.
        message: String,
    },

    /// The response could not be decoded into catalog items.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The store is not configured.
    #[error(transparent)]
    Unconfigured(#[from] UnconfiguredServiceError),
}

impl FetchError {
    /// Whether this failure comes from missing configuration.
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, FetchError::Unconfigured(_))
    }
}

/// Writing a new record (or its assets) to the item store failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The store could not be reached.
    #[error("item store unreachable: {0}")]
    Unreachable(String),

    /// The store refused the write.
    #[error("item store rejected write ({status}): {message}")]
    Rejected {
        /// HTTP-style status code.
        status: u16,
        /// Message returned by the store.
        message: String,
    },

    /// The store accepted the write but returned an unreadable record.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Uploading a binary asset failed.
    #[error("failed to upload asset `{file_name}`: {message}")]
    AssetUpload {
        /// Name of the asset being uploaded.
        file_name: String,
        /// Underlying failure.
        message: String,
    },

    /// The slug is already used and the policy forbids suffixing.
    #[error("slug `{0}` is already taken")]
    SlugConflict(String),

    /// Existing slugs could not be read for the collision check.
    #[error("failed to check existing slugs: {0}")]
    SlugLookup(#[source] FetchError),

    /// The store is not configured.
    #[error(transparent)]
    Unconfigured(#[from] UnconfiguredServiceError),
}

/// Errors returned by [`CreationForm::submit`](crate::form::CreationForm::submit).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The draft failed client-side validation. No store call was made.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The draft was valid but could not be persisted. The draft is kept.
    #[error("persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
}

impl SubmitError {
    /// Whether resubmitting the same draft may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SubmitError::Validation(_) => false,
            SubmitError::Persistence(PersistenceError::Unconfigured(_)) => false,
            SubmitError::Persistence(PersistenceError::SlugConflict(_)) => false,
            SubmitError::Persistence(_) => true,
        }
    }
}
