//! Error types for Roomkit core library.
//!
//! Operations surface exactly two domain error kinds, [`Error::NotFound`] and
//! [`Error::Forbidden`], each carrying a human-readable message and a stable
//! machine-readable [`ErrorCode`]. Store failures are wrapped transparently so
//! their message and source chain reach the caller unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur in Roomkit operations.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The referenced record does not exist, or exists but is not visible
    /// to the caller.
    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// The referenced record exists but the caller may not act on it.
    #[error("{message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// Input schema violation
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// Failure reported by the persistence store.
    #[error(transparent)]
    Store(Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for Roomkit operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new not-found error.
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Error::NotFound {
            message: message.into(),
        }
    }

    /// Creates a new forbidden error.
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Error::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Wraps a store failure without altering it.
    pub fn store<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Store(source.into())
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Returns the stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::NotFound { .. } => ErrorCode::NotFound,
            Error::Forbidden { .. } => ErrorCode::Forbidden,
            Error::Validation { .. } => ErrorCode::BadRequest,
            Error::Store(_) => ErrorCode::InternalServerError,
            Error::Config { .. } => ErrorCode::InternalServerError,
            Error::Io(_) => ErrorCode::InternalServerError,
            Error::Serialization(_) => ErrorCode::InternalServerError,
        }
    }

    /// Whether the caller caused this error (vs. a server-side failure).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. } | Error::Forbidden { .. } | Error::Validation { .. }
        )
    }

    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns `true` for [`Error::Forbidden`].
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Error::Forbidden { .. })
    }

    /// Code and message pair for the transport layer.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// Stable, machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record missing or not visible to the caller.
    NotFound,
    /// Caller is not the owner.
    Forbidden,
    /// Input failed validation.
    BadRequest,
    /// Store, configuration, or I/O failure.
    InternalServerError,
}

impl ErrorCode {
    /// Returns the code as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializable error payload: a code plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
}
