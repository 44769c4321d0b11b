//! Error types for roomkit-cli

use roomkit_core::{ErrorBody, ErrorCode};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for roomkit-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in roomkit-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from a stage operation or the core types
    #[error(transparent)]
    Core(#[from] roomkit_core::Error),

    /// Error opening or migrating the store
    #[error(transparent)]
    Store(#[from] roomkit_store::StoreError),

    /// Configuration file problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error on a specific path
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Core(err) => err.code(),
            Error::Store(_) | Error::Config(_) | Error::Io { .. } => {
                ErrorCode::InternalServerError
            }
        }
    }

    /// The `{code, message}` payload printed on failure.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            Error::Core(err) => err.to_body(),
            other => ErrorBody {
                code: other.code(),
                message: other.to_string(),
            },
        }
    }
}
