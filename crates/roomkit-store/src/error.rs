//! Error types for roomkit-store

use thiserror::Error;

/// Result type alias for backend-internal operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures raised by store backends.
///
/// These never carry domain meaning (absence is reported as `None`), and
/// they reach callers of [`roomkit_core::StageStore`] wrapped in
/// [`roomkit_core::Error::Store`] with display and source unchanged.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// Error from the database driver
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema setup failed
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A stored value could not be decoded
    #[error("Corrupt value in column '{column}': {value}")]
    Corrupt {
        /// Column holding the bad value
        column: &'static str,
        /// The offending value
        value: String,
    },

    /// I/O error (creating the database directory, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for roomkit_core::Error {
    fn from(err: StoreError) -> Self {
        roomkit_core::Error::store(err)
    }
}
