//! # roomkit-store
//!
//! Store backends implementing [`roomkit_core::StageStore`].
//!
//! - [`MemoryStore`]: in-process store, insertion ordered (tests, tooling)
//! - [`SqliteStore`]: SQLite via sqlx (requires the `sqlite` feature, on by default)

#![forbid(unsafe_code)]

pub mod error;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteStore, SqliteStoreOptions};
