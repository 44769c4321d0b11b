//! Roomkit Core: shared types, errors, and the store contract.
//!
//! This crate provides the foundational types used across all Roomkit crates.
//! It has no internal Roomkit dependencies and performs no I/O.
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy, stable error codes, and the Result alias
//! - [`types`]: Identifiers, escape rooms, stages, inputs and projections
//! - [`traits`]: The [`StageStore`] contract every backend implements

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export key types at crate root for convenience
pub use error::{Error, ErrorBody, ErrorCode, Result};
pub use traits::StageStore;
pub use types::{
    CreateStageInput, EscapeRoom, EscapeRoomId, EscapeRoomLabel, NewEscapeRoom, NewStage,
    RemovedStage, Stage, StageId, StageWithRoom, UserId,
};
