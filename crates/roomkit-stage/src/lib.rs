//! # roomkit-stage
//!
//! Ownership-checked create, read, list, and remove operations for stages.
//!
//! The operations are available as free functions generic over any
//! [`StageStore`](roomkit_core::StageStore), and bundled on [`StageService`]
//! for callers that hold a long-lived store handle.
//!
//! # Example
//!
//! ```rust,ignore
//! use roomkit_core::{CreateStageInput, EscapeRoomId, UserId};
//! use roomkit_stage::StageService;
//! use roomkit_store::MemoryStore;
//! use std::sync::Arc;
//!
//! let service = StageService::new(Arc::new(MemoryStore::new()));
//! let owner = UserId::from("owner-1");
//! let input = CreateStageInput::new(EscapeRoomId::from("room-1"), "Puzzle 1");
//! let stage = service.create_stage(input, &owner).await?;
//! ```

#![forbid(unsafe_code)]

pub mod service;

pub use service::{
    ESCAPE_ROOM_NOT_FOUND, NOT_ALLOWED_TO_ADD_STAGE, RemovalStrategy, STAGE_DOES_NOT_EXIST,
    STAGE_NOT_FOUND_OR_NOT_ALLOWED, StageService, create_stage, find_all_escape_room_stages,
    find_stage_by_id, remove_stage, remove_stage_conditional,
};

// Re-export core types
pub use roomkit_core::{Error, Result};
