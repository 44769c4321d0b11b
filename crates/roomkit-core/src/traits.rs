//! The persistence contract stage operations are written against.
//!
//! This module defines the [`StageStore`] trait that all store backends
//! must satisfy. Each method is a single round-trip to the store: a unique
//! lookup with a projection, a filtered listing, a create, or a delete.
//!
//! # Backends
//!
//! - `MemoryStore`: In-process store for tests and local tooling
//! - `SqliteStore`: SQLite via sqlx (requires the `sqlite` feature)
//!
//! Both live in `roomkit-store`.
//!
//! # Errors
//!
//! Backends report their own failures through [`Error::Store`](crate::Error::Store).
//! Absence is never an error at this layer: lookups return `None` and the
//! caller decides what "not found" means.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    EscapeRoom, EscapeRoomId, NewEscapeRoom, NewStage, RemovedStage, Stage, StageId,
    StageWithRoom, UserId,
};

/// Abstract persistence store for escape rooms and stages.
#[async_trait]
pub trait StageStore: Send + Sync {
    /// Look up an escape room by id, projecting only its owner.
    async fn find_escape_room_owner(&self, id: &EscapeRoomId) -> Result<Option<UserId>>;

    /// Insert an escape room; the store assigns id and timestamps.
    async fn create_escape_room(&self, room: NewEscapeRoom) -> Result<EscapeRoom>;

    /// All stages in `escape_room_id` created by `owner`, in storage order.
    async fn find_stages(&self, escape_room_id: &EscapeRoomId, owner: &UserId)
    -> Result<Vec<Stage>>;

    /// The stage matching both `id` and `owner`, with its room's label.
    async fn find_stage_with_room(
        &self,
        id: &StageId,
        owner: &UserId,
    ) -> Result<Option<StageWithRoom>>;

    /// The id of the stage matching both `id` and `owner`, if any.
    async fn find_stage_id(&self, id: &StageId, owner: &UserId) -> Result<Option<StageId>>;

    /// Insert a stage; the store assigns id and timestamps.
    async fn create_stage(&self, stage: NewStage) -> Result<Stage>;

    /// Delete a stage by id.
    ///
    /// Returns `None` when no row was affected.
    async fn delete_stage(&self, id: &StageId) -> Result<Option<RemovedStage>>;

    /// Delete the stage matching both `id` and `owner` in one statement.
    ///
    /// Returns `None` when no row was affected.
    async fn delete_owned_stage(
        &self,
        id: &StageId,
        owner: &UserId,
    ) -> Result<Option<RemovedStage>>;

    /// Get the backend name for diagnostics.
    fn name(&self) -> &str;

    /// Check store connectivity.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
