//! Ownership-checked stage operations.
//!
//! Every operation is stateless: it reads ownership from the store, decides,
//! and performs at most one mutation. Errors are raised at the point of
//! detection and never retried; store failures pass through untouched.
//!
//! Visibility rules:
//! - Creating a stage requires owning the parent escape room. A room that
//!   exists but belongs to someone else yields [`Error::Forbidden`].
//! - Reading or removing a stage filters by owner, so a stage owned by
//!   someone else is indistinguishable from a missing one ([`Error::NotFound`]).
//! - Listing filters by owner and returns an empty list for non-owners.

use roomkit_core::{
    CreateStageInput, Error, EscapeRoomId, NewStage, RemovedStage, Result, Stage, StageId,
    StageStore, StageWithRoom, UserId,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Message for a create against a missing escape room.
pub const ESCAPE_ROOM_NOT_FOUND: &str = "Escape room not found.";

/// Message for a create against someone else's escape room.
pub const NOT_ALLOWED_TO_ADD_STAGE: &str = "You are not allowed to add stage in this escape room.";

/// Message for a read of a missing or foreign stage.
pub const STAGE_NOT_FOUND_OR_NOT_ALLOWED: &str = "Stage not found or not allowed to you.";

/// Message for a removal of a missing or foreign stage.
pub const STAGE_DOES_NOT_EXIST: &str = "Stage does not exists.";

/// Create a stage in an escape room owned by `user_id`.
///
/// The new stage starts at `order` 0 and is owned by `user_id`.
///
/// # Errors
///
/// - [`Error::NotFound`] if the escape room does not exist
/// - [`Error::Forbidden`] if the escape room belongs to another user
/// - [`Error::Store`] if the store fails
pub async fn create_stage<S>(input: CreateStageInput, user_id: &UserId, store: &S) -> Result<Stage>
where
    S: StageStore + ?Sized,
{
    tracing::debug!(
        user_id = %user_id,
        escape_room_id = %input.escape_room_id,
        "Creating stage"
    );

    let Some(owner) = store.find_escape_room_owner(&input.escape_room_id).await? else {
        return Err(Error::not_found(ESCAPE_ROOM_NOT_FOUND));
    };

    if &owner != user_id {
        tracing::warn!(
            user_id = %user_id,
            escape_room_id = %input.escape_room_id,
            "Rejected stage creation in escape room owned by another user"
        );
        return Err(Error::forbidden(NOT_ALLOWED_TO_ADD_STAGE));
    }

    let stage = store
        .create_stage(NewStage::from_input(input, user_id))
        .await?;

    tracing::info!(
        stage_id = %stage.id,
        escape_room_id = %stage.escape_room_id,
        "Stage created"
    );
    Ok(stage)
}

/// All stages in `escape_room_id` owned by `user_id`, in store order.
///
/// Returns an empty list, not an error, when nothing matches, including
/// when the caller does not own the room.
pub async fn find_all_escape_room_stages<S>(
    escape_room_id: &EscapeRoomId,
    user_id: &UserId,
    store: &S,
) -> Result<Vec<Stage>>
where
    S: StageStore + ?Sized,
{
    let stages = store.find_stages(escape_room_id, user_id).await?;
    tracing::debug!(
        user_id = %user_id,
        escape_room_id = %escape_room_id,
        count = stages.len(),
        "Listed stages"
    );
    Ok(stages)
}

/// The stage `stage_id` owned by `user_id`, with its escape room's label.
///
/// # Errors
///
/// - [`Error::NotFound`] if the stage is missing or owned by another user
/// - [`Error::Store`] if the store fails
pub async fn find_stage_by_id<S>(
    stage_id: &StageId,
    user_id: &UserId,
    store: &S,
) -> Result<StageWithRoom>
where
    S: StageStore + ?Sized,
{
    tracing::debug!(user_id = %user_id, stage_id = %stage_id, "Fetching stage");
    store
        .find_stage_with_room(stage_id, user_id)
        .await?
        .ok_or_else(|| Error::not_found(STAGE_NOT_FOUND_OR_NOT_ALLOWED))
}

/// Remove the stage `stage_id` owned by `user_id`: look it up, then delete it.
///
/// The lookup and the delete are two separate store calls. If a concurrent
/// caller deletes the stage in between, the delete affects nothing and this
/// reports [`Error::NotFound`] as if the lookup had missed.
///
/// # Errors
///
/// - [`Error::NotFound`] if the stage is missing or owned by another user
/// - [`Error::Store`] if the store fails
pub async fn remove_stage<S>(stage_id: &StageId, user_id: &UserId, store: &S) -> Result<RemovedStage>
where
    S: StageStore + ?Sized,
{
    let Some(found) = store.find_stage_id(stage_id, user_id).await? else {
        return Err(Error::not_found(STAGE_DOES_NOT_EXIST));
    };

    let removed = store
        .delete_stage(&found)
        .await?
        .ok_or_else(|| Error::not_found(STAGE_DOES_NOT_EXIST))?;

    tracing::info!(
        user_id = %user_id,
        stage_id = %removed.id,
        escape_room_id = %removed.escape_room_id,
        "Stage removed"
    );
    Ok(removed)
}

/// Remove the stage `stage_id` owned by `user_id` with a single conditional
/// delete.
///
/// Observably identical to [`remove_stage`] except that there is no window
/// between the ownership check and the delete.
pub async fn remove_stage_conditional<S>(
    stage_id: &StageId,
    user_id: &UserId,
    store: &S,
) -> Result<RemovedStage>
where
    S: StageStore + ?Sized,
{
    let removed = store
        .delete_owned_stage(stage_id, user_id)
        .await?
        .ok_or_else(|| Error::not_found(STAGE_DOES_NOT_EXIST))?;

    tracing::info!(
        user_id = %user_id,
        stage_id = %removed.id,
        escape_room_id = %removed.escape_room_id,
        "Stage removed"
    );
    Ok(removed)
}

/// How [`StageService::remove_stage`] deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalStrategy {
    /// Ownership lookup, then delete by id ([`remove_stage`]).
    #[default]
    LookupThenDelete,
    /// One delete filtered by id and owner ([`remove_stage_conditional`]).
    Conditional,
}

impl fmt::Display for RemovalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalStrategy::LookupThenDelete => write!(f, "lookup_then_delete"),
            RemovalStrategy::Conditional => write!(f, "conditional"),
        }
    }
}

/// Stage operations bound to a store.
///
/// Cheap to clone (Arc internals).
#[derive(Clone)]
pub struct StageService {
    store: Arc<dyn StageStore>,
    removal: RemovalStrategy,
}

impl StageService {
    /// Creates a service over `store` with the default removal strategy.
    pub fn new(store: Arc<dyn StageStore>) -> Self {
        Self {
            store,
            removal: RemovalStrategy::default(),
        }
    }

    /// Sets the removal strategy.
    pub fn with_removal(mut self, removal: RemovalStrategy) -> Self {
        self.removal = removal;
        self
    }

    /// The configured removal strategy.
    pub fn removal(&self) -> RemovalStrategy {
        self.removal
    }

    /// The underlying store.
    pub fn store(&self) -> &dyn StageStore {
        self.store.as_ref()
    }

    /// See [`create_stage`].
    pub async fn create_stage(&self, input: CreateStageInput, user_id: &UserId) -> Result<Stage> {
        create_stage(input, user_id, self.store()).await
    }

    /// See [`find_all_escape_room_stages`].
    pub async fn find_all_escape_room_stages(
        &self,
        escape_room_id: &EscapeRoomId,
        user_id: &UserId,
    ) -> Result<Vec<Stage>> {
        find_all_escape_room_stages(escape_room_id, user_id, self.store()).await
    }

    /// See [`find_stage_by_id`].
    pub async fn find_stage_by_id(
        &self,
        stage_id: &StageId,
        user_id: &UserId,
    ) -> Result<StageWithRoom> {
        find_stage_by_id(stage_id, user_id, self.store()).await
    }

    /// Removes a stage using the configured [`RemovalStrategy`].
    pub async fn remove_stage(&self, stage_id: &StageId, user_id: &UserId) -> Result<RemovedStage> {
        match self.removal {
            RemovalStrategy::LookupThenDelete => {
                remove_stage(stage_id, user_id, self.store()).await
            }
            RemovalStrategy::Conditional => {
                remove_stage_conditional(stage_id, user_id, self.store()).await
            }
        }
    }
}

impl fmt::Debug for StageService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageService")
            .field("store", &self.store.name())
            .field("removal", &self.removal)
            .finish()
    }
}
