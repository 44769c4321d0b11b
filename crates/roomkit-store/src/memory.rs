//! In-memory store backend.
//!
//! Keeps rooms in a map and stages in insertion order, so listings come back
//! in the order stages were created, the same natural order the SQLite
//! backend yields. Cheap to clone (Arc internals); clones share state.

use async_trait::async_trait;
use chrono::Utc;
use roomkit_core::{
    EscapeRoom, EscapeRoomId, EscapeRoomLabel, NewEscapeRoom, NewStage, RemovedStage, Result,
    Stage, StageId, StageStore, StageWithRoom, UserId,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    rooms: HashMap<EscapeRoomId, EscapeRoom>,
    stages: Vec<Stage>,
}

impl Tables {
    fn position_of(&self, id: &StageId, owner: Option<&UserId>) -> Option<usize> {
        self.stages
            .iter()
            .position(|s| &s.id == id && owner.is_none_or(|o| &s.created_by_id == o))
    }

    fn remove_at(&mut self, index: usize) -> RemovedStage {
        let stage = self.stages.remove(index);
        RemovedStage {
            id: stage.id,
            escape_room_id: stage.escape_room_id,
        }
    }
}

/// Process-local [`StageStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored stages.
    pub async fn stage_count(&self) -> usize {
        self.tables.read().await.stages.len()
    }

    /// Number of stored escape rooms.
    pub async fn escape_room_count(&self) -> usize {
        self.tables.read().await.rooms.len()
    }
}

#[async_trait]
impl StageStore for MemoryStore {
    async fn find_escape_room_owner(&self, id: &EscapeRoomId) -> Result<Option<UserId>> {
        let tables = self.tables.read().await;
        Ok(tables.rooms.get(id).map(|r| r.created_by_id.clone()))
    }

    async fn create_escape_room(&self, room: NewEscapeRoom) -> Result<EscapeRoom> {
        let now = Utc::now();
        let room = EscapeRoom {
            id: EscapeRoomId::generate(),
            label: room.label,
            description: room.description,
            created_by_id: room.created_by_id,
            created_at: now,
            updated_at: now,
        };
        log::debug!("memory: insert escape room {}", room.id);
        self.tables
            .write()
            .await
            .rooms
            .insert(room.id.clone(), room.clone());
        Ok(room)
    }

    async fn find_stages(
        &self,
        escape_room_id: &EscapeRoomId,
        owner: &UserId,
    ) -> Result<Vec<Stage>> {
        let tables = self.tables.read().await;
        Ok(tables
            .stages
            .iter()
            .filter(|s| &s.escape_room_id == escape_room_id && &s.created_by_id == owner)
            .cloned()
            .collect())
    }

    async fn find_stage_with_room(
        &self,
        id: &StageId,
        owner: &UserId,
    ) -> Result<Option<StageWithRoom>> {
        let tables = self.tables.read().await;
        let Some(index) = tables.position_of(id, Some(owner)) else {
            return Ok(None);
        };
        let stage = tables.stages[index].clone();
        // Rooms are never deleted here, but a dangling stage is still
        // reported as absent rather than with an invented label.
        Ok(tables
            .rooms
            .get(&stage.escape_room_id)
            .map(|room| StageWithRoom {
                escape_room: EscapeRoomLabel {
                    label: room.label.clone(),
                },
                stage,
            }))
    }

    async fn find_stage_id(&self, id: &StageId, owner: &UserId) -> Result<Option<StageId>> {
        let tables = self.tables.read().await;
        Ok(tables
            .position_of(id, Some(owner))
            .map(|i| tables.stages[i].id.clone()))
    }

    async fn create_stage(&self, stage: NewStage) -> Result<Stage> {
        let stage = stage.into_stage(StageId::generate(), Utc::now());
        log::debug!(
            "memory: insert stage {} into room {}",
            stage.id,
            stage.escape_room_id
        );
        self.tables.write().await.stages.push(stage.clone());
        Ok(stage)
    }

    async fn delete_stage(&self, id: &StageId) -> Result<Option<RemovedStage>> {
        let mut tables = self.tables.write().await;
        Ok(tables.position_of(id, None).map(|i| tables.remove_at(i)))
    }

    async fn delete_owned_stage(
        &self,
        id: &StageId,
        owner: &UserId,
    ) -> Result<Option<RemovedStage>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .position_of(id, Some(owner))
            .map(|i| tables.remove_at(i)))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
