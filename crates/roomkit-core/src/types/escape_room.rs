//! Escape room records.
//!
//! Escape rooms are owned by the surrounding application. Stage operations
//! only ever read the owner of a room, or its label when a stage is fetched
//! with its parent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EscapeRoomId, UserId};

/// A persisted escape room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscapeRoom {
    /// Unique identifier
    pub id: EscapeRoomId,

    /// Display label
    pub label: String,

    /// Optional long-form description
    pub description: Option<String>,

    /// Owner of the room and, transitively, of the right to add stages
    pub created_by_id: UserId,

    /// When the room was created
    pub created_at: DateTime<Utc>,

    /// When the room was last modified
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create an escape room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEscapeRoom {
    /// Display label
    pub label: String,

    /// Optional long-form description
    pub description: Option<String>,

    /// User who becomes the owner
    pub created_by_id: UserId,
}

impl NewEscapeRoom {
    /// Creates a new escape room record owned by `owner`.
    pub fn new(label: impl Into<String>, owner: UserId) -> Self {
        Self {
            label: label.into(),
            description: None,
            created_by_id: owner,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The parent room's label, included when a stage is read by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscapeRoomLabel {
    /// Display label of the parent room
    pub label: String,
}
