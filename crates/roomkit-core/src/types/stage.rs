//! Stage records, creation input, and the projections stage operations return.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{EscapeRoomId, EscapeRoomLabel, StageId, UserId};

/// Maximum length of a stage label, in characters.
pub const MAX_LABEL_LEN: usize = 255;

/// A persisted stage: a single puzzle or step within an escape room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    /// Unique identifier
    pub id: StageId,

    /// Display label
    pub label: String,

    /// Optional long-form description
    pub description: Option<String>,

    /// Optional background reference (image URL or asset key)
    pub background: Option<String>,

    /// Position among sibling stages. Always 0 at creation.
    pub order: i32,

    /// Optional time limit, in seconds
    pub time_limit: Option<i32>,

    /// Owner of the stage
    pub created_by_id: UserId,

    /// Parent escape room
    pub escape_room_id: EscapeRoomId,

    /// When the stage was created
    pub created_at: DateTime<Utc>,

    /// When the stage was last modified
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStageInput {
    /// Escape room the stage belongs to
    pub escape_room_id: EscapeRoomId,

    /// Display label
    pub label: String,

    /// Optional long-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Optional background reference
    #[serde(default)]
    pub background: Option<String>,

    /// Optional time limit, in seconds
    #[serde(default)]
    pub time_limit: Option<i32>,
}

impl CreateStageInput {
    /// Creates a new input with the required fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomkit_core::{CreateStageInput, EscapeRoomId};
    ///
    /// let input = CreateStageInput::new(EscapeRoomId::from("room-1"), "Puzzle 1")
    ///     .with_time_limit(600);
    /// assert!(input.validate().is_ok());
    /// ```
    pub fn new(escape_room_id: EscapeRoomId, label: impl Into<String>) -> Self {
        Self {
            escape_room_id,
            label: label.into(),
            description: None,
            background: None,
            time_limit: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the background reference.
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Sets the time limit in seconds.
    pub fn with_time_limit(mut self, seconds: i32) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    /// Checks the input against the creation schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.escape_room_id.as_str().trim().is_empty() {
            return Err(Error::validation_field(
                "escapeRoomId",
                "must not be empty",
            ));
        }
        if self.label.trim().is_empty() {
            return Err(Error::validation_field("label", "must not be empty"));
        }
        if self.label.chars().count() > MAX_LABEL_LEN {
            return Err(Error::validation_field(
                "label",
                format!("must be at most {MAX_LABEL_LEN} characters"),
            ));
        }
        if let Some(seconds) = self.time_limit
            && seconds <= 0
        {
            return Err(Error::validation_field("timeLimit", "must be positive"));
        }
        Ok(())
    }
}

/// A fully resolved stage insert, ready for the store.
///
/// Only constructible from a [`CreateStageInput`] and the acting user, so
/// `order` is always 0 and `created_by_id` is always the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStage {
    label: String,
    description: Option<String>,
    background: Option<String>,
    order: i32,
    time_limit: Option<i32>,
    created_by_id: UserId,
    escape_room_id: EscapeRoomId,
}

impl NewStage {
    /// Resolves an input into an insert record owned by `user_id`.
    pub fn from_input(input: CreateStageInput, user_id: &UserId) -> Self {
        Self {
            label: input.label,
            description: input.description,
            background: input.background,
            order: 0,
            time_limit: input.time_limit,
            created_by_id: user_id.clone(),
            escape_room_id: input.escape_room_id,
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Optional background reference.
    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Position among siblings.
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Optional time limit in seconds.
    pub fn time_limit(&self) -> Option<i32> {
        self.time_limit
    }

    /// Owner of the new stage.
    pub fn created_by_id(&self) -> &UserId {
        &self.created_by_id
    }

    /// Parent escape room.
    pub fn escape_room_id(&self) -> &EscapeRoomId {
        &self.escape_room_id
    }

    /// Materializes the stage with store-assigned id and timestamp.
    pub fn into_stage(self, id: StageId, now: DateTime<Utc>) -> Stage {
        Stage {
            id,
            label: self.label,
            description: self.description,
            background: self.background,
            order: self.order,
            time_limit: self.time_limit,
            created_by_id: self.created_by_id,
            escape_room_id: self.escape_room_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A stage together with its parent room's label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageWithRoom {
    /// The stage itself
    #[serde(flatten)]
    pub stage: Stage,

    /// Label of the parent escape room
    pub escape_room: EscapeRoomLabel,
}

/// Projection returned when a stage is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedStage {
    /// Id of the deleted stage
    pub id: StageId,

    /// Escape room the stage belonged to
    pub escape_room_id: EscapeRoomId,
}
