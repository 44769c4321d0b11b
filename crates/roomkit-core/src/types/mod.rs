//! Core types for escape rooms and stages.

mod escape_room;
mod ids;
mod proptests;
mod stage;

pub use escape_room::{EscapeRoom, EscapeRoomLabel, NewEscapeRoom};
pub use ids::{EscapeRoomId, StageId, UserId};
pub use stage::{CreateStageInput, MAX_LABEL_LEN, NewStage, RemovedStage, Stage, StageWithRoom};
