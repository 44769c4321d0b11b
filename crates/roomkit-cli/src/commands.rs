//! Handlers for CLI commands.
//!
//! Each handler returns the text to print on stdout: pretty JSON for room
//! and stage commands, plain text or TOML for config commands.

use crate::cli::{ConfigAction, RoomAction, StageAction};
use crate::config::RoomkitConfig;
use crate::error::{Error, Result};
use roomkit_core::{
    CreateStageInput, EscapeRoomId, NewEscapeRoom, StageId, StageStore, UserId,
};
use roomkit_stage::StageService;
use serde::Serialize;
use std::path::PathBuf;

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Core(e.into()))
}

// ============================================================================
// Room commands
// ============================================================================

/// Handle a room subcommand.
pub async fn run_room_command(action: RoomAction, store: &dyn StageStore) -> Result<String> {
    match action {
        RoomAction::Create {
            label,
            description,
            user,
        } => {
            let mut room = NewEscapeRoom::new(label, UserId::from(user));
            if let Some(description) = description {
                room = room.with_description(description);
            }
            let room = store.create_escape_room(room).await?;
            tracing::info!(escape_room_id = %room.id, "Escape room created");
            to_json(&room)
        }
    }
}

// ============================================================================
// Stage commands
// ============================================================================

/// Handle a stage subcommand.
pub async fn run_stage_command(action: StageAction, service: &StageService) -> Result<String> {
    match action {
        StageAction::Create {
            room,
            label,
            description,
            background,
            time_limit,
            user,
        } => {
            let mut input = CreateStageInput::new(EscapeRoomId::from(room), label);
            if let Some(description) = description {
                input = input.with_description(description);
            }
            if let Some(background) = background {
                input = input.with_background(background);
            }
            if let Some(seconds) = time_limit {
                input = input.with_time_limit(seconds);
            }
            input.validate()?;
            let stage = service.create_stage(input, &UserId::from(user)).await?;
            to_json(&stage)
        }
        StageAction::List { room, user } => {
            let stages = service
                .find_all_escape_room_stages(&EscapeRoomId::from(room), &UserId::from(user))
                .await?;
            to_json(&stages)
        }
        StageAction::Show { id, user } => {
            let stage = service
                .find_stage_by_id(&StageId::from(id), &UserId::from(user))
                .await?;
            to_json(&stage)
        }
        StageAction::Remove { id, user } => {
            let removed = service
                .remove_stage(&StageId::from(id), &UserId::from(user))
                .await?;
            to_json(&removed)
        }
    }
}

// ============================================================================
// Config commands
// ============================================================================

/// Handle a config subcommand.
pub fn run_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<String> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Init { file, force } => {
            let path = match file {
                Some(p) => PathBuf::from(p),
                None => RoomkitConfig::resolve_config_path(config_path)
                    .ok_or_else(|| Error::config("Could not determine config directory"))?,
            };
            cmd_config_init(path, force)
        }
        ConfigAction::Show => RoomkitConfig::load(config_path)?.to_toml_string(),
    }
}

/// The resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<String> {
    let path = RoomkitConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    if !path.exists() {
        eprintln!("(file does not exist, run `roomkit config init` to create it)");
    }
    Ok(path.display().to_string())
}

/// Write a default config file at `path`.
pub fn cmd_config_init(path: PathBuf, force: bool) -> Result<String> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = RoomkitConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    Ok(format!("Config file created at {}", path.display()))
}

// ============================================================================
// Tests
// ============================================================================
