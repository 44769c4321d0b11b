//! Roomkit CLI
//!
//! Command-line interface for escape room stage authoring.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use roomkit_cli::cli::{Args, Command};
use roomkit_cli::commands::{run_config_command, run_room_command, run_stage_command};
use roomkit_cli::config::RoomkitConfig;
use roomkit_core::{ErrorBody, ErrorCode};
use roomkit_stage::StageService;
use roomkit_store::SqliteStore;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins, then the configured level, then `info`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn open_store(
    config: Option<&str>,
    database: Option<String>,
) -> Result<(RoomkitConfig, Arc<SqliteStore>)> {
    let settings = RoomkitConfig::load(config)?.with_database_url(database);
    init_logging(&settings.logging.level);
    tracing::debug!(
        url = %settings.database.url,
        removal = %settings.stages.removal,
        "Opening store"
    );
    let store = SqliteStore::connect(&settings.store_options())
        .await
        .map_err(roomkit_cli::Error::from)?;
    Ok((settings, Arc::new(store)))
}

async fn run(args: Args) -> Result<String> {
    let Args {
        config,
        database,
        command,
    } = args;

    match command {
        Command::Config { action } => {
            init_logging("info");
            Ok(run_config_command(config.as_deref(), action)?)
        }
        Command::Room { action } => {
            let (_, store) = open_store(config.as_deref(), database).await?;
            let output = run_room_command(action, store.as_ref()).await;
            store.close().await;
            Ok(output?)
        }
        Command::Stage { action } => {
            let (settings, store) = open_store(config.as_deref(), database).await?;
            let service = StageService::new(store.clone()).with_removal(settings.stages.removal);
            let output = run_stage_command(action, &service).await;
            store.close().await;
            Ok(output?)
        }
    }
}

fn error_body(err: &anyhow::Error) -> ErrorBody {
    match err.downcast_ref::<roomkit_cli::Error>() {
        Some(err) => err.to_body(),
        None => ErrorBody {
            code: ErrorCode::InternalServerError,
            message: format!("{err:#}"),
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let body = error_body(&err);
            tracing::debug!(code = %body.code, "Command failed");
            match serde_json::to_string(&body) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{}: {}", body.code, body.message),
            }
            ExitCode::FAILURE
        }
    }
}
