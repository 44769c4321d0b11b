//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Roomkit - escape room stage authoring
#[derive(Parser, Debug)]
#[command(name = "roomkit")]
#[command(author, version, about = "Escape room stage authoring tool", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "ROOMKIT_CONFIG", global = true)]
    pub config: Option<String>,

    /// Database URL, overriding the configured one
    #[arg(long, env = "ROOMKIT_DATABASE_URL", global = true)]
    pub database: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Escape room operations
    Room {
        /// Room action
        #[command(subcommand)]
        action: RoomAction,
    },
    /// Stage operations
    Stage {
        /// Stage action
        #[command(subcommand)]
        action: StageAction,
    },
    /// Configuration file operations
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Escape room actions.
#[derive(Subcommand, Debug)]
pub enum RoomAction {
    /// Create an escape room owned by the acting user
    Create {
        /// Room label
        #[arg(long)]
        label: String,
        /// Room description
        #[arg(long)]
        description: Option<String>,
        /// Acting user id
        #[arg(long, env = "ROOMKIT_USER")]
        user: String,
    },
}

/// Stage actions.
#[derive(Subcommand, Debug)]
pub enum StageAction {
    /// Create a stage in an escape room you own
    Create {
        /// Escape room id
        #[arg(long)]
        room: String,
        /// Stage label
        #[arg(long)]
        label: String,
        /// Stage description
        #[arg(long)]
        description: Option<String>,
        /// Background asset reference
        #[arg(long)]
        background: Option<String>,
        /// Time limit in seconds
        #[arg(long, allow_negative_numbers = true)]
        time_limit: Option<i32>,
        /// Acting user id
        #[arg(long, env = "ROOMKIT_USER")]
        user: String,
    },
    /// List your stages in an escape room
    List {
        /// Escape room id
        #[arg(long)]
        room: String,
        /// Acting user id
        #[arg(long, env = "ROOMKIT_USER")]
        user: String,
    },
    /// Show one of your stages with its escape room label
    Show {
        /// Stage id
        id: String,
        /// Acting user id
        #[arg(long, env = "ROOMKIT_USER")]
        user: String,
    },
    /// Remove one of your stages
    Remove {
        /// Stage id
        id: String,
        /// Acting user id
        #[arg(long, env = "ROOMKIT_USER")]
        user: String,
    },
}

/// Config actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,
    /// Write a default config file
    Init {
        /// Where to write (defaults to the resolved path)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}
