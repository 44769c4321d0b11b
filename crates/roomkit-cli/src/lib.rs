//! # roomkit-cli
//!
//! Command-line tools for authoring escape rooms:
//! - Escape room seeding
//! - Stage create, list, show, and remove, checked against the acting user
//! - Configuration file management

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use error::{Error, Result};
