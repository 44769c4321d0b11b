//! Integration test modules.

mod create;
mod failures;
mod properties;
mod remove;
