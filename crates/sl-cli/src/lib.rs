//! Session ledger CLI library.
//!
//! This crate provides the CLI interface for the session ledger.

mod cli;
pub mod commands;
mod config;

pub use cli::Cli;
pub use config::{Config, OutputFormat};
