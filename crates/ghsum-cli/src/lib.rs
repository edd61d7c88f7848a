//! GitHub activity summary CLI library.
//!
//! This crate provides the CLI interface for the summarizer.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, OutputFormat};
pub use config::Config;
