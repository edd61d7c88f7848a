//! Command-line argument definitions.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

/// GitHub daily activity summarizer.
///
/// Fetches a user's recent public events and reports them day by day as
/// pull requests opened, closed, reviewed, and commented on.
#[derive(Debug, Parser)]
#[command(name = "ghsum", version, about, long_about = None)]
pub struct Cli {
    /// GitHub username to report on.
    #[arg(long)]
    pub user: String,

    /// First day of the report (YYYY-MM-DD).
    #[arg(long)]
    pub start_date: NaiveDate,

    /// Last day of the report (YYYY-MM-DD); defaults to the start date.
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// List commented pull requests without their comment texts.
    /// Only valid with markdown output.
    #[arg(long)]
    pub summary: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Json => "json",
            Self::Markdown => "markdown",
        };
        f.write_str(value)
    }
}
