use anyhow::{Context, Result, bail};
use clap::Parser;
use ghsum_cli::commands::report;
use ghsum_cli::{Cli, Config, OutputFormat};
use ghsum_core::CommentStyle;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Stdout carries the report document, so diagnostics go to stderr.
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let end = cli.end_date.unwrap_or(cli.start_date);
    if cli.start_date > end {
        bail!("start date cannot be after end date");
    }
    if cli.summary && cli.output != OutputFormat::Markdown {
        bail!("--summary is only valid with markdown output");
    }

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let Some(token) = config.token else {
        bail!("GITHUB_TOKEN environment variable not set");
    };
    let client = ghsum_github::Client::with_api_url(token, &config.api_url)
        .context("failed to build GitHub client")?;

    let request = report::ReportRequest {
        username: cli.user,
        start: cli.start_date,
        end,
    };
    let style = if cli.summary {
        CommentStyle::Compact
    } else {
        CommentStyle::Detailed
    };

    report::run(&client, &request, cli.output, style).await
}
