//! Report command: one summary per calendar day in the requested range.
//!
//! Drives fetch → classify → aggregate → render once per day and combines
//! the results into a single JSON or markdown document.

use std::fmt::Write;
use std::future::Future;

use anyhow::Result;
use chrono::NaiveDate;
use ghsum_core::{CommentStyle, DayWindow, RawEvent, Summary, classify, summarize, to_markdown};
use ghsum_github::GithubError;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Where raw feed events come from.
///
/// The production implementation wraps [`ghsum_github::Client`]; tests
/// substitute canned feeds.
pub trait EventSource {
    fn fetch_events(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<RawEvent>, GithubError>>;
}

impl EventSource for ghsum_github::Client {
    fn fetch_events(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<RawEvent>, GithubError>> {
        self.recent_events(username)
    }
}

/// One report invocation.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub username: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One day's slot in the combined output.
#[derive(Debug, Serialize)]
pub struct DayReport {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub body: DayBody,
}

/// Either the day's summary or the error that replaced it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBody {
    Summary(Summary),
    Error(String),
}

// ========== Day-Range Collection ==========

/// Fetches and summarizes each day of the range in order, one fetch per
/// day. A failed day carries its error inline; the remaining days still
/// run.
pub async fn collect_days(source: &impl EventSource, request: &ReportRequest) -> Vec<DayReport> {
    let mut days = Vec::new();
    for date in request
        .start
        .iter_days()
        .take_while(|date| *date <= request.end)
    {
        tracing::debug!(%date, user = %request.username, "collecting day");
        let body = match source.fetch_events(&request.username).await {
            Ok(events) => {
                let window = DayWindow::for_date(date);
                let classified: Vec<_> = events
                    .iter()
                    .filter_map(|event| classify(event, window))
                    .collect();
                tracing::debug!(%date, events = events.len(), in_window = classified.len(), "classified feed");
                DayBody::Summary(summarize(classified))
            }
            Err(error) => {
                tracing::warn!(%date, %error, "fetch failed, reporting the day as errored");
                DayBody::Error(error.to_string())
            }
        };
        days.push(DayReport { date, body });
    }
    days
}

// ========== Output Documents ==========

/// Formats day reports as the JSON document.
pub fn format_json(days: &[DayReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(days)?)
}

/// Formats day reports as one markdown document with a heading per date.
pub fn format_markdown(username: &str, days: &[DayReport], style: CommentStyle) -> String {
    let mut output = String::new();
    writeln!(output, "# GitHub Activity for {username}").unwrap();

    for day in days {
        writeln!(output).unwrap();
        writeln!(output, "## {}", day.date).unwrap();
        match &day.body {
            DayBody::Summary(summary) => output.push_str(&to_markdown(summary, style)),
            DayBody::Error(message) => {
                writeln!(output, "Error: {message}").unwrap();
            }
        }
    }

    output
}

// ========== Public Interface ==========

/// Runs the report command.
pub async fn run(
    source: &impl EventSource,
    request: &ReportRequest,
    format: OutputFormat,
    style: CommentStyle,
) -> Result<()> {
    let days = collect_days(source, request).await;

    match format {
        OutputFormat::Json => println!("{}", format_json(&days)?),
        OutputFormat::Markdown => print!("{}", format_markdown(&request.username, &days, style)),
    }

    Ok(())
}
