//! Per-day classification of raw feed events.

use chrono::{DateTime, NaiveDate, Utc};

use crate::event::{PrUrl, RawEvent};

/// The UTC calendar-day interval used to select events for one report day.
///
/// Inclusive at both ends: `[00:00:00.000000, 23:59:59.999999]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DayWindow {
    /// The window covering one UTC calendar day.
    pub fn for_date(date: NaiveDate) -> Self {
        let start = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let end = date
            .and_hms_micro_opt(23, 59, 59, 999_999)
            .unwrap()
            .and_utc();
        Self { start, end }
    }

    /// Whether `at` falls inside the window, inclusive at both ends.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// The lifecycle action of a pull request event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrAction {
    Opened,
    Closed,
    /// Any other verb (reopened, assigned, ...). Still claims the PR's
    /// primary bucket slot without emitting an entry.
    Other,
}

impl From<&str> for PrAction {
    fn from(action: &str) -> Self {
        match action {
            "opened" => Self::Opened,
            "closed" => Self::Closed,
            _ => Self::Other,
        }
    }
}

/// One in-window event assigned to its reporting category.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// A pull request lifecycle change.
    PrLifecycle {
        url: PrUrl,
        title: String,
        action: PrAction,
        at: DateTime<Utc>,
    },
    /// A review on a pull request.
    PrReview {
        url: PrUrl,
        title: String,
        at: DateTime<Utc>,
    },
    /// A comment on a pull request's discussion thread.
    PrComment {
        url: PrUrl,
        title: String,
        body: String,
        at: DateTime<Utc>,
    },
    /// A freestanding comment outside any pull request.
    GeneralComment { body: String, at: DateTime<Utc> },
}

/// Classifies one raw event against a day window.
///
/// Returns `None` for events outside the window, for events whose
/// `created_at` does not parse (dropped and debug-logged, never an error),
/// and for feed entries with nothing to report.
pub fn classify(event: &RawEvent, window: DayWindow) -> Option<Classified> {
    let at = in_window_timestamp(event, window)?;

    match event {
        RawEvent::PullRequest { payload, .. } => Some(Classified::PrLifecycle {
            url: PrUrl::new(payload.pull_request.html_url.clone()),
            title: payload.pull_request.title.clone(),
            action: PrAction::from(payload.action.as_str()),
            at,
        }),
        RawEvent::PullRequestReview { payload, .. } => Some(Classified::PrReview {
            url: PrUrl::new(payload.pull_request.html_url.clone()),
            title: payload.pull_request.title.clone(),
            at,
        }),
        RawEvent::IssueComment { payload, .. } => {
            if payload.issue.html_url.contains("/pull/") {
                if let Some(link) = &payload.issue.pull_request {
                    return Some(Classified::PrComment {
                        url: PrUrl::new(link.html_url.clone()),
                        title: payload.issue.title.clone(),
                        body: payload.comment.body.clone(),
                        at,
                    });
                }
            }
            Some(Classified::GeneralComment {
                body: payload.comment.body.clone(),
                at,
            })
        }
        RawEvent::Other => None,
    }
}

/// Parses the event's timestamp and checks it against the window.
fn in_window_timestamp(event: &RawEvent, window: DayWindow) -> Option<DateTime<Utc>> {
    let raw = event.created_at()?;
    let at = match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => at.with_timezone(&Utc),
        Err(error) => {
            tracing::debug!(created_at = raw, %error, "dropping event with unparseable timestamp");
            return None;
        }
    };
    window.contains(at).then_some(at)
}
