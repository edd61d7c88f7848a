//! Collapsing classified events into a per-day summary.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::{Classified, PrAction};
use crate::event::PrUrl;

/// Aggregated activity for one day.
///
/// The bucket lists hold rendered `[title](url)` references. A pull request
/// lands in at most one bucket (opened, closed, reviewed, or `commented`),
/// decided by its first action of the day. `pr_comments` is the full
/// chronological comment timeline per pull request and is not limited by
/// that rule, so an opened PR still accumulates its comment texts there.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub prs_opened: Vec<String>,
    pub prs_closed: Vec<String>,
    pub prs_reviewed: Vec<String>,
    pub pr_comments: BTreeMap<PrUrl, Vec<String>>,
    pub general_comments: Vec<String>,
    /// Pull requests whose bucket slot was claimed by a comment.
    #[serde(skip)]
    pub commented: Vec<PrUrl>,
    /// Titles learned from lifecycle events and bucket-claiming comments.
    /// Reviews never contribute here.
    #[serde(skip)]
    pub titles: BTreeMap<PrUrl, String>,
}

impl Summary {
    /// Whether the day produced nothing to report.
    pub fn is_empty(&self) -> bool {
        self.prs_opened.is_empty()
            && self.prs_closed.is_empty()
            && self.prs_reviewed.is_empty()
            && self.pr_comments.is_empty()
            && self.general_comments.is_empty()
    }
}

/// A rendered markdown reference to a pull request.
pub(crate) fn md_link(title: &str, url: &PrUrl) -> String {
    format!("[{title}]({url})")
}

/// One pull request's slice of the day, without its grouping key.
#[derive(Debug)]
enum TimelineEntry {
    Lifecycle {
        action: PrAction,
        title: String,
        at: DateTime<Utc>,
    },
    Review {
        title: String,
        at: DateTime<Utc>,
    },
    Comment {
        title: String,
        body: String,
        at: DateTime<Utc>,
    },
}

impl TimelineEntry {
    fn at(&self) -> DateTime<Utc> {
        match self {
            Self::Lifecycle { at, .. } | Self::Review { at, .. } | Self::Comment { at, .. } => *at,
        }
    }
}

/// Aggregates one day's classified events into a [`Summary`].
///
/// Runs in two phases: group events into per-PR timelines (plus the general
/// comment stream), then reduce each timeline in chronological order. Ties
/// on the timestamp keep feed order.
pub fn summarize(events: Vec<Classified>) -> Summary {
    let (timelines, general) = group_by_pr(events);

    let mut summary = Summary::default();
    for (url, entries) in timelines {
        reduce_timeline(&mut summary, &url, entries);
    }
    for (_, body) in general {
        summary.general_comments.push(format!("Comment: {body}"));
    }
    summary
}

/// Groups PR-related events into per-key timelines, keys in first-seen feed
/// order, each timeline sorted by timestamp. General comments come back as a
/// separate time-ordered stream.
#[allow(clippy::type_complexity)]
fn group_by_pr(
    events: Vec<Classified>,
) -> (Vec<(PrUrl, Vec<TimelineEntry>)>, Vec<(DateTime<Utc>, String)>) {
    let mut timelines: Vec<(PrUrl, Vec<TimelineEntry>)> = Vec::new();
    let mut index: HashMap<PrUrl, usize> = HashMap::new();
    let mut general = Vec::new();

    for event in events {
        let (url, entry) = match event {
            Classified::PrLifecycle {
                url,
                title,
                action,
                at,
            } => (url, TimelineEntry::Lifecycle { action, title, at }),
            Classified::PrReview { url, title, at } => (url, TimelineEntry::Review { title, at }),
            Classified::PrComment {
                url,
                title,
                body,
                at,
            } => (url, TimelineEntry::Comment { title, body, at }),
            Classified::GeneralComment { body, at } => {
                general.push((at, body));
                continue;
            }
        };

        let next = timelines.len();
        let slot = *index.entry(url.clone()).or_insert(next);
        if slot == next {
            timelines.push((url, Vec::new()));
        }
        timelines[slot].1.push(entry);
    }

    for (_, entries) in &mut timelines {
        entries.sort_by_key(TimelineEntry::at);
    }
    general.sort_by_key(|&(at, _)| at);

    (timelines, general)
}

/// Walks one pull request's timeline and fills the summary buckets.
///
/// The first lifecycle event claims the PR: "opened" and "closed" emit a
/// reference, any other action claims silently. A review emits only when
/// nothing has claimed the PR yet. The first comment on an unclaimed PR
/// claims it into `commented`. Comment texts always land in `pr_comments`,
/// claimed or not.
fn reduce_timeline(summary: &mut Summary, url: &PrUrl, entries: Vec<TimelineEntry>) {
    let mut processed = false;
    let mut opened = false;

    for entry in entries {
        match entry {
            TimelineEntry::Lifecycle { action, title, .. } => {
                if !processed {
                    summary.titles.insert(url.clone(), title.clone());
                    match action {
                        PrAction::Opened => {
                            summary.prs_opened.push(md_link(&title, url));
                            opened = true;
                        }
                        PrAction::Closed => summary.prs_closed.push(md_link(&title, url)),
                        PrAction::Other => {}
                    }
                    processed = true;
                }
            }
            TimelineEntry::Review { title, .. } => {
                if !processed && !opened {
                    summary.prs_reviewed.push(md_link(&title, url));
                    processed = true;
                }
            }
            TimelineEntry::Comment { title, body, .. } => {
                if !processed {
                    summary.titles.insert(url.clone(), title);
                    summary.commented.push(url.clone());
                    processed = true;
                }
                summary
                    .pr_comments
                    .entry(url.clone())
                    .or_default()
                    .push(format!("Comment: {body}"));
            }
        }
    }
}
