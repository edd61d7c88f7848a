//! Raw activity events from the public events feed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One record from a user's public events feed.
///
/// The feed is a heterogeneous list tagged by a top-level `type` field, with
/// a payload whose shape depends on the tag. Only the event types the report
/// cares about are modeled; everything else decodes to [`RawEvent::Other`].
///
/// `created_at` is kept as the raw string it arrives as: a malformed
/// timestamp must drop that one event during classification, never fail the
/// whole response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum RawEvent {
    /// A pull request lifecycle change (opened, closed, reopened, ...).
    #[serde(rename = "PullRequestEvent")]
    PullRequest {
        created_at: String,
        payload: PullRequestPayload,
    },
    /// A review was submitted on a pull request.
    #[serde(rename = "PullRequestReviewEvent")]
    PullRequestReview {
        created_at: String,
        payload: PullRequestReviewPayload,
    },
    /// A comment on an issue, including the discussion thread of a pull
    /// request (distinguished by the issue's `pull_request` link).
    #[serde(rename = "IssueCommentEvent")]
    IssueComment {
        created_at: String,
        payload: IssueCommentPayload,
    },
    /// Any other feed entry (pushes, stars, forks, ...). Nothing in it is
    /// reported, so the payload is not kept.
    #[serde(other)]
    Other,
}

impl RawEvent {
    /// The raw `created_at` timestamp, when the variant carries one.
    pub fn created_at(&self) -> Option<&str> {
        match self {
            Self::PullRequest { created_at, .. }
            | Self::PullRequestReview { created_at, .. }
            | Self::IssueComment { created_at, .. } => Some(created_at),
            Self::Other => None,
        }
    }
}

/// Payload of a pull request lifecycle event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PullRequestPayload {
    /// The lifecycle action verb as reported upstream ("opened", "closed", ...).
    pub action: String,
    pub pull_request: PullRequestRef,
}

/// Payload of a pull request review event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PullRequestReviewPayload {
    pub pull_request: PullRequestRef,
}

/// Payload of an issue comment event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssueCommentPayload {
    pub issue: IssueRef,
    pub comment: CommentRef,
}

/// The pull request a lifecycle or review event refers to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PullRequestRef {
    pub html_url: String,
    pub title: String,
}

/// The issue a comment was left on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssueRef {
    pub html_url: String,
    pub title: String,
    /// Present only when the issue is the discussion thread of a pull request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestLink>,
}

/// Link block tying an issue to the pull request it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PullRequestLink {
    pub html_url: String,
}

/// A single comment body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentRef {
    pub body: String,
}

/// The canonical `html_url` of a pull request.
///
/// Used as the grouping key: two events carrying the same `PrUrl` refer to
/// the same pull request regardless of their event type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrUrl(String);

impl PrUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PrUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
