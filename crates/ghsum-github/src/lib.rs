//! GitHub events API integration for the activity summarizer.
//!
//! Fetches a user's recent public activity, the raw material every daily
//! summary is built from.

use std::fmt;
use std::time::Duration;

use ghsum_core::RawEvent;
use serde::Deserialize;
use thiserror::Error;

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// API root of the public github.com instance.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Largest page the events endpoint serves.
const PAGE_SIZE: u32 = 100;

/// GitHub client errors.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The provided token was invalid.
    #[error("invalid token: {reason}")]
    InvalidToken { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// API returned an error response.
    #[error("API error: {message}")]
    Api { message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// GitHub events API client.
///
/// Holds the connection pool and the credential for one API host. The
/// public instance is the default; an enterprise host can be supplied via
/// [`Client::with_api_url`].
pub struct Client {
    http: reqwest::Client,
    token: String,
    api_url: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("token", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client for the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or whitespace-only, or if
    /// the HTTP client fails to build.
    pub fn new(token: impl Into<String>) -> Result<Self, GithubError> {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    /// Creates a new client against a specific API root.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Client::new`].
    pub fn with_api_url(
        token: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self, GithubError> {
        let token = token.into();

        if token.is_empty() {
            return Err(GithubError::InvalidToken {
                reason: "token cannot be empty",
            });
        }
        if token.trim().is_empty() {
            return Err(GithubError::InvalidToken {
                reason: "token cannot be whitespace-only",
            });
        }

        // GitHub rejects requests without a User-Agent.
        let http = reqwest::Client::builder()
            .user_agent(concat!("ghsum/", env!("CARGO_PKG_VERSION")))
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(GithubError::ClientBuild)?;

        Ok(Self {
            http,
            token,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the user's most recent public events, newest first.
    ///
    /// One page of up to 100 events, which is as far back as the daily
    /// summaries look.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails, the API answers with an
    /// error status, or the body is not a JSON array of events.
    pub async fn recent_events(&self, username: &str) -> Result<Vec<RawEvent>, GithubError> {
        let url = format!(
            "{}/users/{username}/events?per_page={PAGE_SIZE}",
            self.api_url
        );

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("token {}", self.token))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_api_error(&body).unwrap_or_else(|| GithubError::Api {
                message: format!("status {status}: {body}"),
            }));
        }

        parse_events(&body)
    }
}

/// Decodes a feed page. Unmodeled event types collapse to
/// [`RawEvent::Other`]; a body that is not a JSON array is an error.
fn parse_events(body: &str) -> Result<Vec<RawEvent>, GithubError> {
    serde_json::from_str(body).map_err(|err| GithubError::InvalidResponse(err.to_string()))
}

fn parse_api_error(body: &str) -> Option<GithubError> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        message: String,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| GithubError::Api {
            message: payload.message,
        })
}
