//! Check repository and submission clients.
//!
//! # Architecture
//!
//! [`CheckSource`] is the single entry point the engine talks to. It
//! dispatches to one of:
//!
//! - [`ChecksApi`] - HTTP repository (`GET {base}/checks`) and submission
//!   pipeline (`POST {base}/checks`)
//! - [`SampleRepository`] - built-in checks, used when no endpoint is configured
//!
//! # Error Handling
//!
//! Every failure is a [`ClientError`]. Non-2xx statuses are errors too, so a
//! rejected submission is never mistaken for success.

pub mod retry;
mod sample;

use std::time::Duration;

use reqwest::{StatusCode, Url};
use thiserror::Error;

use gatecheck_types::{Check, Submission};

pub use retry::RetryConfig;
pub use sample::SampleRepository;

use retry::{RetryOutcome, send_with_retry};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;
const MAX_ERROR_BODY_BYTES: usize = 2 * 1024;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request to {url} failed after {attempts} attempt(s): {source}")]
    Transport {
        url: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryConfig::default(),
        }
    }
}

/// HTTP client for the checks endpoint.
#[derive(Debug, Clone)]
pub struct ChecksApi {
    client: reqwest::Client,
    checks_url: String,
    retry: RetryConfig,
}

impl ChecksApi {
    pub fn new(base_url: &str, options: HttpOptions) -> Result<Self, ClientError> {
        let checks_url = checks_url(base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::limited(3))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            checks_url,
            retry: options.retry,
        })
    }

    #[must_use]
    pub fn checks_url(&self) -> &str {
        &self.checks_url
    }

    /// Fetch the (unordered) check list.
    pub async fn fetch_checks(&self) -> Result<Vec<Check>, ClientError> {
        let outcome = send_with_retry(|| self.client.get(&self.checks_url), &self.retry).await;
        let response = self.expect_success(outcome).await?;

        let checks: Vec<Check> = response.json().await.map_err(|source| ClientError::Decode {
            url: self.checks_url.clone(),
            source,
        })?;
        tracing::info!(count = checks.len(), url = %self.checks_url, "Fetched checks");
        Ok(checks)
    }

    /// Post the results. Sent exactly once.
    pub async fn submit(&self, submission: &Submission) -> Result<(), ClientError> {
        let single = self.retry.clone().with_max_retries(0);
        let outcome = send_with_retry(
            || self.client.post(&self.checks_url).json(submission),
            &single,
        )
        .await;
        self.expect_success(outcome).await?;

        tracing::info!(
            results = submission.len(),
            url = %self.checks_url,
            "Submitted results"
        );
        Ok(())
    }

    async fn expect_success(&self, outcome: RetryOutcome) -> Result<reqwest::Response, ClientError> {
        match outcome {
            RetryOutcome::Success(response) => Ok(response),
            RetryOutcome::HttpError(response) => {
                let status = response.status();
                let body = read_error_body(response).await;
                Err(ClientError::Status {
                    url: self.checks_url.clone(),
                    status,
                    body,
                })
            }
            RetryOutcome::Transport { attempts, source } => Err(ClientError::Transport {
                url: self.checks_url.clone(),
                attempts,
                source,
            }),
        }
    }
}

fn checks_url(base_url: &str) -> Result<String, ClientError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let invalid = |reason: String| ClientError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(format!("{trimmed}/checks"))
}

async fn read_error_body(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return "(empty body)".to_string();
    }
    if text.len() <= MAX_ERROR_BODY_BYTES {
        return text.to_string();
    }
    let mut end = MAX_ERROR_BODY_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Where checks come from and where results go.
#[derive(Debug, Clone)]
pub enum CheckSource {
    Http(ChecksApi),
    Sample(SampleRepository),
}

impl CheckSource {
    pub async fn fetch_checks(&self) -> Result<Vec<Check>, ClientError> {
        match self {
            Self::Http(api) => api.fetch_checks().await,
            Self::Sample(repo) => Ok(repo.checks()),
        }
    }

    pub async fn submit(&self, submission: &Submission) -> Result<(), ClientError> {
        match self {
            Self::Http(api) => api.submit(submission).await,
            Self::Sample(repo) => {
                match serde_json::to_string(submission) {
                    Ok(body) => tracing::info!(%body, "Sample repository received submission"),
                    Err(e) => tracing::warn!("Failed to serialize submission for logging: {e}"),
                }
                repo.record_submission(submission.clone());
                Ok(())
            }
        }
    }

    /// Short label for the status bar.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Http(api) => api.checks_url().to_string(),
            Self::Sample(_) => "built-in sample checks".to_string(),
        }
    }
}
