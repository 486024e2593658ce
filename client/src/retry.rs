//! Retry policy for idempotent requests.
//!
//! - Max retries: 2 (3 total attempts)
//! - Initial delay: 250ms, doubling per attempt, capped at 4 seconds
//! - Down-jitter up to 25% (multiplier in [0.75, 1.0])
//! - Retryable: HTTP 408, 429, 5xx, connect and timeout errors
//! - `Retry-After` (seconds) overrides the backoff when in `(0, 60s)`
//!
//! Only the check list fetch goes through here. Submissions are not
//! idempotent and are sent once.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode, header::HeaderMap};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Fraction of the delay that may be shaved off at random.
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(4),
            jitter_factor: 0.25,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

#[must_use]
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let secs = headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()?;
    let delay = Duration::from_secs(secs);
    (delay > Duration::ZERO && delay < Duration::from_secs(60)).then_some(delay)
}

#[must_use]
pub fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 408 | 429 | 500..=599)
}

fn is_retryable_error(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout()
}

/// Delay before retry number `step + 1`.
#[must_use]
pub fn backoff_delay(step: u32, config: &RetryConfig, headers: Option<&HeaderMap>) -> Duration {
    if let Some(delay) = headers.and_then(parse_retry_after) {
        return delay;
    }

    let base = config.initial_delay.as_secs_f64() * 2.0_f64.powi(step as i32);
    let capped = base.min(config.max_delay.as_secs_f64());
    let jitter = 1.0 - rand::random::<f64>() * config.jitter_factor;
    Duration::from_secs_f64(capped * jitter)
}

/// How a retried request ended.
#[derive(Debug)]
pub enum RetryOutcome {
    /// 2xx response.
    Success(Response),
    /// Non-2xx response that was not retried, or the last of the retries.
    HttpError(Response),
    /// Transport failure on the final attempt, or a non-retryable one.
    Transport { attempts: u32, source: reqwest::Error },
}

/// Send the request built by `build_request`, retrying per `config`.
pub async fn send_with_retry<F>(build_request: F, config: &RetryConfig) -> RetryOutcome
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt: u32 = 0;
    loop {
        let can_retry = attempt < config.max_retries;

        match build_request().send().await {
            Ok(response) if response.status().is_success() => {
                return RetryOutcome::Success(response);
            }
            Ok(response) => {
                let status = response.status();
                if !can_retry || !is_retryable_status(status) {
                    return RetryOutcome::HttpError(response);
                }
                let delay = backoff_delay(attempt, config, Some(response.headers()));
                tracing::debug!(
                    %status,
                    retry = attempt + 1,
                    delay_ms = delay.as_millis(),
                    "Retrying request after error status"
                );
                tokio::time::sleep(delay).await;
            }
            Err(source) => {
                if !can_retry || !is_retryable_error(&source) {
                    return RetryOutcome::Transport {
                        attempts: attempt + 1,
                        source,
                    };
                }
                let delay = backoff_delay(attempt, config, None);
                tracing::debug!(
                    error = %source,
                    retry = attempt + 1,
                    delay_ms = delay.as_millis(),
                    "Retrying request after connection error"
                );
                tokio::time::sleep(delay).await;
            }
        }

        attempt += 1;
    }
}
