//! Catalog transport
//!
//! Every catalog read is a JSON `GET`. One call here covers the whole life of
//! such a read: wait on the rate limiter, send, classify the answer, back off
//! and retry transient failures, then decode the body into the caller's type.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use crate::types::{BackoffType, QueryParams};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Transport settings, usually derived from `BrowserConfig`
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Root that relative paths and episode references resolve against
    pub base_url: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_backoff: Duration,
    /// Upper bound for any single wait, `Retry-After` included
    pub max_backoff: Duration,
    pub backoff_type: BackoffType,
    /// `None` disables client-side throttling
    pub rate_limit: Option<RateLimiterConfig>,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(8),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            backoff_type: BackoffType::Exponential,
            rate_limit: Some(RateLimiterConfig::default()),
            user_agent: format!("multiverse-catalog/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Verdict on a single attempt
enum Attempt {
    Success(Response),
    Retry { delay: Duration, error: Error },
    Fail(Error),
}

impl Attempt {
    fn from_error(error: Error, delay: Duration) -> Self {
        if error.is_retryable() {
            Attempt::Retry { delay, error }
        } else {
            Attempt::Fail(error)
        }
    }
}

/// Rate-limited, retrying JSON client for the catalog service
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// `GET` `path` with `query` and decode the JSON body into `T`
    ///
    /// Error statuses come back as [`Error::HttpStatus`] so callers can tell a
    /// 404 "no match" apart from an outage. A 2xx body that does not decode
    /// into `T` is [`Error::Decode`] and is never retried.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> Result<T> {
        let url = self.build_url(path);
        let mut attempt = 0;

        loop {
            if let Some(limiter) = &self.rate_limiter {
                limiter.wait().await;
            }

            let sent = self.client.get(&url).query(query).send().await;
            match self.classify(sent, attempt).await {
                Attempt::Success(response) => {
                    debug!(%url, attempt, "Catalog request succeeded");
                    return decode(response).await;
                }
                Attempt::Retry { delay, error } if attempt < self.config.max_retries => {
                    warn!(
                        %url,
                        attempt = attempt + 1,
                        max_attempts = self.config.max_retries + 1,
                        ?delay,
                        %error,
                        "Catalog request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Attempt::Retry { error, .. } | Attempt::Fail(error) => return Err(error),
            }
        }
    }

    async fn classify(&self, sent: reqwest::Result<Response>, attempt: u32) -> Attempt {
        let response = match sent {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                let timeout_ms = self.config.timeout.as_millis() as u64;
                let error = Error::Timeout { timeout_ms };
                return Attempt::from_error(error, self.backoff_delay(attempt));
            }
            Err(e) => return Attempt::from_error(Error::Http(e), self.backoff_delay(attempt)),
        };

        let status = response.status();
        if status.is_success() {
            return Attempt::Success(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let delay = match retry_after(&response) {
                Some(wait) => wait.min(self.config.max_backoff),
                None => self.backoff_delay(attempt),
            };
            let error = Error::RateLimited {
                retry_after_ms: delay.as_millis() as u64,
            };
            return Attempt::from_error(error, delay);
        }

        let body = response.text().await.unwrap_or_default();
        Attempt::from_error(
            Error::http_status(status.as_u16(), body),
            self.backoff_delay(attempt),
        )
    }

    /// Resolve `path` against the base URL; absolute references pass through
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => path.to_string(),
        }
    }

    /// Wait before retry number `attempt + 1`, capped at `max_backoff`
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let initial = self.config.initial_backoff;
        let delay = match self.config.backoff_type {
            BackoffType::Constant => initial,
            BackoffType::Linear => initial.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => initial.saturating_mul(2u32.saturating_pow(attempt)),
        };
        delay.min(self.config.max_backoff)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| Error::decode(e.to_string()))
}

/// `Retry-After` in delay-seconds form; HTTP-date values are ignored
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
        .map(Duration::from_secs)
}
