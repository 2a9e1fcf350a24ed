//! HTTP transport module
//!
//! Provides the HTTP client the catalog client sits on.
//!
//! # Features
//!
//! - **Automatic Retries**: 429, 5xx, timeouts and connection errors are retried
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Typed Decoding**: JSON bodies decoded straight into model types, failing
//!   closed as `Error::Decode`

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
