//! Browser configuration
//!
//! Settings for reaching the catalog: base address, timeouts, retries and
//! rate limiting. Loaded from an optional YAML file, then overridden by the
//! environment and finally by command-line flags.

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, LogLevel, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Public catalog address
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Environment variable overriding the base address
pub const BASE_URL_ENV: &str = "MULTIVERSE_API_URL";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete browser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrowserConfig {
    /// Catalog base address (without trailing `/character`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of retries per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff
    #[serde(default)]
    pub backoff: BackoffConfig,

    /// Client-side rate limiting
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Log level when `--verbose` is not given
    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            backoff: BackoffConfig::default(),
            rate_limit: RateLimitConfig::default(),
            user_agent: None,
            log_level: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    8000
}

fn default_max_retries() -> u32 {
    3
}

// ============================================================================
// Backoff / Rate Limit
// ============================================================================

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    10_000
}

/// Rate limiting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether requests wait on a token bucket
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bucket parameters
    #[serde(flatten)]
    pub limits: RateLimiterConfig,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limits: RateLimiterConfig::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Loading
// ============================================================================

impl BrowserConfig {
    /// Load configuration from `path` (defaults when `None`), then apply the
    /// process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Read and parse a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                ))
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty file is a valid, all-defaults config
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env_from<F>(self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(BASE_URL_ENV).none_if_empty() {
            Some(url) => self.with_base_url(url),
            None => Ok(self),
        }
    }

    /// Replace the base address
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self.validate()?;
        Ok(self)
    }

    /// Check field values
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", format!("'{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(Error::invalid_value("timeout_ms", "must be greater than zero"));
        }
        if self.rate_limit.enabled && self.rate_limit.limits.requests_per_second == 0 {
            return Err(Error::invalid_value(
                "rate_limit.requests_per_second",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// HTTP client settings for this configuration
    pub fn to_http_config(&self) -> HttpClientConfig {
        let defaults = HttpClientConfig::default();
        HttpClientConfig {
            base_url: Some(self.base_url.trim_end_matches('/').to_string()),
            timeout: Duration::from_millis(self.timeout_ms),
            max_retries: self.max_retries,
            initial_backoff: Duration::from_millis(self.backoff.initial_ms),
            max_backoff: Duration::from_millis(self.backoff.max_ms),
            backoff_type: self.backoff.backoff_type,
            rate_limit: self
                .rate_limit
                .enabled
                .then(|| self.rate_limit.limits.clone()),
            user_agent: self
                .user_agent
                .clone()
                .none_if_empty()
                .unwrap_or(defaults.user_agent),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
