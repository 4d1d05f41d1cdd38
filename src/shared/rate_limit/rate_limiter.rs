use async_trait::async_trait;

use crate::config::{parse_or, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after_secs: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Rate limit store unavailable: {0}")]
    StoreUnavailable(String),
}

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Counts one request from `client_key` against the window for `scope`.
    async fn check(&self, scope: &str, client_key: &str)
        -> Result<RateLimitDecision, RateLimitError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        // 5 requests per 15 minutes
        Self {
            max_requests: 5,
            window_secs: 15 * 60,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            max_requests: parse_or("RATE_LIMIT_MAX_REQUESTS", defaults.max_requests)?,
            window_secs: parse_or("RATE_LIMIT_WINDOW_SECS", defaults.window_secs)?,
        };

        if config.max_requests == 0 || config.window_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "RATE_LIMIT_MAX_REQUESTS/RATE_LIMIT_WINDOW_SECS".to_string(),
                reason: "must both be greater than zero".to_string(),
            });
        }

        Ok(config)
    }

    /// Decision for a request that brought the window's counter to `count`.
    pub fn decide(&self, count: u64, ttl_secs: i64) -> RateLimitDecision {
        if count > self.max_requests as u64 {
            let retry_after_secs = if ttl_secs > 0 {
                ttl_secs as u64
            } else {
                self.window_secs
            };
            RateLimitDecision::Limited { retry_after_secs }
        } else {
            RateLimitDecision::Allowed {
                remaining: self.max_requests - count as u32,
            }
        }
    }
}
