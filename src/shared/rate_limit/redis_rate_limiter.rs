use async_trait::async_trait;
use deadpool_redis::Pool;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use super::rate_limiter::{RateLimitConfig, RateLimitDecision, RateLimitError, RateLimiter};

/// Redis-backed fixed-window rate limiter.
///
/// ## Redis data model
/// ```text
/// ratelimit:{scope}:{client_hash} -> request count (integer)
/// ```
/// - The key is created with `TTL = window` on the first request of a window
/// - `INCR` keeps the existing TTL, so the window does not slide
/// - When the key expires the next request opens a fresh window
///
/// Client keys (IP addresses) are hashed so raw addresses never land in Redis.
#[derive(Clone)]
pub struct RedisRateLimiter {
    pool: Arc<Pool>,
    config: RateLimitConfig,
}

impl RedisRateLimiter {
    pub fn new(pool: Arc<Pool>, config: RateLimitConfig) -> Self {
        Self { pool, config }
    }

    fn window_key(scope: &str, client_key: &str) -> String {
        format!("ratelimit:{scope}:{}", hash_client_key(client_key))
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, RateLimitError> {
        self.pool
            .get()
            .await
            .map_err(|e| RateLimitError::StoreUnavailable(format!("Pool error: {}", e)))
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    /// ## Redis operations performed (atomically)
    /// ```text
    /// SET  ratelimit:{scope}:{hash} 0 EX <window> NX
    /// INCR ratelimit:{scope}:{hash}
    /// TTL  ratelimit:{scope}:{hash}
    /// ```
    async fn check(
        &self,
        scope: &str,
        client_key: &str,
    ) -> Result<RateLimitDecision, RateLimitError> {
        let key = Self::window_key(scope, client_key);
        let mut conn = self.get_conn().await?;

        let (count, ttl): (u64, i64) = deadpool_redis::redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&key)
            .arg(0)
            .arg("EX")
            .arg(self.config.window_secs)
            .arg("NX")
            .ignore()
            .cmd("INCR")
            .arg(&key)
            .cmd("TTL")
            .arg(&key)
            .query_async(&mut *conn)
            .await
            .map_err(|e| RateLimitError::StoreUnavailable(e.to_string()))?;

        Ok(self.config.decide(count, ttl))
    }
}

pub(crate) fn hash_client_key(client_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(client_key.as_bytes());
    format!("{:x}", hasher.finalize())
}
