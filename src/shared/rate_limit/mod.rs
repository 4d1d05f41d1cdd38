pub mod middleware;
pub mod rate_limiter;
pub mod redis_rate_limiter;

pub use middleware::rate_limit_middleware;
pub use rate_limiter::{RateLimitConfig, RateLimitDecision, RateLimitError, RateLimiter};
pub use redis_rate_limiter::RedisRateLimiter;
