//! Rate limiting port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Rate limiter trait - abstraction over rate limiting backends.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check if a request from `key` is admitted and update the counter.
    ///
    /// A rejected request must NOT advance the counter.
    async fn check(&self, key: &str) -> Result<RateLimitDecision, RateLimitError>;
}

/// Outcome of a rate limit check, with the quota metadata the HTTP layer
/// surfaces as X-RateLimit-* headers.
#[derive(Debug, Clone)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Maximum admitted requests per window.
    pub limit: u32,
    /// Requests left in the current window (0 when rejected).
    pub remaining: u32,
    /// When the current window expires.
    pub reset_at: DateTime<Utc>,
    /// Whole seconds until the window expires, rounded up. Only
    /// meaningful for rejections (the Retry-After hint).
    pub retry_after_secs: u64,
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}
