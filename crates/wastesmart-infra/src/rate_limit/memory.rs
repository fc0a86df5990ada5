//! In-memory fixed-window rate limiter.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use wastesmart_core::ports::{RateLimitDecision, RateLimitError, RateLimiter};

/// Rate limiter configuration. Process-wide, not per-client.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

/// One client's counter for the current window.
#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Per-client fixed-window request counter.
///
/// The counter resets at fixed wall-clock intervals rather than a rolling
/// one, so a client can burst up to 2x the nominal rate across a window
/// boundary. That imprecision is accepted; do not "fix" it to sliding-log
/// behavior.
///
/// Limits are per-process. Windows are created lazily on a client's first
/// request; [`FixedWindowLimiter::sweep_expired`] is advisory housekeeping
/// that bounds memory and is never needed for a correct decision.
pub struct FixedWindowLimiter {
    windows: Mutex<HashMap<String, Window>>,
    config: RateLimitConfig,
}

impl FixedWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            config,
        }
    }

    pub fn from_env() -> Self {
        let defaults = RateLimitConfig::default();
        let config = RateLimitConfig {
            max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_requests),
            window: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.window),
        };
        Self::new(config)
    }

    pub fn window_duration(&self) -> Duration {
        self.config.window
    }

    /// Check-then-increment for `key` at the given instant. The whole
    /// sequence runs under one lock, so two concurrent calls for the same
    /// key can never both read the same pre-increment count.
    async fn check_at(&self, key: &str, now: DateTime<Utc>) -> RateLimitDecision {
        let window_len = chrono::Duration::from_std(self.config.window)
            .unwrap_or_else(|_| chrono::Duration::seconds(15 * 60));

        let mut windows = self.windows.lock().await;

        let window = windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            reset_at: now + window_len,
        });

        // A stale window is discarded wholesale: a client throttled right
        // at the boundary is freed on its very next call.
        if now > window.reset_at {
            *window = Window {
                count: 0,
                reset_at: now + window_len,
            };
        }

        if window.count >= self.config.max_requests {
            let millis_left = (window.reset_at - now).num_milliseconds().max(0);
            return RateLimitDecision {
                allowed: false,
                limit: self.config.max_requests,
                remaining: 0,
                reset_at: window.reset_at,
                retry_after_secs: (millis_left as u64).div_ceil(1000),
            };
        }

        window.count += 1;
        RateLimitDecision {
            allowed: true,
            limit: self.config.max_requests,
            remaining: self.config.max_requests - window.count,
            reset_at: window.reset_at,
            retry_after_secs: 0,
        }
    }

    async fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, window| now <= window.reset_at);
        before - windows.len()
    }

    /// Drop windows whose reset time has passed, using the same expiry
    /// check as `check`. Idempotent; safe to run concurrently with checks.
    pub async fn sweep_expired(&self) {
        let removed = self.sweep_expired_at(Utc::now()).await;
        if removed > 0 {
            tracing::debug!(removed, "Swept expired rate limit windows");
        }
    }
}

#[async_trait]
impl RateLimiter for FixedWindowLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitDecision, RateLimitError> {
        Ok(self.check_at(key, Utc::now()).await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn limiter(max_requests: u32, window_secs: u64) -> FixedWindowLimiter {
        FixedWindowLimiter::new(RateLimitConfig {
            max_requests,
            window: Duration::from_secs(window_secs),
        })
    }

    #[tokio::test]
    async fn admits_until_limit_then_rejects() {
        let limiter = limiter(3, 60);
        let now = Utc::now();

        for expected_remaining in [2, 1, 0] {
            let decision = limiter.check_at("client", now).await;
            assert!(decision.allowed);
            assert_eq!(decision.limit, 3);
            assert_eq!(decision.remaining, expected_remaining);
        }

        let decision = limiter.check_at("client", now).await;
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
        assert_eq!(decision.retry_after_secs, 60);
    }

    #[tokio::test]
    async fn rejection_does_not_consume_quota() {
        let limiter = limiter(1, 60);
        let now = Utc::now();

        assert!(limiter.check_at("client", now).await.allowed);
        for _ in 0..5 {
            assert!(!limiter.check_at("client", now).await.allowed);
        }

        // The extra rejected calls must not have advanced the counter:
        // one fresh window admits exactly one request again.
        let later = now + chrono::Duration::seconds(61);
        let decision = limiter.check_at("client", later).await;
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 0);
    }

    #[tokio::test]
    async fn window_expiry_frees_a_throttled_client() {
        let limiter = limiter(2, 30);
        let now = Utc::now();

        limiter.check_at("client", now).await;
        limiter.check_at("client", now).await;
        assert!(!limiter.check_at("client", now).await.allowed);

        let later = now + chrono::Duration::seconds(31);
        let decision = limiter.check_at("client", later).await;
        assert!(decision.allowed);
        // Counter restarted at 1.
        assert_eq!(decision.remaining, 1);
    }

    #[tokio::test]
    async fn clients_do_not_interfere() {
        let limiter = limiter(1, 60);
        let now = Utc::now();

        assert!(limiter.check_at("alice", now).await.allowed);
        assert!(!limiter.check_at("alice", now).await.allowed);
        assert!(limiter.check_at("bob", now).await.allowed);
    }

    #[tokio::test]
    async fn retry_after_rounds_up_to_whole_seconds() {
        let limiter = limiter(1, 60);
        let now = Utc::now();

        limiter.check_at("client", now).await;
        let decision = limiter
            .check_at("client", now + chrono::Duration::milliseconds(59_500))
            .await;
        assert!(!decision.allowed);
        assert_eq!(decision.retry_after_secs, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_calls_admit_exactly_the_limit() {
        let limiter = Arc::new(limiter(100, 60));
        let now = Utc::now();

        let mut handles = Vec::new();
        for _ in 0..150 {
            let limiter = limiter.clone();
            handles.push(tokio::spawn(
                async move { limiter.check_at("client", now).await },
            ));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap().allowed {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 100);
    }

    #[tokio::test]
    async fn sweep_removes_only_expired_windows() {
        let limiter = limiter(5, 30);
        let now = Utc::now();

        limiter.check_at("old", now).await;
        limiter.check_at("fresh", now + chrono::Duration::seconds(20)).await;

        let removed = limiter
            .sweep_expired_at(now + chrono::Duration::seconds(31))
            .await;
        assert_eq!(removed, 1);

        // The fresh client's window survived with its count intact.
        let decision = limiter
            .check_at("fresh", now + chrono::Duration::seconds(32))
            .await;
        assert_eq!(decision.remaining, 3);
    }
}
