//! Rate limiting ports and application service.
//!
//! Implements a fixed-window rate limiter: at most N attempts per client key
//! within a recurring window, reset wholesale once the window expires. The
//! store behind the port is advisory abuse mitigation, not a correctness
//! guarantee.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use unlockery_core::{AppError, AppResult};

/// Store port for rate limit window state.
///
/// Keeps one entry per distinct key, created on the first attempt and
/// overwritten once its window has expired. Implementations must not lose
/// updates under concurrent read-modify-write for the same key.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Records an attempt for the given key.
    ///
    /// If the key's current window has expired (or the key is new), the
    /// counter resets to one and a fresh window starts. Returns the attempt
    /// count within the active window, including this attempt.
    async fn record_attempt(&self, key: &str, window_seconds: i64) -> AppResult<AttemptInfo>;
}

/// Information about the current rate limit window for a key.
#[derive(Debug, Clone)]
pub struct AttemptInfo {
    /// Number of attempts in the current window (including this one).
    pub attempt_count: i32,
    /// When the current window started.
    pub window_started_at: DateTime<Utc>,
}

/// Configuration for a rate limit rule.
#[derive(Debug, Clone)]
pub struct RateLimitRule {
    /// The route prefix or category name (e.g., "generate").
    pub category: String,
    /// Maximum number of attempts allowed in the window.
    pub max_attempts: i32,
    /// Window duration in seconds.
    pub window_seconds: i64,
}

impl RateLimitRule {
    /// Creates a new rate limit rule.
    #[must_use]
    pub fn new(category: impl Into<String>, max_attempts: i32, window_seconds: i64) -> Self {
        Self {
            category: category.into(),
            max_attempts,
            window_seconds,
        }
    }
}

/// Application service for rate limiting.
#[derive(Clone)]
pub struct RateLimitService {
    store: Arc<dyn RateLimitStore>,
}

impl RateLimitService {
    /// Creates a new rate limit service.
    #[must_use]
    pub fn new(store: Arc<dyn RateLimitStore>) -> Self {
        Self { store }
    }

    /// Checks whether the given key is within the rate limit.
    ///
    /// Records the attempt and returns `Ok(())` if allowed, or
    /// `Err(AppError::RateLimited)` if the limit has been exceeded.
    ///
    /// The key is namespaced as `"{category}:{identifier}"` where the
    /// identifier is typically a client address.
    pub async fn check_rate_limit(&self, rule: &RateLimitRule, key: &str) -> AppResult<()> {
        let composite_key = format!("{}:{key}", rule.category);
        let info = self
            .store
            .record_attempt(&composite_key, rule.window_seconds)
            .await?;

        if info.attempt_count > rule.max_attempts {
            return Err(AppError::RateLimited("Rate limit exceeded".to_owned()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Mutex;

    use unlockery_core::{AppError, AppResult};

    use super::{AttemptInfo, RateLimitRule, RateLimitService, RateLimitStore};

    #[derive(Default)]
    struct FakeRateLimitStore {
        counts: Mutex<HashMap<String, i32>>,
    }

    #[async_trait]
    impl RateLimitStore for FakeRateLimitStore {
        async fn record_attempt(&self, key: &str, _window_seconds: i64) -> AppResult<AttemptInfo> {
            let mut counts = self.counts.lock().await;
            let count = counts.entry(key.to_owned()).or_insert(0);
            *count += 1;

            Ok(AttemptInfo {
                attempt_count: *count,
                window_started_at: Utc::now(),
            })
        }
    }

    fn service_with_store() -> (RateLimitService, Arc<FakeRateLimitStore>) {
        let store = Arc::new(FakeRateLimitStore::default());
        (RateLimitService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn allows_up_to_the_limit() {
        let (service, _store) = service_with_store();
        let rule = RateLimitRule::new("generate", 3, 600);

        for _ in 0..3 {
            assert!(service.check_rate_limit(&rule, "1.2.3.4").await.is_ok());
        }
    }

    #[tokio::test]
    async fn denies_once_the_limit_is_exceeded() {
        let (service, _store) = service_with_store();
        let rule = RateLimitRule::new("generate", 10, 600);

        for _ in 0..10 {
            assert!(service.check_rate_limit(&rule, "1.2.3.4").await.is_ok());
        }

        let denied = service.check_rate_limit(&rule, "1.2.3.4").await;
        assert!(matches!(denied, Err(AppError::RateLimited(_))));
    }

    #[tokio::test]
    async fn keys_are_namespaced_by_category() {
        let (service, store) = service_with_store();
        let rule = RateLimitRule::new("generate", 10, 600);

        assert!(service.check_rate_limit(&rule, "1.2.3.4").await.is_ok());

        let counts = store.counts.lock().await;
        assert!(counts.contains_key("generate:1.2.3.4"));
    }

    #[tokio::test]
    async fn distinct_keys_have_independent_budgets() {
        let (service, _store) = service_with_store();
        let rule = RateLimitRule::new("generate", 1, 600);

        assert!(service.check_rate_limit(&rule, "1.2.3.4").await.is_ok());
        assert!(service.check_rate_limit(&rule, "5.6.7.8").await.is_ok());
        assert!(service.check_rate_limit(&rule, "1.2.3.4").await.is_err());
    }
}
