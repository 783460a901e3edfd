//! In-memory rate limit store implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use unlockery_application::{AttemptInfo, RateLimitStore};
use unlockery_core::{AppError, AppResult};

#[derive(Debug, Clone)]
struct WindowState {
    attempt_count: i32,
    window_started_at: DateTime<Utc>,
}

/// In-memory, fixed-window rate limit store.
///
/// One entry per distinct key, held for the process lifetime. An entry is
/// overwritten wholesale once its window expires; there is no other
/// eviction. State is lost on restart, which is acceptable for advisory
/// abuse mitigation. Suitable for a single-process deployment only; a
/// multi-instance deployment swaps in a shared store behind the same port.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    windows: RwLock<HashMap<String, WindowState>>,
}

impl InMemoryRateLimitStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
        }
    }

    async fn record_attempt_at(
        &self,
        key: &str,
        window_seconds: i64,
        now: DateTime<Utc>,
    ) -> AppResult<AttemptInfo> {
        if window_seconds <= 0 {
            return Err(AppError::Validation(
                "window_seconds must be greater than zero".to_owned(),
            ));
        }

        // The write lock spans the whole read-modify-write so concurrent
        // attempts for the same key cannot lose updates.
        let mut windows = self.windows.write().await;
        let state = windows
            .entry(key.to_owned())
            .and_modify(|state| {
                if now - state.window_started_at > Duration::seconds(window_seconds) {
                    state.attempt_count = 1;
                    state.window_started_at = now;
                } else {
                    state.attempt_count += 1;
                }
            })
            .or_insert_with(|| WindowState {
                attempt_count: 1,
                window_started_at: now,
            });

        Ok(AttemptInfo {
            attempt_count: state.attempt_count,
            window_started_at: state.window_started_at,
        })
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn record_attempt(&self, key: &str, window_seconds: i64) -> AppResult<AttemptInfo> {
        self.record_attempt_at(key, window_seconds, Utc::now())
            .await
    }
}
