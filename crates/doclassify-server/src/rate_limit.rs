//! Per-client request rate limiting.
//!
//! Fixed one-minute windows keyed by client address. State lives in
//! process memory and is lost on restart.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Limited { retry_after: Duration },
}

/// Pluggable storage for rate limit counters.
#[async_trait]
pub trait RateLimitBackend: Send + Sync {
    /// Count one request for `key` and decide whether it may proceed.
    async fn check(&self, key: &str) -> RateLimitDecision;

    /// Human-readable limit, e.g. "10 per minute".
    fn describe(&self) -> String;
}

/// Entries are swept once the map grows past this many keys.
const SWEEP_THRESHOLD: usize = 4096;

#[derive(Debug)]
struct WindowEntry {
    started: Instant,
    count: u32,
}

/// In-memory fixed-window limiter.
#[derive(Clone)]
pub struct InMemoryRateLimiter {
    windows: Arc<RwLock<HashMap<String, WindowEntry>>>,
    limit: u32,
    window: Duration,
}

impl InMemoryRateLimiter {
    /// Allow `limit` requests per minute per key. A limit of 0 disables limiting.
    pub fn per_minute(limit: u32) -> Self {
        Self::with_window(limit, Duration::from_secs(60))
    }

    pub fn with_window(limit: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(RwLock::new(HashMap::new())),
            limit,
            window,
        }
    }

    /// Number of keys currently tracked.
    pub async fn tracked_keys(&self) -> usize {
        self.windows.read().await.len()
    }
}

#[async_trait]
impl RateLimitBackend for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> RateLimitDecision {
        if self.limit == 0 {
            return RateLimitDecision::Allowed;
        }

        let now = Instant::now();
        let mut windows = self.windows.write().await;

        if windows.len() >= SWEEP_THRESHOLD {
            let window = self.window;
            windows.retain(|_, entry| now.duration_since(entry.started) < window);
        }

        let entry = windows.entry(key.to_string()).or_insert(WindowEntry {
            started: now,
            count: 0,
        });

        let elapsed = now.duration_since(entry.started);
        if elapsed >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count < self.limit {
            entry.count += 1;
            RateLimitDecision::Allowed
        } else {
            RateLimitDecision::Limited {
                retry_after: self.window.saturating_sub(now.duration_since(entry.started)),
            }
        }
    }

    fn describe(&self) -> String {
        if self.window == Duration::from_secs(60) {
            format!("{} per minute", self.limit)
        } else {
            format!("{} per {}s", self.limit, self.window.as_secs())
        }
    }
}
