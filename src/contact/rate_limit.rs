use tracing::warn;

use crate::storage::KeyValueStore;

pub const RATE_LIMIT_KEY: &str = "contact_rate_limit";
pub const WINDOW_MS: i64 = 3_600_000;
pub const MAX_IN_WINDOW: usize = 5;

/// Sliding-window submission guard over a persisted timestamp list.
///
/// Check-then-record is not atomic; the caller is assumed to be the
/// single writer for the life of the page, so no interleaving occurs in
/// practice.
pub struct RateLimiter<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> RateLimiter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Prunes timestamps that have left the window, persists the pruned
    /// list, and admits the caller iff fewer than `MAX_IN_WINDOW`
    /// remain.
    pub fn allow(&mut self, now_ms: i64) -> bool {
        let mut stamps = self.load();
        let window_start = now_ms - WINDOW_MS;
        stamps.retain(|&t| t > window_start);
        self.save(&stamps);
        stamps.len() < MAX_IN_WINDOW
    }

    /// Appends the current timestamp. Deliberately does not prune.
    pub fn record(&mut self, now_ms: i64) {
        let mut stamps = self.load();
        stamps.push(now_ms);
        self.save(&stamps);
    }

    fn load(&self) -> Vec<i64> {
        match self.store.get(RATE_LIMIT_KEY) {
            Ok(Some(blob)) => serde_json::from_str(&blob).unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn save(&mut self, stamps: &[i64]) {
        match serde_json::to_string(stamps) {
            Ok(blob) => {
                if let Err(e) = self.store.set(RATE_LIMIT_KEY, &blob) {
                    warn!("rate limit write failed: {e}");
                }
            }
            Err(e) => warn!("rate limit serialization failed: {e}"),
        }
    }
}
