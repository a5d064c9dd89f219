use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};

/// Time source for the engine. Everything that stamps events or checks
/// the rate-limit window goes through this, so tests can drive time.
pub trait Clock {
    /// Current instant, carrying the local UTC offset it was observed in.
    fn now(&self) -> DateTime<FixedOffset>;

    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Hand-advanced clock. Clones share the same underlying instant, so a
/// test can keep a handle and move time under a component that owns one.
#[derive(Debug, Clone)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
    offset: FixedOffset,
}

impl ManualClock {
    pub fn starting_at(start: DateTime<FixedOffset>) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(start.timestamp_millis())),
            offset: *start.offset(),
        }
    }

    pub fn advance_ms(&self, delta: i64) {
        self.millis.fetch_add(delta, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let ms = self.millis.load(Ordering::Relaxed);
        Utc.timestamp_millis_opt(ms)
            .single()
            .unwrap_or_default()
            .with_timezone(&self.offset)
    }
}
