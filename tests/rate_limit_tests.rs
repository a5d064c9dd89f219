use beacon::contact::rate_limit::{RateLimiter, MAX_IN_WINDOW, RATE_LIMIT_KEY, WINDOW_MS};
use beacon::storage::{KeyValueStore, MemoryStore};

const T0: i64 = 1_700_000_000_000;

#[test]
fn allows_until_the_window_fills() {
    let mut limiter = RateLimiter::new(MemoryStore::new());

    for i in 0..MAX_IN_WINDOW {
        assert!(limiter.allow(T0 + i as i64), "submission {i} should pass");
        limiter.record(T0 + i as i64);
    }

    assert!(!limiter.allow(T0 + 10), "sixth submission must be blocked");
}

#[test]
fn window_elapse_readmits() {
    let mut limiter = RateLimiter::new(MemoryStore::new());

    for _ in 0..MAX_IN_WINDOW {
        limiter.record(T0);
    }
    assert!(!limiter.allow(T0 + 1));

    // Just past the window from the earliest record.
    assert!(limiter.allow(T0 + WINDOW_MS + 1));
}

#[test]
fn records_age_out_at_exactly_the_window_edge() {
    let mut limiter = RateLimiter::new(MemoryStore::new());

    for _ in 0..MAX_IN_WINDOW {
        limiter.record(T0);
    }

    assert!(!limiter.allow(T0 + WINDOW_MS - 1));
    // The retain comparison is strict, so an exactly window-old record
    // is discarded.
    assert!(limiter.allow(T0 + WINDOW_MS));
}

#[test]
fn record_does_not_prune() {
    let mut limiter = RateLimiter::new(MemoryStore::new());

    for _ in 0..MAX_IN_WINDOW {
        limiter.record(T0);
    }
    limiter.record(T0 + WINDOW_MS + 1);

    let blob = limiter.store().get(RATE_LIMIT_KEY).unwrap().unwrap();
    let stamps: Vec<i64> = serde_json::from_str(&blob).unwrap();
    assert_eq!(stamps.len(), 6, "record appends without pruning");

    // allow() prunes the five stale stamps and persists the result.
    assert!(limiter.allow(T0 + WINDOW_MS + 2));
    let blob = limiter.store().get(RATE_LIMIT_KEY).unwrap().unwrap();
    let stamps: Vec<i64> = serde_json::from_str(&blob).unwrap();
    assert_eq!(stamps, vec![T0 + WINDOW_MS + 1]);
}

#[test]
fn malformed_state_reads_as_empty() {
    let mut store = MemoryStore::new();
    store.set(RATE_LIMIT_KEY, "{{ nope").unwrap();

    let mut limiter = RateLimiter::new(store);
    assert!(limiter.allow(T0));
}
