use beacon::analytics::log::{EventLog, EVENTS_KEY, USER_ID_KEY};
use beacon::clock::{Clock, ManualClock};
use beacon::storage::{KeyValueStore, MemoryStore, StoreError};
use chrono::DateTime;
use serde_json::{json, Map, Value};

fn test_clock() -> ManualClock {
    ManualClock::starting_at(DateTime::parse_from_rfc3339("2026-08-25T14:00:00+02:00").unwrap())
}

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[test]
fn append_then_load_preserves_call_order() {
    let mut log = EventLog::new(MemoryStore::new(), test_clock(), "local://page");

    log.append("page_load", fields(json!({ "load_time": 120 })));
    log.append("section_view", fields(json!({ "section": "about" })));
    log.append("heartbeat", fields(json!({ "time_elapsed": 30000 })));

    let events = log.load();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].event_type, "page_load");
    assert_eq!(events[1].event_type, "section_view");
    assert_eq!(events[2].event_type, "heartbeat");
}

#[test]
fn every_event_carries_the_ambient_envelope() {
    let clock = test_clock();
    let mut log = EventLog::new(MemoryStore::new(), clock.clone(), "local://page");

    log.append("page_load", Map::new());

    let events = log.load();
    assert_eq!(events[0].session_id, log.session_id());
    assert_eq!(events[0].user_id, log.user_id());
    assert_eq!(events[0].url, "local://page");
    assert_eq!(events[0].timestamp, clock.now());
}

#[test]
fn log_is_capped_at_one_thousand_fifo() {
    let mut log = EventLog::new(MemoryStore::new(), test_clock(), "local://page");

    for n in 0..1005u32 {
        log.append("heartbeat", fields(json!({ "n": n })));
    }

    let events = log.load();
    assert_eq!(events.len(), 1000, "log must stay capped at rest");
    assert_eq!(events[0].num_field("n"), Some(5.0), "oldest evicted first");
    assert_eq!(events[999].num_field("n"), Some(1004.0));
}

#[test]
fn malformed_blob_reads_as_empty() {
    let mut store = MemoryStore::new();
    store.set(EVENTS_KEY, "not json at all").unwrap();

    let log = EventLog::new(store, test_clock(), "local://page");
    assert!(log.load().is_empty());
}

#[test]
fn malformed_blob_is_replaced_on_next_append() {
    let mut store = MemoryStore::new();
    store.set(EVENTS_KEY, "[{ truncated").unwrap();

    let mut log = EventLog::new(store, test_clock(), "local://page");
    log.append("page_load", Map::new());

    assert_eq!(log.load().len(), 1);
}

#[test]
fn clear_removes_log_and_user_identity() {
    let mut log = EventLog::new(MemoryStore::new(), test_clock(), "local://page");
    log.append("page_load", Map::new());
    assert!(log.store().get(USER_ID_KEY).unwrap().is_some());

    log.clear();

    assert!(log.store().get(EVENTS_KEY).unwrap().is_none());
    assert!(log.store().get(USER_ID_KEY).unwrap().is_none());
}

#[test]
fn user_id_survives_across_sessions() {
    let dir = tempfile::tempdir().unwrap();

    let first = EventLog::new(
        beacon::storage::FileStore::new(dir.path()).unwrap(),
        test_clock(),
        "local://page",
    );
    let user_id = first.user_id().to_string();
    let first_session = first.session_id().to_string();
    drop(first);

    let second = EventLog::new(
        beacon::storage::FileStore::new(dir.path()).unwrap(),
        test_clock(),
        "local://page",
    );
    assert_eq!(second.user_id(), user_id, "user identity is persistent");
    assert_ne!(
        second.session_id(),
        first_session,
        "session id is per-visit"
    );
}

/// Store whose writes always fail, for the degraded-mode path.
struct WriteFailStore {
    inner: MemoryStore,
}

impl KeyValueStore for WriteFailStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("quota exceeded".into()))
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner.delete(key)
    }
}

#[test]
fn storage_write_failure_is_swallowed() {
    let store = WriteFailStore {
        inner: MemoryStore::new(),
    };
    let mut log = EventLog::new(store, test_clock(), "local://page");

    // Must not panic or error; the append is just lost.
    log.append("page_load", Map::new());
    assert!(log.load().is_empty());
}
