use beacon::storage::{FileStore, KeyValueStore, MemoryStore};

#[test]
fn memory_store_round_trips() {
    let mut store = MemoryStore::new();
    assert!(store.get("missing").unwrap().is_none());

    store.set("key", "value").unwrap();
    assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));

    store.set("key", "replaced").unwrap();
    assert_eq!(store.get("key").unwrap().as_deref(), Some("replaced"));

    store.delete("key").unwrap();
    assert!(store.get("key").unwrap().is_none());
}

#[test]
fn file_store_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path()).unwrap();

    assert!(store.get("missing").unwrap().is_none());

    store.set("analytics_events", "[1,2,3]").unwrap();
    assert_eq!(
        store.get("analytics_events").unwrap().as_deref(),
        Some("[1,2,3]")
    );

    store.delete("analytics_events").unwrap();
    assert!(store.get("analytics_events").unwrap().is_none());
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = FileStore::new(dir.path()).unwrap();
    store.set("analytics_user_id", "user_abc").unwrap();
    drop(store);

    let store = FileStore::new(dir.path()).unwrap();
    assert_eq!(
        store.get("analytics_user_id").unwrap().as_deref(),
        Some("user_abc")
    );
}

#[test]
fn delete_of_a_missing_key_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path()).unwrap();
    store.delete("never_written").unwrap();
}

#[test]
fn hostile_key_characters_are_sanitized() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path()).unwrap();

    store.set("../escape/attempt", "blob").unwrap();
    assert_eq!(
        store.get("../escape/attempt").unwrap().as_deref(),
        Some("blob")
    );

    // Everything stayed inside the root.
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}
