use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

use super::event::Event;
use crate::clock::Clock;
use crate::storage::KeyValueStore;

pub const EVENTS_KEY: &str = "analytics_events";
pub const USER_ID_KEY: &str = "analytics_user_id";

/// At-rest cap. Oldest entries are evicted first once exceeded.
pub const MAX_EVENTS: usize = 1000;

/// Bounded, persisted event log. Every append is a full
/// read-modify-write of the blob under `EVENTS_KEY`.
///
/// The session id lives for the life of this value; the user id is
/// loaded from the store, or generated and persisted on first use.
pub struct EventLog<S: KeyValueStore, C: Clock> {
    store: S,
    clock: C,
    session_id: String,
    user_id: String,
    url: String,
}

impl<S: KeyValueStore, C: Clock> EventLog<S, C> {
    pub fn new(mut store: S, clock: C, url: impl Into<String>) -> Self {
        let session_id = format!("session_{}", Uuid::new_v4().simple());
        let user_id = load_or_create_user_id(&mut store);
        Self {
            store,
            clock,
            session_id,
            user_id,
            url: url.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stamps `fields` with the ambient session id, user id, url and
    /// current time, then persists. A storage failure drops this append
    /// (warn only) rather than surfacing an error.
    pub fn append(&mut self, event_type: &str, fields: Map<String, Value>) {
        let event = Event {
            event_type: event_type.to_string(),
            session_id: self.session_id.clone(),
            user_id: self.user_id.clone(),
            timestamp: self.clock.now(),
            url: self.url.clone(),
            fields,
        };

        let mut events = self.load();
        events.push(event);
        if events.len() > MAX_EVENTS {
            let excess = events.len() - MAX_EVENTS;
            events.drain(..excess);
        }

        match serde_json::to_string(&events) {
            Ok(blob) => {
                if let Err(e) = self.store.set(EVENTS_KEY, &blob) {
                    warn!("event log write failed, append dropped: {e}");
                }
            }
            Err(e) => warn!("event log serialization failed: {e}"),
        }
    }

    /// Missing or malformed blobs read as empty, never as an error.
    pub fn load(&self) -> Vec<Event> {
        match self.store.get(EVENTS_KEY) {
            Ok(Some(blob)) => serde_json::from_str(&blob).unwrap_or_default(),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("event log read failed: {e}");
                Vec::new()
            }
        }
    }

    /// Drops the persisted log and the persisted user identity.
    pub fn clear(&mut self) {
        if let Err(e) = self.store.delete(EVENTS_KEY) {
            warn!("event log delete failed: {e}");
        }
        if let Err(e) = self.store.delete(USER_ID_KEY) {
            warn!("user id delete failed: {e}");
        }
    }
}

fn load_or_create_user_id<S: KeyValueStore>(store: &mut S) -> String {
    if let Ok(Some(id)) = store.get(USER_ID_KEY) {
        if !id.is_empty() {
            return id;
        }
    }
    let id = format!("user_{}", Uuid::new_v4().simple());
    if let Err(e) = store.set(USER_ID_KEY, &id) {
        warn!("could not persist user id: {e}");
    }
    id
}
