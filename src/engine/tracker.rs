use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use super::interaction::Interaction;
use crate::analytics::event;
use crate::analytics::log::EventLog;
use crate::analytics::summary::{summarize, Summary};
use crate::clock::Clock;
use crate::storage::KeyValueStore;

/// Scroll depth thresholds that each fire one event per session.
pub const SCROLL_MILESTONES: [u8; 4] = [25, 50, 75, 100];

/// Per-session context object. Owns the event log plus the derived
/// state a single page visit accumulates (current section, scroll
/// progress, interaction count).
pub struct Tracker<S: KeyValueStore, C: Clock> {
    log: EventLog<S, C>,
    clock: C,
    started_at_ms: i64,
    current_section: Option<String>,
    section_views: BTreeMap<String, u64>,
    fired_milestones: Vec<u8>,
    max_scroll: u8,
    interactions_seen: u64,
}

impl<S: KeyValueStore, C: Clock + Clone> Tracker<S, C> {
    pub fn new(store: S, clock: C, url: impl Into<String>) -> Self {
        let log = EventLog::new(store, clock.clone(), url);
        let started_at_ms = clock.now_ms();
        Self {
            log,
            clock,
            started_at_ms,
            current_section: None,
            section_views: BTreeMap::new(),
            fired_milestones: Vec::new(),
            max_scroll: 0,
            interactions_seen: 0,
        }
    }

    pub fn session_id(&self) -> &str {
        self.log.session_id()
    }

    pub fn user_id(&self) -> &str {
        self.log.user_id()
    }

    pub fn observe(&mut self, interaction: Interaction) {
        match interaction {
            Interaction::PageLoad {
                load_time_ms,
                referrer,
            } => {
                self.append(
                    event::PAGE_LOAD,
                    json!({ "load_time": load_time_ms, "referrer": referrer }),
                );
            }
            Interaction::Scroll { percent } => {
                let percent = percent.min(100);
                if percent > self.max_scroll {
                    self.max_scroll = percent;
                }
                for milestone in SCROLL_MILESTONES {
                    if percent >= milestone && !self.fired_milestones.contains(&milestone) {
                        self.fired_milestones.push(milestone);
                        self.append(event::SCROLL_DEPTH, json!({ "percentage": milestone }));
                    }
                }
            }
            Interaction::SectionView { section } => {
                *self.section_views.entry(section.clone()).or_insert(0) += 1;
                self.current_section = Some(section.clone());
                self.append(event::SECTION_VIEW, json!({ "section": section }));
            }
            Interaction::LinkClick { href, text } => {
                self.interactions_seen += 1;
                let fields = json!({
                    "href": href,
                    "text": text,
                    "section": self.section_name(),
                });
                self.append(event::LINK_CLICK, fields);
            }
            Interaction::ButtonClick { text, id } => {
                self.interactions_seen += 1;
                let fields = json!({
                    "button_text": text,
                    "button_id": id,
                    "section": self.section_name(),
                });
                self.append(event::BUTTON_CLICK, fields);
            }
            Interaction::CardClick { card_type, title } => {
                self.interactions_seen += 1;
                self.append(
                    event::CARD_INTERACTION,
                    json!({ "card_type": card_type, "card_title": title }),
                );
            }
            Interaction::FormStart { first_field } => {
                self.append(event::FORM_START, json!({ "first_field": first_field }));
            }
            Interaction::FieldComplete { field, length } => {
                self.append(
                    event::FIELD_COMPLETE,
                    json!({ "field_name": field, "field_length": length }),
                );
            }
            Interaction::FormSubmit => {
                self.append(event::FORM_SUBMIT, json!({}));
            }
            Interaction::DeviceInfo {
                user_agent,
                language,
                platform,
            } => {
                self.append(
                    event::DEVICE_INFO,
                    json!({
                        "user_agent": user_agent,
                        "language": language,
                        "platform": platform,
                    }),
                );
            }
        }
    }

    /// Timer-driven liveness marker (the driver fires this every 30 s).
    pub fn heartbeat(&mut self) {
        let elapsed = self.clock.now_ms() - self.started_at_ms;
        let fields = json!({
            "time_elapsed": elapsed,
            "current_section": self.section_name(),
        });
        self.append(event::HEARTBEAT, fields);
    }

    /// Closes out the visit with the session totals.
    pub fn end_session(&mut self) {
        let total = self.clock.now_ms() - self.started_at_ms;
        let sections: Vec<&String> = self.section_views.keys().collect();
        let fields = json!({
            "total_time": total,
            "sections_viewed": sections,
            "max_scroll": self.max_scroll,
            "interactions": self.interactions_seen,
        });
        self.append(event::SESSION_END, fields);
    }

    pub fn events(&self) -> Vec<event::Event> {
        self.log.load()
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.log.load())
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }

    fn section_name(&self) -> &str {
        self.current_section.as_deref().unwrap_or("unknown")
    }

    fn append(&mut self, event_type: &str, fields: Value) {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.log.append(event_type, fields);
    }
}
