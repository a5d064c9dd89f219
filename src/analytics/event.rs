use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Event type tags the summary engine keys on.
pub const PAGE_LOAD: &str = "page_load";
pub const SCROLL_DEPTH: &str = "scroll_depth";
pub const SECTION_VIEW: &str = "section_view";
pub const LINK_CLICK: &str = "link_click";
pub const BUTTON_CLICK: &str = "button_click";
pub const CARD_INTERACTION: &str = "card_interaction";
pub const FORM_START: &str = "form_start";
pub const FIELD_COMPLETE: &str = "field_complete";
pub const FORM_SUBMIT: &str = "form_submit";
pub const HEARTBEAT: &str = "heartbeat";
pub const SESSION_END: &str = "session_end";
pub const DEVICE_INFO: &str = "device_info";

/// One recorded interaction or lifecycle occurrence. The envelope is
/// fixed; per-type payload fields ride flattened alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: String,
    pub session_id: String,
    pub user_id: String,
    pub timestamp: DateTime<FixedOffset>,
    pub url: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Event {
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn num_field(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }
}
