use serde::{Deserialize, Serialize};

/// The feed protocol: one observed page interaction per value. UI
/// observers (or the stdin driver) hand these to the tracker, which
/// turns them into persisted analytics events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Interaction {
    PageLoad {
        load_time_ms: u64,
        #[serde(default)]
        referrer: String,
    },
    Scroll {
        percent: u8,
    },
    SectionView {
        section: String,
    },
    LinkClick {
        href: String,
        text: String,
    },
    ButtonClick {
        text: String,
        #[serde(default)]
        id: String,
    },
    CardClick {
        card_type: String,
        title: String,
    },
    FormStart {
        first_field: String,
    },
    FieldComplete {
        field: String,
        length: usize,
    },
    FormSubmit,
    DeviceInfo {
        user_agent: String,
        #[serde(default)]
        language: String,
        #[serde(default)]
        platform: String,
    },
}
