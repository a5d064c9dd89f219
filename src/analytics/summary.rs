use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use super::event::{self, Event};

/// Aggregate statistics over the full event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_events: usize,
    /// Distinct session ids seen in the log.
    pub sessions: usize,
    pub page_loads: usize,
    pub form_submissions: usize,
    /// `("none", 0)` when no section has been viewed. Ties go to the
    /// lexicographically smaller section name.
    pub most_viewed_section: (String, u64),
    /// Mean of `total_time` over session_end events, whole seconds.
    pub average_session_time: u64,
    /// Top 5 click targets, descending by count.
    pub top_interactions: Vec<(String, u64)>,
    pub device_breakdown: DeviceBreakdown,
    /// Hour-of-day (0-23, each event's own local offset) to event count.
    pub hourly_distribution: HashMap<u8, u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceBreakdown {
    pub mobile: u64,
    pub desktop: u64,
}

/// Derives a `Summary` from the log contents. Pure: same events in,
/// same summary out.
pub fn summarize(events: &[Event]) -> Summary {
    let sessions: HashSet<&str> = events.iter().map(|e| e.session_id.as_str()).collect();

    Summary {
        total_events: events.len(),
        sessions: sessions.len(),
        page_loads: count_of_type(events, event::PAGE_LOAD),
        form_submissions: count_of_type(events, event::FORM_SUBMIT),
        most_viewed_section: most_viewed_section(events),
        average_session_time: average_session_time(events),
        top_interactions: top_interactions(events),
        device_breakdown: device_breakdown(events),
        hourly_distribution: hourly_distribution(events),
    }
}

fn count_of_type(events: &[Event], event_type: &str) -> usize {
    events.iter().filter(|e| e.event_type == event_type).count()
}

fn most_viewed_section(events: &[Event]) -> (String, u64) {
    let mut views: BTreeMap<&str, u64> = BTreeMap::new();
    for event in events.iter().filter(|e| e.event_type == event::SECTION_VIEW) {
        if let Some(section) = event.str_field("section") {
            *views.entry(section).or_insert(0) += 1;
        }
    }

    let mut best: Option<(&str, u64)> = None;
    for (section, count) in views {
        let better = match best {
            None => true,
            // Higher count wins; on a tie the smaller name wins.
            Some((best_section, best_count)) => {
                count > best_count || (count == best_count && section < best_section)
            }
        };
        if better {
            best = Some((section, count));
        }
    }

    best.map(|(section, count)| (section.to_string(), count))
        .unwrap_or_else(|| ("none".to_string(), 0))
}

fn average_session_time(events: &[Event]) -> u64 {
    let totals: Vec<f64> = events
        .iter()
        .filter(|e| e.event_type == event::SESSION_END)
        .map(|e| e.num_field("total_time").unwrap_or(0.0))
        .collect();
    if totals.is_empty() {
        return 0;
    }
    let mean_ms = totals.iter().sum::<f64>() / totals.len() as f64;
    (mean_ms / 1000.0).round() as u64
}

fn top_interactions(events: &[Event]) -> Vec<(String, u64)> {
    const CLICK_TYPES: [&str; 3] = [
        event::LINK_CLICK,
        event::BUTTON_CLICK,
        event::CARD_INTERACTION,
    ];

    let mut counts: HashMap<&str, u64> = HashMap::new();
    for event in events
        .iter()
        .filter(|e| CLICK_TYPES.contains(&e.event_type.as_str()))
    {
        // Key precedence: link target, then button label, then card title.
        let key = event
            .str_field("href")
            .or_else(|| event.str_field("button_text"))
            .or_else(|| event.str_field("card_title"))
            .unwrap_or("unknown");
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(key, count)| (key.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(5);
    ranked
}

const MOBILE_MARKERS: [&str; 4] = ["mobile", "android", "iphone", "ipad"];

fn device_breakdown(events: &[Event]) -> DeviceBreakdown {
    let mut breakdown = DeviceBreakdown::default();
    for event in events.iter().filter(|e| e.event_type == event::DEVICE_INFO) {
        let agent = event
            .str_field("user_agent")
            .unwrap_or("")
            .to_ascii_lowercase();
        if MOBILE_MARKERS.iter().any(|marker| agent.contains(marker)) {
            breakdown.mobile += 1;
        } else {
            breakdown.desktop += 1;
        }
    }
    breakdown
}

fn hourly_distribution(events: &[Event]) -> HashMap<u8, u64> {
    let mut hourly = HashMap::new();
    for event in events {
        *hourly.entry(event.timestamp.hour() as u8).or_insert(0) += 1;
    }
    hourly
}
