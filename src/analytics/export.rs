use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::event::Event;
use super::summary::{summarize, Summary};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export io: {0}")]
    Io(#[from] std::io::Error),
    #[error("export serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The downloadable document: the summary is derived from the very
/// events it ships with, so re-parsing and re-summarizing round-trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub summary: Summary,
    pub events: Vec<Event>,
    pub exported_at: DateTime<FixedOffset>,
}

impl ExportDocument {
    pub fn build(events: Vec<Event>, exported_at: DateTime<FixedOffset>) -> Self {
        let summary = summarize(&events);
        Self {
            summary,
            events,
            exported_at,
        }
    }

    /// File name carries the export date.
    pub fn file_name(&self) -> String {
        format!("beacon-analytics-{}.json", self.exported_at.format("%Y-%m-%d"))
    }
}

/// Writes the pretty-printed document into `dir` and returns the path.
pub fn write_export(doc: &ExportDocument, dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(doc.file_name());
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(&path, json)?;
    Ok(path)
}
