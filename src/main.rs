use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use beacon::analytics::export::{write_export, ExportDocument};
use beacon::analytics::summary::summarize;
use beacon::clock::{Clock, SystemClock};
use beacon::engine::{Interaction, Tracker};
use beacon::storage::FileStore;

const HEARTBEAT_SECS: u64 = 30;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".beacon"));
    let page_url =
        std::env::var("BEACON_PAGE_URL").unwrap_or_else(|_| "local://page".to_string());

    let store = FileStore::new(&data_dir)?;
    let clock = SystemClock;
    let mut tracker = Tracker::new(store, clock, page_url);
    info!(session = tracker.session_id(), "session started");

    let mut heartbeat = tokio::time::interval(Duration::from_secs(HEARTBEAT_SECS));
    heartbeat.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // interval fires immediately; consume the first tick so the first
    // heartbeat lands a full period in.
    heartbeat.tick().await;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    info!("reading interactions from stdin, one JSON value per line");

    loop {
        tokio::select! {
            _ = heartbeat.tick() => {
                tracker.heartbeat();
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<Interaction>(line) {
                            Ok(interaction) => tracker.observe(interaction),
                            Err(e) => warn!("unparseable interaction: {e}"),
                        }
                    }
                    Ok(None) => break, // feed closed
                    Err(e) => {
                        warn!("stdin read failed: {e}");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, closing session");
                break;
            }
        }
    }

    tracker.end_session();

    let events = tracker.events();
    let summary = summarize(&events);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let doc = ExportDocument::build(events, clock.now());
    let path = write_export(&doc, &data_dir)?;
    info!(path = %path.display(), "analytics export written");

    Ok(())
}
