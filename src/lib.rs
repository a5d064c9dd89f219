//! Beacon: a local analytics engine for a single page. Bounded event
//! log over a key-value store, pure summary derivation, sliding-window
//! contact rate limiting, and a provider fallback delivery chain.

pub mod analytics;
pub mod clock;
pub mod contact;
pub mod engine;
pub mod storage;

pub use engine::tracker::Tracker;
