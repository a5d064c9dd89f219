//! The wiring layer: turns observed page interactions into persisted
//! analytics events. Everything below it (log, summary, storage) is
//! unit-testable without this module.

pub mod interaction;
pub mod tracker;

pub use interaction::Interaction;
pub use tracker::Tracker;
