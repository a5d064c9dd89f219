//! Local analytics: bounded event log + summary derivation.
//!
//! # PURITY INVARIANT
//! `summary::summarize` is a pure function of the event slice it is
//! given. It must never read the store or the clock; any state it needs
//! rides inside the events themselves.
//!
//! # DEGRADATION INVARIANT
//! Nothing in this module raises on storage trouble. A missing or
//! malformed log reads as empty; a failed write drops that append.

pub mod event;
pub mod export;
pub mod log;
pub mod summary;
