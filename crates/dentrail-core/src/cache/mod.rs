//! Memoization in front of the completion engine.
//!
//! `Tracker` keeps the roster, catalog, session log and attendance log,
//! and caches the coverage index and completion matrix keyed by a version
//! counter. Every mutation increments the counter, so the next query
//! rebuilds from scratch; nothing is ever patched incrementally.

pub mod tracker;

pub use tracker::{CachedData, Snapshot, Tracker};
