//! Session play history and per-title play counts.
//!
//! `ActivityTracker` is a plain value owned by whoever runs the session.
//! `HistoryStore` optionally keeps its history on disk between runs.

mod store;
mod tracker;

pub use store::*;
pub use tracker::*;
