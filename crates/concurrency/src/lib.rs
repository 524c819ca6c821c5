//! Concurrency layer for widgetdb
//!
//! This crate wraps the unlocked [`WidgetTable`](widgetdb_storage::WidgetTable)
//! in a task-fair reader/writer lock:
//! - InMemoryWidgetStore: the shared store, one lock guarding all indexes
//! - Reads take the shared side, mutations the exclusive side
//! - run_atomically: holds the exclusive side for a whole closure

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod store;

pub use store::InMemoryWidgetStore;
