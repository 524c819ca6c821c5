//! Widget engine for widgetdb
//!
//! This crate sits on top of the store layers:
//! - WidgetService: create/update/delete/query requests as atomic blocks
//! - WidgetDbConfig: `widgetdb.toml` configuration
//! - WidgetDb: config-wired service over the in-memory store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod db;
pub mod service;

pub use config::{WidgetDbConfig, CONFIG_FILE_NAME};
pub use db::WidgetDb;
pub use service::{CreateWidget, UpdateWidget, WidgetService};
