//! Core types and traits for widgetdb
//!
//! This crate defines the foundational types used throughout the system:
//! - Widget, Geometry, NewWidget, WidgetBuilder: the stored value and its requests
//! - Area: containment query rectangle
//! - Timestamp: modification time
//! - WidgetId, IdGenerator: pluggable identifiers
//! - Error: error type hierarchy
//! - Traits: store contracts (WidgetRepository, AtomicScope)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod area;
pub mod error;
pub mod id;
pub mod timestamp;
pub mod traits;
pub mod widget;

pub use area::Area;
pub use error::{Error, Result};
pub use id::{IdGenerator, KeyGenerator, SequentialIds, UuidIds, WidgetId, WidgetKey};
pub use timestamp::Timestamp;
pub use traits::{AtomicScope, WidgetRepository};
pub use widget::{Geometry, NewWidget, Widget, WidgetBuilder};
