//! widgetdb - in-memory store for z-ordered rectangular widgets
//!
//! Widgets are axis-aligned rectangles with a unique stacking order (zIndex).
//! The store keeps them indexed by id, by zIndex and by their four edges, so
//! lookups, topmost-widget queries and area containment queries stay cheap.
//!
//! # Quick Start
//!
//! ```
//! use widgetdb::{CreateWidget, WidgetDb, WidgetDbConfig};
//!
//! let db = WidgetDb::open(&WidgetDbConfig::default())?;
//!
//! // Lands on top of everything
//! let a = db.create(CreateWidget::new(0, 0, 10, 10))?;
//! // Pushes `a` (and anything stacked contiguously above it) up by one
//! let b = db.create(CreateWidget::new(5, 5, 2, 2).with_z_index(a.z_index()))?;
//!
//! assert_eq!(db.get_by_id(a.id()).unwrap().z_index(), b.z_index() + 1);
//! assert_eq!(db.get_in_area(0, 10, 0, 10)?.len(), 2);
//! # Ok::<(), widgetdb::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `widgetdb-core`: domain types, errors, id generators, store traits
//! - `widgetdb-storage`: the unlocked indexed table
//! - `widgetdb-concurrency`: the lock-guarded store and atomic blocks
//! - `widgetdb-engine`: the request-level service and configuration

pub use widgetdb_concurrency::InMemoryWidgetStore;
pub use widgetdb_core::{
    Area, AtomicScope, Error, Geometry, IdGenerator, KeyGenerator, NewWidget, Result,
    SequentialIds, Timestamp, UuidIds, Widget, WidgetBuilder, WidgetId, WidgetKey,
    WidgetRepository,
};
pub use widgetdb_engine::*;
pub use widgetdb_storage::WidgetTable;
