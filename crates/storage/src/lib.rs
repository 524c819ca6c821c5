//! Storage layer for widgetdb
//!
//! This crate implements the in-memory widget table with:
//! - PrimaryMap: FxHashMap from id to record
//! - OrderIndex: BTreeMap from zIndex to id
//! - SpatialIndex: four edge-keyed bucket maps for area queries
//! - shift_upwards: contiguous-run zIndex shifting
//! - WidgetTable: the composite that keeps all three in step
//!
//! Nothing here locks. `widgetdb-concurrency` wraps a [`WidgetTable`] in a
//! reader/writer lock to provide the shared store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod order;
pub mod primary;
pub mod record;
pub mod shift;
pub mod spatial;
pub mod table;

pub use order::OrderIndex;
pub use primary::PrimaryMap;
pub use record::WidgetRecord;
pub use shift::shift_upwards;
pub use spatial::SpatialIndex;
pub use table::WidgetTable;
