//! Shared helpers for the end-to-end suite.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::Arc;

pub use widgetdb::{
    CreateWidget, Error, UpdateWidget, Widget, WidgetDb, WidgetDbConfig, WidgetKey,
};

/// Fresh database with sequential ids
pub fn open_db() -> WidgetDb {
    WidgetDb::open(&WidgetDbConfig::default()).unwrap()
}

/// Fresh database shared across threads
pub fn open_shared_db() -> Arc<WidgetDb> {
    Arc::new(open_db())
}

/// zIndex values in stacking order
pub fn z_indexes(db: &WidgetDb) -> Vec<i32> {
    db.get_all().iter().map(Widget::z_index).collect()
}

/// Create a 10x10 widget at the origin with an explicit zIndex
pub fn create_at(db: &WidgetDb, z_index: i32) -> Widget<WidgetKey> {
    db.create(CreateWidget::new(0, 0, 10, 10).with_z_index(z_index))
        .unwrap()
}
