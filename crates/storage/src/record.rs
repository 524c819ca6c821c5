//! Internal widget record
//!
//! Mutable counterpart of [`Widget`]. Index structures refer to records by id, so
//! a record's fields can change in place without rebuilding any index entry that
//! does not depend on the changed field. The id never changes.

use widgetdb_core::{Geometry, Timestamp, Widget, WidgetId};

/// Stored state of one widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRecord<Id> {
    id: Id,
    geometry: Geometry,
    z_index: i32,
    updated_at: Timestamp,
}

impl<Id: WidgetId> WidgetRecord<Id> {
    /// Take ownership of a widget's fields
    pub fn from_widget(widget: Widget<Id>) -> Self {
        let geometry = widget.geometry();
        let z_index = widget.z_index();
        let updated_at = widget.updated_at();
        Self {
            id: widget.into_id(),
            geometry,
            z_index,
            updated_at,
        }
    }

    /// Immutable snapshot
    pub fn to_widget(&self) -> Widget<Id> {
        Widget::from_parts(self.id.clone(), self.geometry, self.z_index, self.updated_at)
    }

    /// Consume into a snapshot
    pub fn into_widget(self) -> Widget<Id> {
        Widget::from_parts(self.id, self.geometry, self.z_index, self.updated_at)
    }

    /// Record id
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Current rectangle
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Current stacking index
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Move to another stacking index; timestamp untouched
    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    /// Overwrite every mutable field from `widget`
    ///
    /// The caller keeps the indexes in step; `widget` must carry this record's id.
    pub fn update_from(&mut self, widget: &Widget<Id>) {
        debug_assert_eq!(&self.id, widget.id());
        self.geometry = widget.geometry();
        self.z_index = widget.z_index();
        self.updated_at = widget.updated_at();
    }
}
