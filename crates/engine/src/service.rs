//! WidgetService: request-level widget operations
//!
//! Sits above any [`WidgetRepository`] and turns create/update requests into
//! atomic blocks:
//! - create: picks or frees a zIndex, then adds, all under one block
//! - update: read, merge, save under one block; never shifts
//!
//! Timestamps are taken before the block starts.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use tracing::debug;

use widgetdb_core::{
    Area, AtomicScope, Error, Geometry, NewWidget, Result, Timestamp, Widget, WidgetBuilder,
    WidgetId, WidgetRepository,
};

/// Request to create a widget
///
/// Without a `z_index` the widget lands on top of every other widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWidget {
    /// Left edge
    pub x: i32,
    /// Bottom edge
    pub y: i32,
    /// Requested zIndex; occupants are shifted up to make room
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// Width, non-negative
    pub width: i32,
    /// Height, non-negative
    pub height: i32,
}

impl CreateWidget {
    /// Request a widget at `(x, y)` with the given size, placed on top
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            z_index: None,
            width,
            height,
        }
    }

    /// Request a specific zIndex
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }
}

/// Partial update of an existing widget; absent fields keep their value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateWidget<Id> {
    /// Widget to update
    pub id: Id,
    /// New left edge
    pub x: Option<i32>,
    /// New bottom edge
    pub y: Option<i32>,
    /// New zIndex; must be free or the widget's own
    pub z_index: Option<i32>,
    /// New width
    pub width: Option<i32>,
    /// New height
    pub height: Option<i32>,
}

impl<Id: Clone> UpdateWidget<Id> {
    /// Update nothing yet on widget `id`
    pub fn new(id: Id) -> Self {
        Self {
            id,
            x: None,
            y: None,
            z_index: None,
            width: None,
            height: None,
        }
    }

    /// Set x
    pub fn with_x(mut self, x: i32) -> Self {
        self.x = Some(x);
        self
    }

    /// Set y
    pub fn with_y(mut self, y: i32) -> Self {
        self.y = Some(y);
        self
    }

    /// Set zIndex
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Set width
    pub fn with_width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set height
    pub fn with_height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    fn apply(&self, current: &Widget<Id>, updated_at: Timestamp) -> Result<Widget<Id>> {
        let mut builder = WidgetBuilder::from(current).with_updated_at(updated_at);
        if let Some(x) = self.x {
            builder = builder.with_x(x);
        }
        if let Some(y) = self.y {
            builder = builder.with_y(y);
        }
        if let Some(z_index) = self.z_index {
            builder = builder.with_z_index(z_index);
        }
        if let Some(width) = self.width {
            builder = builder.with_width(width);
        }
        if let Some(height) = self.height {
            builder = builder.with_height(height);
        }
        builder.build()
    }
}

/// zIndex just above `max`, or just above `i32::MIN` on an empty store
fn next_top_z_index(max: Option<i32>) -> Result<i32> {
    let max = max.unwrap_or(i32::MIN);
    max.checked_add(1).ok_or_else(|| Error::overflow(max))
}

/// Widget operations over a repository
#[derive(Debug)]
pub struct WidgetService<Id, R> {
    repository: R,
    _id: PhantomData<fn() -> Id>,
}

impl<Id, R> WidgetService<Id, R>
where
    Id: WidgetId,
    R: WidgetRepository<Id>,
{
    /// Serve requests against `repository`
    pub fn new(repository: R) -> Self {
        debug!(len = repository.len(), "Created widget service");
        Self {
            repository,
            _id: PhantomData,
        }
    }

    /// The underlying repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Create a widget
    ///
    /// With an explicit zIndex, widgets in the contiguous run starting there
    /// are shifted up by one first. Without one, the widget goes on top.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidGeometry`] for a negative width or height
    /// - [`Error::ArithmeticOverflow`] if no zIndex above the current maximum
    ///   exists, or the shift would pass `i32::MAX`
    pub fn create(&self, request: CreateWidget) -> Result<Widget<Id>> {
        let updated_at = Timestamp::now();
        let geometry = Geometry::new(request.x, request.y, request.width, request.height)?;

        let widget = self.repository.run_atomically(|scope| {
            let z_index = match request.z_index {
                Some(z_index) => {
                    scope.shift_upwards(z_index)?;
                    z_index
                }
                None => next_top_z_index(scope.get_max_z_index())?,
            };
            scope.add(NewWidget::from_parts(geometry, z_index, updated_at))
        })?;

        debug!(id = ?widget.id(), z_index = widget.z_index(), "Created widget");
        Ok(widget)
    }

    /// Apply a partial update
    ///
    /// Returns `Ok(None)` if the widget does not exist.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidGeometry`] if the merged size is negative
    /// - [`Error::ZIndexConflict`] if the new zIndex belongs to another widget
    pub fn update(&self, request: UpdateWidget<Id>) -> Result<Option<Widget<Id>>> {
        let updated_at = Timestamp::now();
        self.repository.run_atomically(|scope| {
            let current = match scope.get_by_id(&request.id) {
                Some(current) => current,
                None => return Ok(None),
            };
            scope.save(request.apply(&current, updated_at)?)
        })
    }

    /// Delete a widget, reporting whether it existed
    pub fn delete(&self, id: &Id) -> bool {
        self.repository.delete_by_id(id)
    }

    /// Look up one widget
    pub fn get_by_id(&self, id: &Id) -> Option<Widget<Id>> {
        self.repository.get_by_id(id)
    }

    /// All widgets, ascending by zIndex
    pub fn get_all(&self) -> Vec<Widget<Id>> {
        self.repository.get_all()
    }

    /// Widgets fully inside the given rectangle, ascending by zIndex
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArea`] if `left > right` or `bottom > top`.
    pub fn get_in_area(&self, left: i32, right: i32, bottom: i32, top: i32) -> Result<Vec<Widget<Id>>> {
        let area = Area::new(left, right, bottom, top)?;
        Ok(self.repository.get_in_area(&area))
    }

    /// Delete every widget
    pub fn clear_all(&self) {
        self.repository.delete_all();
        debug!("Cleared all widgets");
    }
}
