//! Widget value types
//!
//! - [`Geometry`]: validated rectangle (bottom-left corner plus non-negative size)
//! - [`Widget`]: immutable snapshot of a stored widget
//! - [`NewWidget`]: creation request handed to a repository, without an id
//! - [`WidgetBuilder`]: field-wise copy-and-modify of an existing widget
//!
//! Edges are derived in `i64` so `x + width` and `y + height` cannot overflow.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::timestamp::Timestamp;

/// Axis-aligned rectangle on the shared plane
///
/// Construction rejects negative width or height; zero is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Geometry {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Geometry {
    /// Validate and build a rectangle from its bottom-left corner and size
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self> {
        if width < 0 {
            return Err(Error::InvalidGeometry(format!(
                "width must be non-negative, got {}",
                width
            )));
        }
        if height < 0 {
            return Err(Error::InvalidGeometry(format!(
                "height must be non-negative, got {}",
                height
            )));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// x-coordinate of the bottom-left corner
    pub fn x(&self) -> i32 {
        self.x
    }

    /// y-coordinate of the bottom-left corner
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Horizontal size
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Vertical size
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Left edge
    pub fn left(&self) -> i64 {
        self.x as i64
    }

    /// Right edge, `x + width`
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Bottom edge
    pub fn bottom(&self) -> i64 {
        self.y as i64
    }

    /// Top edge, `y + height`
    pub fn top(&self) -> i64 {
        self.y as i64 + self.height as i64
    }
}

/// Immutable snapshot of a widget
///
/// Two snapshots of the same widget taken at different times may differ;
/// compare by [`Widget::id`] to test identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget<Id> {
    id: Id,
    #[serde(flatten)]
    geometry: Geometry,
    z_index: i32,
    updated_at: Timestamp,
}

impl<Id> Widget<Id> {
    /// Build a widget, validating its size
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeometry`] when `width` or `height` is negative.
    pub fn new(
        id: Id,
        x: i32,
        y: i32,
        z_index: i32,
        width: i32,
        height: i32,
        updated_at: Timestamp,
    ) -> Result<Self> {
        let geometry = Geometry::new(x, y, width, height)?;
        Ok(Self::from_parts(id, geometry, z_index, updated_at))
    }

    /// Assemble a widget from an already validated geometry
    pub fn from_parts(id: Id, geometry: Geometry, z_index: i32, updated_at: Timestamp) -> Self {
        Self {
            id,
            geometry,
            z_index,
            updated_at,
        }
    }

    /// Widget identifier
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Consume the snapshot, returning its id
    pub fn into_id(self) -> Id {
        self.id
    }

    /// Rectangle occupied on the plane
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// x-coordinate of the bottom-left corner
    pub fn x(&self) -> i32 {
        self.geometry.x
    }

    /// y-coordinate of the bottom-left corner
    pub fn y(&self) -> i32 {
        self.geometry.y
    }

    /// Horizontal size
    pub fn width(&self) -> i32 {
        self.geometry.width
    }

    /// Vertical size
    pub fn height(&self) -> i32 {
        self.geometry.height
    }

    /// Stacking index, unique across live widgets
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Creation or last modification time
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

/// Request to add a widget; the repository assigns the id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWidget {
    #[serde(flatten)]
    geometry: Geometry,
    z_index: i32,
    updated_at: Timestamp,
}

impl NewWidget {
    /// Validate and build a creation request
    pub fn new(
        x: i32,
        y: i32,
        z_index: i32,
        width: i32,
        height: i32,
        updated_at: Timestamp,
    ) -> Result<Self> {
        Ok(Self::from_parts(
            Geometry::new(x, y, width, height)?,
            z_index,
            updated_at,
        ))
    }

    /// Assemble from an already validated geometry
    pub fn from_parts(geometry: Geometry, z_index: i32, updated_at: Timestamp) -> Self {
        Self {
            geometry,
            z_index,
            updated_at,
        }
    }

    /// Requested rectangle
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Requested stacking index
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Creation time
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Complete the request with a generated id
    pub fn into_widget<Id>(self, id: Id) -> Widget<Id> {
        Widget::from_parts(id, self.geometry, self.z_index, self.updated_at)
    }
}

/// Copy-and-modify builder over an existing widget
///
/// Unset fields keep the original's value. `build` re-validates the size.
///
/// ```
/// use widgetdb_core::{Timestamp, Widget, WidgetBuilder};
///
/// let widget = Widget::new(1, 0, 0, 0, 10, 10, Timestamp::EPOCH).unwrap();
/// let moved = WidgetBuilder::from(&widget).with_x(5).build().unwrap();
/// assert_eq!(moved.x(), 5);
/// assert_eq!(moved.id(), widget.id());
/// ```
#[derive(Debug, Clone)]
pub struct WidgetBuilder<Id> {
    orig: Widget<Id>,
    id: Option<Id>,
    x: Option<i32>,
    y: Option<i32>,
    width: Option<i32>,
    height: Option<i32>,
    z_index: Option<i32>,
    updated_at: Option<Timestamp>,
}

impl<Id: Clone> From<&Widget<Id>> for WidgetBuilder<Id> {
    fn from(orig: &Widget<Id>) -> Self {
        Self {
            orig: orig.clone(),
            id: None,
            x: None,
            y: None,
            width: None,
            height: None,
            z_index: None,
            updated_at: None,
        }
    }
}

impl<Id> WidgetBuilder<Id> {
    /// Replace the id
    pub fn with_id(mut self, id: Id) -> Self {
        self.id = Some(id);
        self
    }

    /// Replace the x-coordinate
    pub fn with_x(mut self, x: i32) -> Self {
        self.x = Some(x);
        self
    }

    /// Replace the y-coordinate
    pub fn with_y(mut self, y: i32) -> Self {
        self.y = Some(y);
        self
    }

    /// Replace the width
    pub fn with_width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }

    /// Replace the height
    pub fn with_height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    /// Replace the stacking index
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Replace the modification time
    pub fn with_updated_at(mut self, updated_at: Timestamp) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Produce the modified widget
    pub fn build(self) -> Result<Widget<Id>> {
        let orig = self.orig;
        Widget::new(
            self.id.unwrap_or(orig.id),
            self.x.unwrap_or(orig.geometry.x),
            self.y.unwrap_or(orig.geometry.y),
            self.z_index.unwrap_or(orig.z_index),
            self.width.unwrap_or(orig.geometry.width),
            self.height.unwrap_or(orig.geometry.height),
            self.updated_at.unwrap_or(orig.updated_at),
        )
    }
}
