//! Query rectangle for containment lookups

use serde::Serialize;

use crate::error::{Error, Result};
use crate::widget::Geometry;

/// Axis-aligned query rectangle given by its four edges
///
/// A widget matches when it lies entirely inside the area, edges included.
/// Partial overlap does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Area {
    left: i32,
    right: i32,
    bottom: i32,
    top: i32,
}

impl Area {
    /// Build an area, rejecting inverted edges
    pub fn new(left: i32, right: i32, bottom: i32, top: i32) -> Result<Self> {
        if left > right {
            return Err(Error::InvalidArea(format!(
                "left ({}) must not exceed right ({})",
                left, right
            )));
        }
        if bottom > top {
            return Err(Error::InvalidArea(format!(
                "bottom ({}) must not exceed top ({})",
                bottom, top
            )));
        }
        Ok(Self {
            left,
            right,
            bottom,
            top,
        })
    }

    /// Area covering exactly the given rectangle
    pub fn covering(geometry: &Geometry) -> Option<Self> {
        Some(Self {
            left: geometry.x(),
            right: i32::try_from(geometry.right()).ok()?,
            bottom: geometry.y(),
            top: i32::try_from(geometry.top()).ok()?,
        })
    }

    /// x-coordinate of the left edge
    pub fn left(&self) -> i32 {
        self.left
    }

    /// x-coordinate of the right edge
    pub fn right(&self) -> i32 {
        self.right
    }

    /// y-coordinate of the bottom edge
    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    /// y-coordinate of the top edge
    pub fn top(&self) -> i32 {
        self.top
    }

    /// Full containment test
    pub fn contains(&self, geometry: &Geometry) -> bool {
        geometry.left() >= self.left as i64
            && geometry.right() <= self.right as i64
            && geometry.bottom() >= self.bottom as i64
            && geometry.top() <= self.top as i64
    }
}
