//! Error types for widgetdb
//!
//! This module defines all error types surfaced by the store and the layers above it.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! "Not found" is never an error: lookups, saves and deletes of an absent id
//! report it through `Option`/`bool` results.

use thiserror::Error;

/// Result type alias for widgetdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for widgetdb
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested zIndex is already held by a different widget
    #[error("zIndex conflict: {z_index} is already occupied")]
    ZIndexConflict {
        /// The offending zIndex
        z_index: i32,
    },

    /// No integer room is left to move widgets upwards
    #[error("Arithmetic overflow: no room above zIndex {z_index}")]
    ArithmeticOverflow {
        /// zIndex at which the overflow was detected
        z_index: i32,
    },

    /// Negative width or height
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Query rectangle with inverted edges
    #[error("Invalid area: {0}")]
    InvalidArea(String),

    /// Id already present in the primary map
    #[error("Duplicate widget id: {0}")]
    DuplicateId(String),

    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for [`Error::ZIndexConflict`]
    pub fn z_conflict(z_index: i32) -> Self {
        Error::ZIndexConflict { z_index }
    }

    /// Shorthand for [`Error::ArithmeticOverflow`]
    pub fn overflow(z_index: i32) -> Self {
        Error::ArithmeticOverflow { z_index }
    }

    /// True for failures the caller may recover from by picking another zIndex
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::ZIndexConflict { .. })
    }
}
