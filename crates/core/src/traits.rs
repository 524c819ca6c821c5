//! Store contracts
//!
//! Two traits split the widget store API along its locking boundary:
//!
//! - [`WidgetRepository`]: the thread-safe facade. Every call is atomic on its
//!   own. Multi-step work goes through [`WidgetRepository::run_atomically`].
//! - [`AtomicScope`]: the lock-free interface handed to an atomic block. It takes
//!   `&mut self` for mutations, so it can only be reached through the exclusive
//!   borrow the facade lends for the block's duration.
//!
//! Upper layers (the service) are written against these traits so an in-memory
//! store and any other backend honoring the same contract are interchangeable.

use crate::area::Area;
use crate::error::Result;
use crate::id::WidgetId;
use crate::widget::{NewWidget, Widget};

/// Operations available inside an atomic block
///
/// Implementations perform no locking. The caller guarantees exclusive access.
pub trait AtomicScope<Id: WidgetId> {
    /// Add a widget under a freshly generated id
    ///
    /// # Errors
    ///
    /// [`Error::ZIndexConflict`](crate::Error::ZIndexConflict) if the zIndex is taken.
    /// Nothing is stored in that case.
    fn add(&mut self, widget: NewWidget) -> Result<Widget<Id>>;

    /// Add several widgets
    ///
    /// The whole batch is checked before anything is stored: a conflict with
    /// the store or within the batch leaves the store untouched.
    fn add_many<I>(&mut self, widgets: I) -> Result<Vec<Widget<Id>>>
    where
        I: IntoIterator<Item = NewWidget>;

    /// Replace the stored fields of an existing widget
    ///
    /// Returns `Ok(None)` if the id is absent.
    ///
    /// # Errors
    ///
    /// [`Error::ZIndexConflict`](crate::Error::ZIndexConflict) if the new zIndex
    /// belongs to a different widget. The store is left unchanged.
    fn save(&mut self, widget: Widget<Id>) -> Result<Option<Widget<Id>>>;

    /// Save several widgets in order, all or nothing
    ///
    /// Absent ids are skipped. Returns the widgets actually saved.
    fn save_many<I>(&mut self, widgets: I) -> Result<Vec<Widget<Id>>>
    where
        I: IntoIterator<Item = Widget<Id>>;

    /// Snapshot of one widget
    fn get_by_id(&self, id: &Id) -> Option<Widget<Id>>;

    /// All widgets, ascending by zIndex
    fn get_all(&self) -> Vec<Widget<Id>>;

    /// Widgets fully contained in `area`, ascending by zIndex
    fn get_in_area(&self, area: &Area) -> Vec<Widget<Id>>;

    /// Delete a widget, reporting whether it existed
    fn delete_by_id(&mut self, id: &Id) -> bool;

    /// Delete a widget, returning its last snapshot
    fn delete_and_return_by_id(&mut self, id: &Id) -> Option<Widget<Id>>;

    /// Delete every widget
    fn delete_all(&mut self);

    /// Highest zIndex in use
    fn get_max_z_index(&self) -> Option<i32>;

    /// Free `z_index` by moving the contiguous run of occupied indices starting
    /// there up by one
    ///
    /// # Errors
    ///
    /// [`Error::ArithmeticOverflow`](crate::Error::ArithmeticOverflow) if the run
    /// already ends at `i32::MAX`. The store is left unchanged.
    fn shift_upwards(&mut self, z_index: i32) -> Result<()>;

    /// Number of live widgets
    fn len(&self) -> usize;

    /// True when no widget is stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Thread-safe widget store
///
/// Same operations as [`AtomicScope`], each executed atomically, plus
/// [`run_atomically`](WidgetRepository::run_atomically) for multi-step work
/// with serializable isolation.
pub trait WidgetRepository<Id: WidgetId>: Send + Sync {
    /// Interface lent to atomic blocks
    type Scope: AtomicScope<Id>;

    /// See [`AtomicScope::add`]
    fn add(&self, widget: NewWidget) -> Result<Widget<Id>>;

    /// See [`AtomicScope::add_many`]
    fn add_many<I>(&self, widgets: I) -> Result<Vec<Widget<Id>>>
    where
        I: IntoIterator<Item = NewWidget>;

    /// See [`AtomicScope::save`]
    fn save(&self, widget: Widget<Id>) -> Result<Option<Widget<Id>>>;

    /// See [`AtomicScope::save_many`]
    fn save_many<I>(&self, widgets: I) -> Result<Vec<Widget<Id>>>
    where
        I: IntoIterator<Item = Widget<Id>>;

    /// See [`AtomicScope::get_by_id`]
    fn get_by_id(&self, id: &Id) -> Option<Widget<Id>>;

    /// See [`AtomicScope::get_all`]
    fn get_all(&self) -> Vec<Widget<Id>>;

    /// See [`AtomicScope::get_in_area`]
    fn get_in_area(&self, area: &Area) -> Vec<Widget<Id>>;

    /// See [`AtomicScope::delete_by_id`]
    fn delete_by_id(&self, id: &Id) -> bool;

    /// See [`AtomicScope::delete_and_return_by_id`]
    fn delete_and_return_by_id(&self, id: &Id) -> Option<Widget<Id>>;

    /// See [`AtomicScope::delete_all`]
    fn delete_all(&self);

    /// See [`AtomicScope::get_max_z_index`]
    fn get_max_z_index(&self) -> Option<i32>;

    /// See [`AtomicScope::shift_upwards`]
    fn shift_upwards(&self, z_index: i32) -> Result<()>;

    /// See [`AtomicScope::len`]
    fn len(&self) -> usize;

    /// True when no widget is stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `body` with exclusive access to the store
    ///
    /// No other caller, reader or writer, makes progress until `body` returns
    /// (or unwinds). The set of widgets `body` observes at its start is the set
    /// it observes at its end, save for its own changes.
    ///
    /// `body` must use the scope it is given. Calling back into `self` from
    /// inside the block is not supported and may deadlock.
    fn run_atomically<T, F>(&self, body: F) -> T
    where
        F: FnOnce(&mut Self::Scope) -> T;
}
