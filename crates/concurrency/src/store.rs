//! InMemoryWidgetStore: the lock-guarded widget store
//!
//! One `parking_lot::RwLock` guards the primary map and both secondary indexes
//! together, so readers never observe a half-applied mutation.
//!
//! # Lock semantics
//!
//! - Task-fair: queued writers are not starved by a stream of readers
//! - Not reentrant: an atomic block that calls back into the store deadlocks.
//!   Blocks receive the scope they should use instead.
//! - No poisoning: a panicking atomic block releases the lock on unwind. Its
//!   partial changes stay applied.

use parking_lot::RwLock;
use tracing::debug;

use widgetdb_core::{
    Area, AtomicScope, IdGenerator, NewWidget, Result, Widget, WidgetId, WidgetRepository,
};
use widgetdb_storage::WidgetTable;

/// Thread-safe in-memory widget store
#[derive(Debug)]
pub struct InMemoryWidgetStore<Id: WidgetId> {
    table: RwLock<WidgetTable<Id>>,
}

impl<Id: WidgetId> InMemoryWidgetStore<Id> {
    /// Create an empty store drawing ids from `ids`
    pub fn new(ids: impl IdGenerator<Id> + 'static) -> Self {
        Self::from_table(WidgetTable::new(ids))
    }

    /// Create an empty store with room for `capacity` widgets
    pub fn with_capacity(ids: impl IdGenerator<Id> + 'static, capacity: usize) -> Self {
        Self::from_table(WidgetTable::with_capacity(ids, capacity))
    }

    /// Create a store preloaded with `widgets`
    ///
    /// Fails on a duplicate zIndex or id, see [`WidgetTable::with_widgets`].
    pub fn with_widgets<I>(widgets: I, ids: impl IdGenerator<Id> + 'static) -> Result<Self>
    where
        I: IntoIterator<Item = Widget<Id>>,
    {
        WidgetTable::with_widgets(widgets, ids).map(Self::from_table)
    }

    /// Wrap an existing table
    pub fn from_table(table: WidgetTable<Id>) -> Self {
        debug!(len = table.len(), "Created in-memory widget store");
        Self {
            table: RwLock::new(table),
        }
    }

    /// Check index consistency under the shared lock
    pub fn is_consistent(&self) -> bool {
        self.table.read().is_consistent()
    }
}

impl<Id: WidgetId> WidgetRepository<Id> for InMemoryWidgetStore<Id> {
    type Scope = WidgetTable<Id>;

    fn add(&self, widget: NewWidget) -> Result<Widget<Id>> {
        self.table.write().add(widget)
    }

    fn add_many<I>(&self, widgets: I) -> Result<Vec<Widget<Id>>>
    where
        I: IntoIterator<Item = NewWidget>,
    {
        // Collect before locking so caller iterators never run under the lock.
        let widgets: Vec<NewWidget> = widgets.into_iter().collect();
        self.table.write().add_many(widgets)
    }

    fn save(&self, widget: Widget<Id>) -> Result<Option<Widget<Id>>> {
        self.table.write().save(widget)
    }

    fn save_many<I>(&self, widgets: I) -> Result<Vec<Widget<Id>>>
    where
        I: IntoIterator<Item = Widget<Id>>,
    {
        let widgets: Vec<Widget<Id>> = widgets.into_iter().collect();
        self.table.write().save_many(widgets)
    }

    fn get_by_id(&self, id: &Id) -> Option<Widget<Id>> {
        self.table.read().get_by_id(id)
    }

    fn get_all(&self) -> Vec<Widget<Id>> {
        self.table.read().get_all()
    }

    fn get_in_area(&self, area: &Area) -> Vec<Widget<Id>> {
        self.table.read().get_in_area(area)
    }

    fn delete_by_id(&self, id: &Id) -> bool {
        self.table.write().delete_by_id(id)
    }

    fn delete_and_return_by_id(&self, id: &Id) -> Option<Widget<Id>> {
        self.table.write().delete_and_return_by_id(id)
    }

    fn delete_all(&self) {
        self.table.write().delete_all()
    }

    fn get_max_z_index(&self) -> Option<i32> {
        self.table.read().get_max_z_index()
    }

    fn shift_upwards(&self, z_index: i32) -> Result<()> {
        self.table.write().shift_upwards(z_index)
    }

    fn len(&self) -> usize {
        self.table.read().len()
    }

    fn run_atomically<T, F>(&self, body: F) -> T
    where
        F: FnOnce(&mut Self::Scope) -> T,
    {
        let mut table = self.table.write();
        body(&mut *table)
    }
}
