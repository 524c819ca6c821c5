//! Primary map: id → record
//!
//! Owning store of truth for every live widget. Holds no geometry or ordering
//! logic; the order and spatial indexes keep ids pointing back here.

use rustc_hash::FxHashMap;

use widgetdb_core::{Error, Result, Widget, WidgetId};

use crate::record::WidgetRecord;

/// Authoritative id → record storage
#[derive(Debug)]
pub struct PrimaryMap<Id> {
    records: FxHashMap<Id, WidgetRecord<Id>>,
}

impl<Id: WidgetId> PrimaryMap<Id> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty map sized for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert a record under its own id
    ///
    /// Fails without modifying the map if the id is already present.
    pub fn insert(&mut self, record: WidgetRecord<Id>) -> Result<()> {
        if self.records.contains_key(record.id()) {
            return Err(Error::DuplicateId(format!("{:?}", record.id())));
        }
        self.records.insert(record.id().clone(), record);
        Ok(())
    }

    /// Snapshot of the record for `id`
    pub fn get(&self, id: &Id) -> Option<Widget<Id>> {
        self.records.get(id).map(WidgetRecord::to_widget)
    }

    /// Borrow the record for `id`
    pub fn record(&self, id: &Id) -> Option<&WidgetRecord<Id>> {
        self.records.get(id)
    }

    /// Mutably borrow the record for `id`
    pub fn record_mut(&mut self, id: &Id) -> Option<&mut WidgetRecord<Id>> {
        self.records.get_mut(id)
    }

    /// Whether `id` is live
    pub fn contains(&self, id: &Id) -> bool {
        self.records.contains_key(id)
    }

    /// Remove and return the record so callers can clean up the indexes
    pub fn remove(&mut self, id: &Id) -> Option<WidgetRecord<Id>> {
        self.records.remove(id)
    }

    /// Iterate over all records in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &WidgetRecord<Id>> {
        self.records.values()
    }

    /// Empty the map
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no record is stored
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<Id: WidgetId> Default for PrimaryMap<Id> {
    fn default() -> Self {
        Self::new()
    }
}
