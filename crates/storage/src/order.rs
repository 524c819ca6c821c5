//! Order index: zIndex → id
//!
//! Keeps widgets sorted by stacking order and enforces zIndex uniqueness.
//! Uses BTreeMap so ascending iteration, `max_key` and `ceiling` lookups come
//! straight from the tree.

use std::collections::BTreeMap;

use widgetdb_core::WidgetId;

/// zIndex → id, one id per key
#[derive(Debug)]
pub struct OrderIndex<Id> {
    by_z: BTreeMap<i32, Id>,
}

impl<Id: WidgetId> OrderIndex<Id> {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            by_z: BTreeMap::new(),
        }
    }

    /// Claim `z_index` for `id`
    ///
    /// Returns false, leaving the current holder in place, if the key is taken.
    pub fn insert_if_absent(&mut self, z_index: i32, id: Id) -> bool {
        match self.by_z.entry(z_index) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(id);
                true
            }
        }
    }

    /// Release `z_index`, returning its former holder
    pub fn remove(&mut self, z_index: i32) -> Option<Id> {
        self.by_z.remove(&z_index)
    }

    /// Holder of `z_index`
    pub fn get(&self, z_index: i32) -> Option<&Id> {
        self.by_z.get(&z_index)
    }

    /// Whether `z_index` is taken
    pub fn contains(&self, z_index: i32) -> bool {
        self.by_z.contains_key(&z_index)
    }

    /// Highest key in use
    pub fn max_key(&self) -> Option<i32> {
        self.by_z.last_key_value().map(|(z, _)| *z)
    }

    /// Smallest key ≥ `z_index`
    pub fn ceiling(&self, z_index: i32) -> Option<(i32, &Id)> {
        self.by_z.range(z_index..).next().map(|(z, id)| (*z, id))
    }

    /// Last key of the run of consecutive occupied keys starting at `start`
    ///
    /// Returns `None` if `start` itself is free.
    pub fn run_end(&self, start: i32) -> Option<i32> {
        let mut keys = self.by_z.range(start..).map(|(z, _)| *z);
        if keys.next() != Some(start) {
            return None;
        }
        let mut end = start;
        for z in keys {
            // keys are strictly increasing, so z > end; a gap ends the run
            if z as i64 - end as i64 > 1 {
                break;
            }
            end = z;
        }
        Some(end)
    }

    /// Ids in ascending zIndex order
    ///
    /// The iterator borrows the index, so the sequence is fixed for its lifetime.
    pub fn iter_ascending(&self) -> impl Iterator<Item = (i32, &Id)> {
        self.by_z.iter().map(|(z, id)| (*z, id))
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.by_z.clear();
    }

    /// Number of occupied keys
    pub fn len(&self) -> usize {
        self.by_z.len()
    }

    /// True when no key is occupied
    pub fn is_empty(&self) -> bool {
        self.by_z.is_empty()
    }
}

impl<Id: WidgetId> Default for OrderIndex<Id> {
    fn default() -> Self {
        Self::new()
    }
}
