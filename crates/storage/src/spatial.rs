//! Spatial index over widget edges
//!
//! Four ordered bucket maps, one per edge:
//! - left edge, ascending
//! - right edge, descending
//! - bottom edge, ascending
//! - top edge, descending
//!
//! A containment query needs `left ≥ area.left`, `right ≤ area.right`,
//! `bottom ≥ area.bottom` and `top ≤ area.top`. Storing right and top under
//! `Reverse` keys turns every one of those conditions into the same tail scan
//! (`range(key..)`), so the query is four tail scans intersected one after
//! another.
//!
//! Buckets hold ids, never copies of records. Several widgets may share an edge
//! coordinate; empty buckets are dropped.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use widgetdb_core::{Area, Geometry, WidgetId};

type Buckets<K, Id> = BTreeMap<K, FxHashSet<Id>>;

/// Edge-keyed index answering containment queries
#[derive(Debug)]
pub struct SpatialIndex<Id> {
    left: Buckets<i64, Id>,
    right: Buckets<Reverse<i64>, Id>,
    bottom: Buckets<i64, Id>,
    top: Buckets<Reverse<i64>, Id>,
}

fn insert_into<K: Ord, Id: WidgetId>(buckets: &mut Buckets<K, Id>, key: K, id: &Id) {
    buckets.entry(key).or_default().insert(id.clone());
}

fn remove_from<K: Ord, Id: WidgetId>(buckets: &mut Buckets<K, Id>, key: K, id: &Id) -> bool {
    let Some(ids) = buckets.get_mut(&key) else {
        return false;
    };
    let removed = ids.remove(id);
    if ids.is_empty() {
        buckets.remove(&key);
    }
    removed
}

fn tail<K: Ord, Id>(buckets: &Buckets<K, Id>, from: K) -> impl Iterator<Item = &Id> {
    buckets.range(from..).flat_map(|(_, ids)| ids.iter())
}

/// Keep only the ids of `acc` that also appear in `partial`
fn retain_in<'a, Id: WidgetId + 'a>(acc: &mut FxHashSet<Id>, partial: impl Iterator<Item = &'a Id>) {
    if acc.is_empty() {
        return;
    }
    let partial: FxHashSet<&Id> = partial.collect();
    acc.retain(|id| partial.contains(id));
}

impl<Id: WidgetId> SpatialIndex<Id> {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            left: BTreeMap::new(),
            right: BTreeMap::new(),
            bottom: BTreeMap::new(),
            top: BTreeMap::new(),
        }
    }

    /// Index `id` under the four edges of `geometry`
    pub fn add(&mut self, id: &Id, geometry: &Geometry) {
        insert_into(&mut self.left, geometry.left(), id);
        insert_into(&mut self.right, Reverse(geometry.right()), id);
        insert_into(&mut self.bottom, geometry.bottom(), id);
        insert_into(&mut self.top, Reverse(geometry.top()), id);
    }

    /// Drop `id` from the four buckets for `geometry`
    ///
    /// `geometry` must be the one `id` was indexed with, i.e. the pre-update
    /// coordinates when a widget moves. Returns false if any bucket lacked `id`.
    pub fn remove(&mut self, id: &Id, geometry: &Geometry) -> bool {
        let left = remove_from(&mut self.left, geometry.left(), id);
        let right = remove_from(&mut self.right, Reverse(geometry.right()), id);
        let bottom = remove_from(&mut self.bottom, geometry.bottom(), id);
        let top = remove_from(&mut self.top, Reverse(geometry.top()), id);
        left && right && bottom && top
    }

    /// Ids of widgets lying entirely inside `area`
    ///
    /// Partial lookups are combined sequentially into a single accumulator.
    pub fn query(&self, area: &Area) -> FxHashSet<Id> {
        let mut result: FxHashSet<Id> = tail(&self.left, area.left() as i64).cloned().collect();
        retain_in(&mut result, tail(&self.right, Reverse(area.right() as i64)));
        retain_in(&mut result, tail(&self.bottom, area.bottom() as i64));
        retain_in(&mut result, tail(&self.top, Reverse(area.top() as i64)));
        result
    }

    /// Whether `id` sits in all four buckets for `geometry`
    pub fn contains(&self, id: &Id, geometry: &Geometry) -> bool {
        let has = |ids: Option<&FxHashSet<Id>>| ids.map_or(false, |ids| ids.contains(id));
        has(self.left.get(&geometry.left()))
            && has(self.right.get(&Reverse(geometry.right())))
            && has(self.bottom.get(&geometry.bottom()))
            && has(self.top.get(&Reverse(geometry.top())))
    }

    /// Number of (edge, id) entries per structure: left, right, bottom, top
    pub fn entry_counts(&self) -> [usize; 4] {
        fn count<K, Id>(buckets: &Buckets<K, Id>) -> usize {
            buckets.values().map(|ids| ids.len()).sum()
        }
        [
            count(&self.left),
            count(&self.right),
            count(&self.bottom),
            count(&self.top),
        ]
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
        self.bottom.clear();
        self.top.clear();
    }

    /// True when nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

impl<Id: WidgetId> Default for SpatialIndex<Id> {
    fn default() -> Self {
        Self::new()
    }
}
