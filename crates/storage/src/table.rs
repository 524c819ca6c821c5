//! WidgetTable: the unlocked composite store
//!
//! Ties the primary map, the order index and the spatial index together and
//! keeps them consistent across every mutation:
//! - a record is in the primary map iff its id sits at its zIndex in the order
//!   index and under its four edges in the spatial index
//! - failed mutations leave all three structures untouched (checks run before
//!   the first write)
//!
//! WidgetTable performs no locking. It is the [`AtomicScope`] handed to atomic
//! blocks and the state guarded by the concurrent facade; exclusive access comes
//! from `&mut self`.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use widgetdb_core::{
    Area, AtomicScope, Error, IdGenerator, NewWidget, Result, Widget, WidgetId,
};

use crate::order::OrderIndex;
use crate::primary::PrimaryMap;
use crate::record::WidgetRecord;
use crate::shift;
use crate::spatial::SpatialIndex;

/// Unlocked widget store with primary, order and spatial indexes
pub struct WidgetTable<Id: WidgetId> {
    records: PrimaryMap<Id>,
    order: OrderIndex<Id>,
    spatial: SpatialIndex<Id>,
    ids: Box<dyn IdGenerator<Id>>,
}

impl<Id: WidgetId> fmt::Debug for WidgetTable<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetTable")
            .field("len", &self.records.len())
            .field("max_z_index", &self.order.max_key())
            .finish_non_exhaustive()
    }
}

impl<Id: WidgetId> WidgetTable<Id> {
    /// Create an empty table drawing ids from `ids`
    pub fn new(ids: impl IdGenerator<Id> + 'static) -> Self {
        Self::with_capacity(ids, 0)
    }

    /// Create an empty table with room for `capacity` widgets
    pub fn with_capacity(ids: impl IdGenerator<Id> + 'static, capacity: usize) -> Self {
        Self {
            records: PrimaryMap::with_capacity(capacity),
            order: OrderIndex::new(),
            spatial: SpatialIndex::new(),
            ids: Box::new(ids),
        }
    }

    /// Build a table from existing widgets
    ///
    /// # Errors
    ///
    /// [`Error::ZIndexConflict`] if two widgets share a zIndex,
    /// [`Error::DuplicateId`] if two share an id. No table is returned then.
    pub fn with_widgets<I>(widgets: I, ids: impl IdGenerator<Id> + 'static) -> Result<Self>
    where
        I: IntoIterator<Item = Widget<Id>>,
    {
        let widgets = widgets.into_iter();
        let mut table = Self::with_capacity(ids, widgets.size_hint().0);
        for widget in widgets {
            table.insert(WidgetRecord::from_widget(widget))?;
        }
        debug!(len = table.len(), "Loaded widget table");
        Ok(table)
    }

    /// Index a record in all three structures
    fn insert(&mut self, record: WidgetRecord<Id>) -> Result<()> {
        let z_index = record.z_index();
        if self.order.contains(z_index) {
            return Err(Error::z_conflict(z_index));
        }
        if self.records.contains(record.id()) {
            return Err(Error::DuplicateId(format!("{:?}", record.id())));
        }
        self.order.insert_if_absent(z_index, record.id().clone());
        self.spatial.add(record.id(), &record.geometry());
        self.records.insert(record)
    }

    /// Generate an id that is not live
    ///
    /// Live ids are skipped, so a generator restarting below ids loaded through
    /// [`with_widgets`](Self::with_widgets) still yields fresh ones. Gives up
    /// after `len + 1` draws.
    fn fresh_id(&mut self) -> Result<Id> {
        let mut id = self.ids.generate();
        for _ in 0..self.records.len() {
            if !self.records.contains(&id) {
                return Ok(id);
            }
            id = self.ids.generate();
        }
        if self.records.contains(&id) {
            return Err(Error::DuplicateId(format!("{:?}", id)));
        }
        Ok(id)
    }

    fn remove(&mut self, id: &Id) -> Option<WidgetRecord<Id>> {
        let record = self.records.remove(id)?;
        self.order.remove(record.z_index());
        self.spatial.remove(id, &record.geometry());
        Some(record)
    }

    /// Check that the order and spatial indexes mirror the primary map exactly
    ///
    /// Diagnostic; cost is linear in the number of widgets.
    pub fn is_consistent(&self) -> bool {
        let n = self.records.len();
        if self.order.len() != n || self.spatial.entry_counts() != [n; 4] {
            return false;
        }
        self.records.iter().all(|record| {
            self.order.get(record.z_index()) == Some(record.id())
                && self.spatial.contains(record.id(), &record.geometry())
        })
    }
}

impl<Id: WidgetId> AtomicScope<Id> for WidgetTable<Id> {
    fn add(&mut self, widget: NewWidget) -> Result<Widget<Id>> {
        let z_index = widget.z_index();
        if self.order.contains(z_index) {
            warn!(z_index, "Rejected add: zIndex occupied");
            return Err(Error::z_conflict(z_index));
        }
        let widget = widget.into_widget(self.fresh_id()?);
        self.insert(WidgetRecord::from_widget(widget.clone()))?;
        debug!(id = ?widget.id(), z_index, "Added widget");
        Ok(widget)
    }

    fn add_many<I>(&mut self, widgets: I) -> Result<Vec<Widget<Id>>>
    where
        I: IntoIterator<Item = NewWidget>,
    {
        let requests: Vec<NewWidget> = widgets.into_iter().collect();

        let mut claimed = FxHashSet::default();
        for request in &requests {
            let z_index = request.z_index();
            if self.order.contains(z_index) || !claimed.insert(z_index) {
                warn!(z_index, batch = requests.len(), "Rejected batch add: zIndex occupied");
                return Err(Error::z_conflict(z_index));
            }
        }

        let mut fresh = FxHashSet::default();
        let mut ids = Vec::with_capacity(requests.len());
        for _ in &requests {
            let id = self.fresh_id()?;
            if !fresh.insert(id.clone()) {
                return Err(Error::DuplicateId(format!("{:?}", id)));
            }
            ids.push(id);
        }

        let mut added = Vec::with_capacity(requests.len());
        for (request, id) in requests.into_iter().zip(ids) {
            let widget = request.into_widget(id);
            self.insert(WidgetRecord::from_widget(widget.clone()))?;
            added.push(widget);
        }
        debug!(count = added.len(), "Added widget batch");
        Ok(added)
    }

    fn save(&mut self, widget: Widget<Id>) -> Result<Option<Widget<Id>>> {
        let (old_z, old_geometry) = match self.records.record(widget.id()) {
            Some(record) => (record.z_index(), record.geometry()),
            None => return Ok(None),
        };

        let new_z = widget.z_index();
        if new_z != old_z {
            if let Some(holder) = self.order.get(new_z) {
                if holder != widget.id() {
                    warn!(id = ?widget.id(), z_index = new_z, "Rejected save: zIndex occupied");
                    return Err(Error::z_conflict(new_z));
                }
            }
            self.order.remove(old_z);
            self.order.insert_if_absent(new_z, widget.id().clone());
        }

        let new_geometry = widget.geometry();
        if new_geometry != old_geometry {
            self.spatial.remove(widget.id(), &old_geometry);
            self.spatial.add(widget.id(), &new_geometry);
        }

        if let Some(record) = self.records.record_mut(widget.id()) {
            record.update_from(&widget);
        }
        debug!(id = ?widget.id(), z_index = new_z, "Saved widget");
        Ok(Some(widget))
    }

    fn save_many<I>(&mut self, widgets: I) -> Result<Vec<Widget<Id>>>
    where
        I: IntoIterator<Item = Widget<Id>>,
    {
        let widgets: Vec<Widget<Id>> = widgets.into_iter().collect();

        // Replay the batch against an overlay of zIndex ownership so the first
        // conflict is found before anything is written.
        let mut holders: FxHashMap<i32, Option<Id>> = FxHashMap::default();
        let mut current: FxHashMap<Id, i32> = FxHashMap::default();
        for widget in &widgets {
            let id = widget.id();
            let old_z = match current.get(id) {
                Some(z) => *z,
                None => match self.records.record(id) {
                    Some(record) => record.z_index(),
                    None => continue,
                },
            };
            let new_z = widget.z_index();
            if new_z == old_z {
                continue;
            }
            let holder = match holders.get(&new_z) {
                Some(holder) => holder.as_ref(),
                None => self.order.get(new_z),
            };
            if holder.map_or(false, |holder| holder != id) {
                warn!(id = ?id, z_index = new_z, batch = widgets.len(), "Rejected batch save: zIndex occupied");
                return Err(Error::z_conflict(new_z));
            }
            holders.insert(old_z, None);
            holders.insert(new_z, Some(id.clone()));
            current.insert(id.clone(), new_z);
        }

        let mut saved = Vec::with_capacity(widgets.len());
        for widget in widgets {
            if let Some(widget) = self.save(widget)? {
                saved.push(widget);
            }
        }
        Ok(saved)
    }

    fn get_by_id(&self, id: &Id) -> Option<Widget<Id>> {
        self.records.get(id)
    }

    fn get_all(&self) -> Vec<Widget<Id>> {
        self.order
            .iter_ascending()
            .filter_map(|(_, id)| self.records.get(id))
            .collect()
    }

    fn get_in_area(&self, area: &Area) -> Vec<Widget<Id>> {
        let mut found: Vec<Widget<Id>> = self
            .spatial
            .query(area)
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect();
        found.sort_unstable_by_key(Widget::z_index);
        found
    }

    fn delete_by_id(&mut self, id: &Id) -> bool {
        self.delete_and_return_by_id(id).is_some()
    }

    fn delete_and_return_by_id(&mut self, id: &Id) -> Option<Widget<Id>> {
        let record = self.remove(id)?;
        debug!(id = ?id, z_index = record.z_index(), "Deleted widget");
        Some(record.into_widget())
    }

    fn delete_all(&mut self) {
        self.records.clear();
        self.order.clear();
        self.spatial.clear();
        debug!("Deleted all widgets");
    }

    fn get_max_z_index(&self) -> Option<i32> {
        self.order.max_key()
    }

    fn shift_upwards(&mut self, z_index: i32) -> Result<()> {
        shift::shift_upwards(&mut self.order, &mut self.records, z_index).map(|_| ())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
