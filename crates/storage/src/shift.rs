//! Z-shift: vacate a stacking index
//!
//! Moves the widget at the target zIndex up by one, together with as many
//! widgets above it as needed: exactly the contiguous run of occupied indices
//! starting at the target. Widgets past the first gap are untouched.
//!
//! Only zIndex changes. Geometry is unaffected, so the spatial index is never
//! touched, and `updated_at` is preserved.

use tracing::debug;

use widgetdb_core::{Error, Result, WidgetId};

use crate::order::OrderIndex;
use crate::primary::PrimaryMap;

/// Move the holder of `from` to the free slot `to`
fn relocate<Id: WidgetId>(order: &mut OrderIndex<Id>, records: &mut PrimaryMap<Id>, from: i32, to: i32) {
    if let Some(id) = order.remove(from) {
        if let Some(record) = records.record_mut(&id) {
            record.set_z_index(to);
        }
        let claimed = order.insert_if_absent(to, id);
        debug_assert!(claimed, "shift target {} must be free", to);
    }
}

/// Free `target`, returning how many widgets moved
///
/// A free `target` is a no-op. Fails with [`Error::ArithmeticOverflow`] before
/// moving anything if the run ends at `i32::MAX`.
pub fn shift_upwards<Id: WidgetId>(
    order: &mut OrderIndex<Id>,
    records: &mut PrimaryMap<Id>,
    target: i32,
) -> Result<usize> {
    let Some(run_end) = order.run_end(target) else {
        return Ok(0);
    };
    if run_end == i32::MAX {
        return Err(Error::overflow(run_end));
    }

    if run_end == target {
        // next slot is free: single move
        relocate(order, records, target, target + 1);
        debug!(z_index = target, "Shifted single widget upwards");
        return Ok(1);
    }

    // highest first, so every move lands on a slot already vacated
    for z in (target..=run_end).rev() {
        relocate(order, records, z, z + 1);
    }
    let moved = (run_end as i64 - target as i64 + 1) as usize;
    debug!(z_index = target, run_end, moved, "Shifted widget run upwards");
    Ok(moved)
}
