//! Minimal add/remove bookkeeping between consecutive visible ranges.
//!
//! [`MaterializedSet`] owns the per-index status of every row a list has
//! asked its [`RenderSurface`] for. A row that stays inside the visible range
//! is never released and re-acquired just because its neighbours changed.

use std::collections::{BTreeMap, BTreeSet};

use crate::surface::{HandleId, RenderSurface};
use crate::window::VisibleRange;

/// Indices to tear down and to create when moving to a new range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderDiff {
    pub to_remove: BTreeSet<usize>,
    pub to_add: BTreeSet<usize>,
}

impl RenderDiff {
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// `previous \ range` to remove, `range \ previous` to add.
pub fn diff(previous: &BTreeSet<usize>, range: VisibleRange) -> RenderDiff {
    RenderDiff {
        to_remove: previous
            .iter()
            .copied()
            .filter(|index| !range.contains(*index))
            .collect(),
        to_add: range.iter().filter(|index| !previous.contains(index)).collect(),
    }
}

/// Lifecycle of one row between a staged diff and its flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleStatus {
    /// Inside the new range, not yet acquired.
    PendingAdd,
    /// Live handle on the surface.
    Materialized,
    /// Outside the new range, handle not yet released.
    PendingRemove,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    status: HandleStatus,
    handle: Option<HandleId>,
}

/// What a flush actually did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: Vec<usize>,
    pub removed: Vec<usize>,
    /// Rows whose `acquire` failed; retried on the next pass.
    pub failed: Vec<usize>,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MaterializedSet {
    slots: BTreeMap<usize, Slot>,
}

impl MaterializedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices holding a live handle.
    pub fn materialized(&self) -> BTreeSet<usize> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.status == HandleStatus::Materialized)
            .map(|(index, _)| *index)
            .collect()
    }

    pub fn status(&self, index: usize) -> Option<HandleStatus> {
        self.slots.get(&index).map(|slot| slot.status)
    }

    pub fn handle(&self, index: usize) -> Option<HandleId> {
        self.slots.get(&index).and_then(|slot| slot.handle)
    }

    /// Live handles in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, HandleId)> + '_ {
        self.slots.iter().filter_map(|(index, slot)| {
            (slot.status == HandleStatus::Materialized)
                .then_some(slot.handle)
                .flatten()
                .map(|handle| (*index, handle))
        })
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_pending(&self) -> bool {
        self.slots
            .values()
            .any(|slot| slot.status != HandleStatus::Materialized)
    }

    /// Mark the rows that must change to reach `range`.
    ///
    /// Any diff staged earlier and never flushed is discarded first, so
    /// staging is always relative to what the surface really holds.
    pub fn stage(&mut self, range: VisibleRange) -> RenderDiff {
        self.slots.retain(|_, slot| slot.handle.is_some());
        for slot in self.slots.values_mut() {
            slot.status = HandleStatus::Materialized;
        }

        let diff = diff(&self.materialized(), range);
        for index in &diff.to_remove {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.status = HandleStatus::PendingRemove;
            }
        }
        for index in &diff.to_add {
            self.slots.insert(
                *index,
                Slot {
                    status: HandleStatus::PendingAdd,
                    handle: None,
                },
            );
        }
        diff
    }

    /// Apply the staged diff to `surface`.
    ///
    /// Releases run before acquires. A failed `acquire` leaves that index
    /// out of the set without touching any other row.
    pub fn flush(&mut self, surface: &mut dyn RenderSurface, item_height: f64) -> SyncReport {
        let mut report = SyncReport::default();

        let removing: Vec<usize> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.status == HandleStatus::PendingRemove)
            .map(|(index, _)| *index)
            .collect();
        for index in removing {
            if let Some(Slot {
                handle: Some(handle),
                ..
            }) = self.slots.remove(&index)
            {
                surface.release(index, handle);
                report.removed.push(index);
            }
        }

        let adding: Vec<usize> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.status == HandleStatus::PendingAdd)
            .map(|(index, _)| *index)
            .collect();
        for index in adding {
            match surface.acquire(index, index as f64 * item_height) {
                Ok(handle) => {
                    self.slots.insert(
                        index,
                        Slot {
                            status: HandleStatus::Materialized,
                            handle: Some(handle),
                        },
                    );
                    report.added.push(index);
                }
                Err(e) => {
                    tracing::warn!("acquire failed for row {}, will retry: {}", index, e);
                    self.slots.remove(&index);
                    report.failed.push(index);
                }
            }
        }

        report
    }

    /// Stage and flush in one step.
    pub fn sync(
        &mut self,
        range: VisibleRange,
        surface: &mut dyn RenderSurface,
        item_height: f64,
    ) -> SyncReport {
        self.stage(range);
        self.flush(surface, item_height)
    }

    /// Move every live handle to `index * item_height`.
    pub fn reposition_all(&self, surface: &mut dyn RenderSurface, item_height: f64) {
        for (index, handle) in self.iter() {
            surface.reposition(index, handle, index as f64 * item_height);
        }
    }

    /// Release everything, e.g. when a list is unmounted.
    pub fn clear(&mut self, surface: &mut dyn RenderSurface) -> usize {
        let mut released = 0;
        for (index, slot) in std::mem::take(&mut self.slots) {
            if let Some(handle) = slot.handle {
                surface.release(index, handle);
                released += 1;
            }
        }
        released
    }
}
