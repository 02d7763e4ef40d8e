//! Row bookkeeping for one list drawn in the terminal.
//!
//! The surface only remembers which rows are live and where they sit; the
//! text is pulled from the board at draw time.

use lanes_core::{HandleId, LanesError, LanesResult, RenderSurface};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
struct RowSlot {
    handle: HandleId,
    top: f64,
}

#[derive(Debug, Default)]
pub struct TerminalSurface {
    extent: f64,
    rows: BTreeMap<usize, RowSlot>,
    next_handle: u64,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Live rows as `(index, top_offset)` in index order.
    pub fn rows(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.rows.iter().map(|(index, slot)| (*index, slot.top))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RenderSurface for TerminalSurface {
    fn set_extent(&mut self, extent: f64) {
        self.extent = extent;
    }

    fn acquire(&mut self, index: usize, top_offset: f64) -> LanesResult<HandleId> {
        if self.rows.contains_key(&index) {
            return Err(LanesError::surface(index, "row already live"));
        }
        self.next_handle += 1;
        let handle = HandleId(self.next_handle);
        self.rows.insert(
            index,
            RowSlot {
                handle,
                top: top_offset,
            },
        );
        Ok(handle)
    }

    fn release(&mut self, index: usize, handle: HandleId) {
        match self.rows.get(&index) {
            Some(slot) if slot.handle == handle => {
                self.rows.remove(&index);
            }
            _ => tracing::warn!("release of unknown row {} ({:?})", index, handle),
        }
    }

    fn reposition(&mut self, index: usize, handle: HandleId, top_offset: f64) {
        match self.rows.get_mut(&index) {
            Some(slot) if slot.handle == handle => slot.top = top_offset,
            _ => tracing::warn!("reposition of unknown row {} ({:?})", index, handle),
        }
    }
}
