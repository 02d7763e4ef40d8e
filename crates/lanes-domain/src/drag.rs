//! Drag session state machine.
//!
//! One engine exists per board and holds at most one session. The engine
//! never mutates the board: it reads list lengths to compute insertion
//! indices and hands a [`DropRequest`] to the move coordinator on release.

use lanes_core::{AutoScrollConfig, Geometry};
use serde::Serialize;
use std::fmt;

use crate::board::Board;
use crate::item::ItemId;
use crate::layout::{LayoutProvider, ListViewport};
use crate::list::ListId;
use crate::pointer::PointerSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Active,
    Committing,
    Cancelled,
}

/// Why a session ended without a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    /// Released over no droppable list.
    NoTarget,
    /// Aborted by the host, e.g. Esc.
    Aborted,
    /// The dragged item left its origin list mid-session.
    ItemDetached(ItemId),
    ListMissing(ListId),
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::NoTarget => write!(f, "dropped outside any list"),
            CancelReason::Aborted => write!(f, "drag aborted"),
            CancelReason::ItemDetached(id) => write!(f, "item {} is no longer on its list", id),
            CancelReason::ListMissing(id) => write!(f, "list {} no longer exists", id),
        }
    }
}

/// Drop indicator state. Both fields are `None` when no target is hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub target_list_id: Option<ListId>,
    pub insertion_index: Option<usize>,
}

/// The tuple handed to the move coordinator when a drag commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DropRequest {
    pub item_id: ItemId,
    pub origin_list_id: ListId,
    pub origin_index: usize,
    pub target_list_id: ListId,
    pub insertion_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScrollRequest {
    pub list_id: ListId,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub item_id: ItemId,
    pub origin_list_id: ListId,
    pub origin_index: usize,
    /// Pointer position relative to the grabbed row's top-left corner.
    pub grab_offset: (f64, f64),
    pub pointer: (f64, f64),
    pub target_list_id: Option<ListId>,
    pub insertion_index: Option<usize>,
}

impl DragSession {
    pub fn preview(&self) -> Preview {
        Preview {
            target_list_id: self.target_list_id,
            insertion_index: self.insertion_index,
        }
    }

    /// Where the dragged item's ghost should be drawn.
    pub fn ghost_origin(&self) -> (f64, f64) {
        (
            self.pointer.0 - self.grab_offset.0,
            self.pointer.1 - self.grab_offset.1,
        )
    }

    fn drop_request(&self) -> Option<DropRequest> {
        Some(DropRequest {
            item_id: self.item_id,
            origin_list_id: self.origin_list_id,
            origin_index: self.origin_index,
            target_list_id: self.target_list_id?,
            insertion_index: self.insertion_index?,
        })
    }
}

/// Result of feeding one pointer-move sample to an active session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragUpdate {
    /// Set only when the target list or insertion index changed.
    pub preview: Option<Preview>,
    pub autoscroll: Option<AutoScrollRequest>,
    pub cancelled: Option<CancelReason>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    Commit(DropRequest),
    Cancelled(CancelReason),
}

#[derive(Debug, Clone, PartialEq)]
enum DragState {
    Idle,
    Active(DragSession),
    Committing(DragSession),
    Cancelled(CancelReason),
}

/// Insertion index for a pointer at screen `y` over `viewport`.
///
/// When the dragged item belongs to the target list it is counted out, so
/// hovering the item's own slot yields its own index.
pub fn insertion_index(
    viewport: &ListViewport,
    y: f64,
    item_height: f64,
    target_len: usize,
    excludes_dragged: bool,
) -> usize {
    let len = if excludes_dragged {
        target_len.saturating_sub(1)
    } else {
        target_len
    };
    let row = ((y - viewport.content_top()) / item_height).floor();
    if row.is_nan() || row <= 0.0 {
        0
    } else {
        (row as usize).min(len)
    }
}

#[derive(Debug, Clone)]
pub struct DragEngine {
    state: DragState,
    item_height: f64,
    autoscroll: AutoScrollConfig,
    last_autoscroll_ms: Option<u64>,
}

impl DragEngine {
    pub fn new(geometry: Geometry, autoscroll: AutoScrollConfig) -> Self {
        Self {
            state: DragState::Idle,
            item_height: geometry.item_height(),
            autoscroll,
            last_autoscroll_ms: None,
        }
    }

    pub fn phase(&self) -> DragPhase {
        match self.state {
            DragState::Idle => DragPhase::Idle,
            DragState::Active(_) => DragPhase::Active,
            DragState::Committing(_) => DragPhase::Committing,
            DragState::Cancelled(_) => DragPhase::Cancelled,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Active(_))
    }

    /// The open session, including one that is being committed.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Active(session) | DragState::Committing(session) => Some(session),
            _ => None,
        }
    }

    pub fn cancel_reason(&self) -> Option<&CancelReason> {
        match &self.state {
            DragState::Cancelled(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.item_height = geometry.item_height();
    }

    /// Start a session on the item under the pointer.
    ///
    /// Ignored unless idle; presses outside every list or below the last
    /// row do not start a session.
    pub fn press(
        &mut self,
        board: &Board,
        layout: &dyn LayoutProvider,
        sample: &PointerSample,
    ) -> Option<&DragSession> {
        if !matches!(self.state, DragState::Idle) {
            tracing::debug!("press ignored while drag is {:?}", self.phase());
            return None;
        }
        let list_id = layout.list_at(sample.x, sample.y)?;
        let viewport = layout.list_viewport(list_id)?;
        let list = board.list(list_id)?;

        let row = ((sample.y - viewport.content_top()) / self.item_height).floor();
        if row.is_nan() || row < 0.0 {
            return None;
        }
        let index = row as usize;
        let item = list.get(index)?;
        let row_top = viewport.content_top() + index as f64 * self.item_height;

        tracing::debug!(
            "drag started: item {} at {}[{}]",
            item.id,
            list.name,
            index
        );
        self.last_autoscroll_ms = None;
        self.state = DragState::Active(DragSession {
            item_id: item.id,
            origin_list_id: list_id,
            origin_index: index,
            grab_offset: (sample.x - viewport.bounds.x, sample.y - row_top),
            pointer: (sample.x, sample.y),
            target_list_id: Some(list_id),
            insertion_index: Some(index),
        });
        self.session()
    }

    /// Feed a pointer-move sample to the active session.
    pub fn drag_to(
        &mut self,
        board: &Board,
        layout: &dyn LayoutProvider,
        sample: &PointerSample,
    ) -> DragUpdate {
        let mut update = self.track(board, layout, sample);
        if update.cancelled.is_none() {
            update.autoscroll = self.autoscroll_tick(layout, sample.timestamp_ms);
        }
        update
    }

    /// Auto-scroll request for the current pointer, at most once per interval.
    pub fn autoscroll_tick(
        &mut self,
        layout: &dyn LayoutProvider,
        now_ms: u64,
    ) -> Option<AutoScrollRequest> {
        let DragState::Active(session) = &self.state else {
            return None;
        };
        let list_id = session.target_list_id?;
        let viewport = layout.list_viewport(list_id)?;
        let y = session.pointer.1;

        let delta = if y < viewport.bounds.y + self.autoscroll.margin {
            -self.autoscroll.step
        } else if y >= viewport.bounds.bottom() - self.autoscroll.margin {
            self.autoscroll.step
        } else {
            return None;
        };
        if let Some(last) = self.last_autoscroll_ms {
            if now_ms.saturating_sub(last) < self.autoscroll.interval_ms {
                return None;
            }
        }
        self.last_autoscroll_ms = Some(now_ms);
        Some(AutoScrollRequest { list_id, delta })
    }

    /// Recompute target and index under the unchanged pointer, e.g. after
    /// the hovered list scrolled.
    pub fn reevaluate(&mut self, board: &Board, layout: &dyn LayoutProvider) -> Option<Preview> {
        self.retarget(board, layout)
    }

    /// End the active session. Returns `None` when no session was active.
    pub fn release(
        &mut self,
        board: &Board,
        layout: &dyn LayoutProvider,
        sample: &PointerSample,
    ) -> Option<ReleaseOutcome> {
        if !self.is_active() {
            return None;
        }
        if let Some(reason) = self.track(board, layout, sample).cancelled {
            return Some(ReleaseOutcome::Cancelled(reason));
        }

        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Active(session) => match session.drop_request() {
                Some(request) => {
                    tracing::debug!("drag released over list {}", request.target_list_id);
                    self.state = DragState::Committing(session);
                    Some(ReleaseOutcome::Commit(request))
                }
                None => {
                    tracing::debug!("drag released outside any list");
                    self.state = DragState::Cancelled(CancelReason::NoTarget);
                    Some(ReleaseOutcome::Cancelled(CancelReason::NoTarget))
                }
            },
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Cancel the active session. Returns false when nothing was active.
    pub fn abort(&mut self, reason: CancelReason) -> bool {
        if !self.is_active() {
            return false;
        }
        tracing::debug!("drag cancelled: {}", reason);
        self.state = DragState::Cancelled(reason);
        true
    }

    /// Return a finished session to idle. Returns the phase it left.
    pub fn settle(&mut self) -> DragPhase {
        let phase = self.phase();
        if matches!(phase, DragPhase::Committing | DragPhase::Cancelled) {
            self.state = DragState::Idle;
        }
        phase
    }

    /// Move the pointer and retarget, cancelling if the item vanished.
    fn track(
        &mut self,
        board: &Board,
        layout: &dyn LayoutProvider,
        sample: &PointerSample,
    ) -> DragUpdate {
        let mut update = DragUpdate::default();
        let DragState::Active(session) = &mut self.state else {
            return update;
        };
        session.pointer = (sample.x, sample.y);

        let item_id = session.item_id;
        let attached = board
            .list(session.origin_list_id)
            .is_some_and(|list| list.contains(item_id));
        if !attached {
            self.abort(CancelReason::ItemDetached(item_id));
            update.cancelled = self.cancel_reason().cloned();
            return update;
        }

        update.preview = self.retarget(board, layout);
        update
    }

    fn retarget(&mut self, board: &Board, layout: &dyn LayoutProvider) -> Option<Preview> {
        let item_height = self.item_height;
        let DragState::Active(session) = &mut self.state else {
            return None;
        };
        let (x, y) = session.pointer;
        let origin = session.origin_list_id;

        let resolved = layout.list_at(x, y).and_then(|list_id| {
            let viewport = layout.list_viewport(list_id)?;
            let list = board.list(list_id)?;
            let index = insertion_index(&viewport, y, item_height, list.len(), list_id == origin);
            Some((list_id, index))
        });
        let (target, index) = match resolved {
            Some((list_id, index)) => (Some(list_id), Some(index)),
            None => (None, None),
        };
        if target == session.target_list_id && index == session.insertion_index {
            return None;
        }

        session.target_list_id = target;
        session.insertion_index = index;
        tracing::debug!("drag preview: {:?} at {:?}", target, index);
        Some(session.preview())
    }
}
