//! A board plus the windowing state of each of its lists.

use lanes_core::{
    FrameCoalescer, Geometry, LanesError, LanesResult, MaterializedSet, RenderSurface, SyncReport,
    WindowState,
};
use std::collections::HashMap;

use crate::board::Board;
use crate::item::Item;
use crate::layout::{LayoutProvider, ListViewport, ScreenRect};
use crate::list::ListId;

/// Looks up the rendering surface that draws a given list.
pub trait SurfaceRegistry {
    fn surface(&mut self, list_id: ListId) -> Option<&mut dyn RenderSurface>;
}

impl<S: RenderSurface> SurfaceRegistry for HashMap<ListId, S> {
    fn surface(&mut self, list_id: ListId) -> Option<&mut dyn RenderSurface> {
        self.get_mut(&list_id).map(|s| s as &mut dyn RenderSurface)
    }
}

/// Windowing state for one list.
#[derive(Debug, Clone)]
pub struct ListWindow {
    state: WindowState,
    rows: MaterializedSet,
    bounds: Option<ScreenRect>,
    reported_extent: Option<f64>,
}

impl ListWindow {
    fn new(geometry: Geometry, item_count: usize) -> LanesResult<Self> {
        // Placeholder viewport of one row until the host places the list.
        let mut state = WindowState::new(geometry, geometry.item_height())?;
        state.set_item_count(item_count);
        Ok(Self {
            state,
            rows: MaterializedSet::new(),
            bounds: None,
            reported_extent: None,
        })
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    pub fn rows(&self) -> &MaterializedSet {
        &self.rows
    }

    pub fn bounds(&self) -> Option<ScreenRect> {
        self.bounds
    }
}

/// Owns the board and keeps every list's materialized rows in step with it.
///
/// Scroll and resize changes are queued and applied once per frame by
/// [`BoardView::flush_frame`]. Length changes (append, commit) refresh the
/// affected list immediately so no other event can observe a stale extent.
#[derive(Debug)]
pub struct BoardView {
    board: Board,
    geometry: Geometry,
    windows: HashMap<ListId, ListWindow>,
    frames: FrameCoalescer<ListId>,
}

impl BoardView {
    pub fn new(board: Board, geometry: Geometry) -> LanesResult<Self> {
        let mut windows = HashMap::new();
        let mut frames = FrameCoalescer::new();
        for list in board.lists() {
            windows.insert(list.id, ListWindow::new(geometry, list.len())?);
            frames.request(list.id);
        }
        Ok(Self {
            board,
            geometry,
            windows,
            frames,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn window(&self, list_id: ListId) -> Option<&ListWindow> {
        self.windows.get(&list_id)
    }

    fn window_mut(&mut self, list_id: ListId) -> LanesResult<&mut ListWindow> {
        self.windows
            .get_mut(&list_id)
            .ok_or_else(|| LanesError::NotFound(format!("list {}", list_id)))
    }

    /// Record where a list's viewport sits on screen.
    pub fn place_list(&mut self, list_id: ListId, bounds: ScreenRect) -> LanesResult<()> {
        let window = self.window_mut(list_id)?;
        let resized = window.state.set_viewport_height(bounds.height)?;
        window.bounds = Some(bounds);
        if resized {
            self.frames.request(list_id);
        }
        Ok(())
    }

    pub fn set_scroll_offset(&mut self, list_id: ListId, offset: f64) -> LanesResult<()> {
        if self.window_mut(list_id)?.state.set_scroll_offset(offset)? {
            self.frames.request(list_id);
        }
        Ok(())
    }

    /// Scroll within bounds and return the distance actually moved.
    pub fn scroll_by(&mut self, list_id: ListId, delta: f64) -> LanesResult<f64> {
        let applied = self.window_mut(list_id)?.state.scroll_by(delta)?;
        if applied != 0.0 {
            self.frames.request(list_id);
        }
        Ok(applied)
    }

    /// Change the row height for every list and move live handles to match.
    pub fn set_item_height(
        &mut self,
        item_height: f64,
        surfaces: &mut dyn SurfaceRegistry,
    ) -> LanesResult<()> {
        self.geometry = Geometry::new(item_height, self.geometry.buffer_count())?;
        let ids = self.board.list_ids();
        for id in &ids {
            let window = self.window_mut(*id)?;
            window.state.set_item_height(item_height)?;
            if let Some(surface) = surfaces.surface(*id) {
                window.rows.reposition_all(surface, item_height);
            }
        }
        for id in ids {
            self.refresh(id, surfaces)?;
        }
        Ok(())
    }

    /// Create an item at the end of a list and bring its window up to date.
    pub fn append(
        &mut self,
        list_id: ListId,
        title: String,
        surfaces: &mut dyn SurfaceRegistry,
    ) -> LanesResult<Item> {
        let item = self.board.append(list_id, title)?;
        self.refresh(list_id, surfaces)?;
        Ok(item)
    }

    /// Bring one list's extent and materialized rows up to date now.
    pub fn refresh(
        &mut self,
        list_id: ListId,
        surfaces: &mut dyn SurfaceRegistry,
    ) -> LanesResult<SyncReport> {
        let count = self
            .board
            .list(list_id)
            .map(|list| list.len())
            .ok_or_else(|| LanesError::NotFound(format!("list {}", list_id)))?;
        self.frames.cancel(&list_id);

        let window = self.window_mut(list_id)?;
        window.state.set_item_count(count);
        let Some(surface) = surfaces.surface(list_id) else {
            tracing::debug!("no surface mounted for list {}, skipping refresh", list_id);
            return Ok(SyncReport::default());
        };

        let extent = window.state.extent();
        if window.reported_extent != Some(extent) {
            surface.set_extent(extent);
            window.reported_extent = Some(extent);
        }
        let range = window.state.visible_range();
        Ok(window.rows.sync(range, surface, window.state.item_height()))
    }

    pub fn has_pending_frame(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Refresh every list that went dirty since the last frame.
    pub fn flush_frame(&mut self, surfaces: &mut dyn SurfaceRegistry) -> Vec<(ListId, SyncReport)> {
        let mut reports = Vec::new();
        for list_id in self.frames.drain() {
            match self.refresh(list_id, surfaces) {
                Ok(report) => reports.push((list_id, report)),
                Err(e) => tracing::warn!("frame refresh skipped for list {}: {}", list_id, e),
            }
        }
        reports
    }

    /// Release every handle of one list, e.g. before its surface goes away.
    pub fn unmount(&mut self, list_id: ListId, surfaces: &mut dyn SurfaceRegistry) -> usize {
        let Some(window) = self.windows.get_mut(&list_id) else {
            return 0;
        };
        window.reported_extent = None;
        match surfaces.surface(list_id) {
            Some(surface) => window.rows.clear(surface),
            None => 0,
        }
    }
}

impl LayoutProvider for BoardView {
    fn list_at(&self, x: f64, y: f64) -> Option<ListId> {
        self.board.lists().iter().map(|list| list.id).find(|id| {
            self.windows
                .get(id)
                .and_then(|window| window.bounds)
                .is_some_and(|bounds| bounds.contains(x, y))
        })
    }

    fn list_viewport(&self, list_id: ListId) -> Option<ListViewport> {
        let window = self.windows.get(&list_id)?;
        Some(ListViewport {
            list_id,
            bounds: window.bounds?,
            scroll_offset: window.state.scroll_offset(),
        })
    }
}
