//! Screen placement of lists, as seen by the drag engine.

use crate::list::ListId;

/// Axis-aligned rectangle in host coordinates (pixels, cells, ...).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open on the right and bottom edges.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Split horizontally into `count` equal columns separated by `gap`.
    pub fn split_columns(&self, count: usize, gap: f64) -> Vec<ScreenRect> {
        if count == 0 {
            return Vec::new();
        }
        let gaps = gap * (count - 1) as f64;
        let width = ((self.width - gaps) / count as f64).max(0.0);
        (0..count)
            .map(|i| ScreenRect::new(self.x + i as f64 * (width + gap), self.y, width, self.height))
            .collect()
    }
}

/// Where a list's scrollable viewport sits and how far it is scrolled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListViewport {
    pub list_id: ListId,
    pub bounds: ScreenRect,
    pub scroll_offset: f64,
}

impl ListViewport {
    /// Screen y of row 0, which sits above the viewport once scrolled.
    pub fn content_top(&self) -> f64 {
        self.bounds.y - self.scroll_offset
    }
}

/// Geometry the drag engine needs from the host, answered on demand.
pub trait LayoutProvider {
    /// The droppable list under the pointer, if any.
    fn list_at(&self, x: f64, y: f64) -> Option<ListId>;

    fn list_viewport(&self, list_id: ListId) -> Option<ListViewport>;
}
