//! Virtual windowing for fixed-height item lists.
//!
//! Maps a scroll offset and viewport size to the range of item indices that
//! must be materialized. This is a pure data component that knows nothing
//! about rendering; see [`crate::render_diff`] for turning ranges into
//! surface requests.

use std::ops::Range;

use crate::{LanesError, LanesResult};

/// Validated row geometry shared by every list on a board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    item_height: f64,
    buffer_count: usize,
}

impl Geometry {
    pub fn new(item_height: f64, buffer_count: usize) -> LanesResult<Self> {
        ensure_positive("item_height", item_height)?;
        Ok(Self {
            item_height,
            buffer_count,
        })
    }

    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    pub fn buffer_count(&self) -> usize {
        self.buffer_count
    }
}

/// Half-open range of item indices `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn iter(&self) -> Range<usize> {
        self.start..self.end
    }
}

fn ensure_positive(name: &str, value: f64) -> LanesResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LanesError::InvalidGeometry(format!(
            "{} must be a positive finite number, got {}",
            name, value
        )))
    }
}

fn ensure_non_negative(name: &str, value: f64) -> LanesResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LanesError::InvalidGeometry(format!(
            "{} must be a non-negative finite number, got {}",
            name, value
        )))
    }
}

/// Compute the index range to materialize for one list.
///
/// The buffer is over-provisioned to at least one viewport's worth of rows,
/// so the first paint already covers the full viewport before any scroll
/// event arrives. The result is clamped to `[0, item_count]`.
///
/// # Errors
/// Returns [`LanesError::InvalidGeometry`] for a negative or non-finite
/// scroll offset, or a non-positive viewport or item height.
pub fn compute_visible_range(
    item_count: usize,
    scroll_offset: f64,
    viewport_height: f64,
    item_height: f64,
    buffer_count: usize,
) -> LanesResult<VisibleRange> {
    ensure_non_negative("scroll_offset", scroll_offset)?;
    ensure_positive("viewport_height", viewport_height)?;
    ensure_positive("item_height", item_height)?;

    Ok(visible_range_unchecked(
        item_count,
        scroll_offset,
        viewport_height,
        item_height,
        buffer_count,
    ))
}

fn visible_range_unchecked(
    item_count: usize,
    scroll_offset: f64,
    viewport_height: f64,
    item_height: f64,
    buffer_count: usize,
) -> VisibleRange {
    if item_count == 0 {
        return VisibleRange::empty();
    }

    // f64 -> usize casts saturate, so huge offsets cannot wrap.
    let raw_start = (scroll_offset / item_height).floor() as usize;
    let raw_visible_count = (viewport_height / item_height).ceil() as usize;
    let effective_buffer = buffer_count.max(raw_visible_count);

    let start = raw_start.saturating_sub(effective_buffer);
    let raw_end = ((scroll_offset + viewport_height) / item_height).ceil() as usize;
    let end = raw_end.saturating_add(effective_buffer).min(item_count);

    VisibleRange::new(start, end)
}

/// Scrollable extent of a list: always exactly `item_count * item_height`.
pub fn total_extent(item_count: usize, item_height: f64) -> f64 {
    item_count as f64 * item_height
}

/// Scroll and size state for one list.
///
/// Every setter validates its input, so [`WindowState::visible_range`] is
/// infallible. The extent is kept in step with the item count.
#[derive(Debug, Clone)]
pub struct WindowState {
    geometry: Geometry,
    scroll_offset: f64,
    viewport_height: f64,
    item_count: usize,
    extent: f64,
}

impl WindowState {
    pub fn new(geometry: Geometry, viewport_height: f64) -> LanesResult<Self> {
        ensure_positive("viewport_height", viewport_height)?;
        Ok(Self {
            geometry,
            scroll_offset: 0.0,
            viewport_height,
            item_count: 0,
            extent: 0.0,
        })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn item_height(&self) -> f64 {
        self.geometry.item_height
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Largest offset that still keeps the viewport inside the extent.
    pub fn max_scroll_offset(&self) -> f64 {
        (self.extent - self.viewport_height).max(0.0)
    }

    /// Returns whether the offset changed.
    pub fn set_scroll_offset(&mut self, offset: f64) -> LanesResult<bool> {
        ensure_non_negative("scroll_offset", offset)?;
        let changed = offset != self.scroll_offset;
        self.scroll_offset = offset;
        Ok(changed)
    }

    /// Returns whether the height changed.
    pub fn set_viewport_height(&mut self, height: f64) -> LanesResult<bool> {
        ensure_positive("viewport_height", height)?;
        let changed = height != self.viewport_height;
        self.viewport_height = height;
        Ok(changed)
    }

    /// Update the item count and the extent together.
    ///
    /// A list that shrank below the current offset has its offset pulled
    /// back to the new maximum. Returns whether the count changed.
    pub fn set_item_count(&mut self, item_count: usize) -> bool {
        let changed = item_count != self.item_count;
        self.item_count = item_count;
        self.extent = total_extent(item_count, self.geometry.item_height);
        if self.scroll_offset > self.max_scroll_offset() {
            self.scroll_offset = self.max_scroll_offset();
        }
        changed
    }

    pub fn set_item_height(&mut self, item_height: f64) -> LanesResult<()> {
        ensure_positive("item_height", item_height)?;
        self.geometry.item_height = item_height;
        self.set_item_count(self.item_count);
        Ok(())
    }

    /// Scroll by `delta`, clamped to `[0, max_scroll_offset]`.
    ///
    /// Returns the distance actually scrolled.
    pub fn scroll_by(&mut self, delta: f64) -> LanesResult<f64> {
        if !delta.is_finite() {
            return Err(LanesError::InvalidGeometry(format!(
                "scroll delta must be finite, got {}",
                delta
            )));
        }
        let before = self.scroll_offset;
        self.scroll_offset = (before + delta).clamp(0.0, self.max_scroll_offset());
        Ok(self.scroll_offset - before)
    }

    /// Position of a row along the scroll axis.
    pub fn row_top(&self, index: usize) -> f64 {
        index as f64 * self.geometry.item_height
    }

    /// Row under a content-space offset, if it holds an item.
    pub fn index_at(&self, content_offset: f64) -> Option<usize> {
        if !content_offset.is_finite() || content_offset < 0.0 {
            return None;
        }
        let index = (content_offset / self.geometry.item_height).floor() as usize;
        (index < self.item_count).then_some(index)
    }

    pub fn visible_range(&self) -> VisibleRange {
        visible_range_unchecked(
            self.item_count,
            self.scroll_offset,
            self.viewport_height,
            self.geometry.item_height,
            self.geometry.buffer_count,
        )
    }

    pub fn is_at_top(&self) -> bool {
        self.scroll_offset <= 0.0
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_offset >= self.max_scroll_offset()
    }
}
