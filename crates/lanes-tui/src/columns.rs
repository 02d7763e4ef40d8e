//! Terminal placement of the board's columns.

use lanes_domain::{ListId, ScreenRect};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
};

/// Bordered footer with two text lines.
pub const FOOTER_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub list_id: ListId,
    /// Whole column including its border.
    pub outer: Rect,
    /// Scrollable area inside the border.
    pub viewport: Rect,
}

/// Split the screen into the board area and the footer.
pub fn split_screen(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Equal-width columns, one per list, in board order.
pub fn column_layouts(area: Rect, list_ids: &[ListId]) -> Vec<ColumnLayout> {
    if list_ids.is_empty() {
        return Vec::new();
    }
    let count = list_ids.len() as u32;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(list_ids.iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);

    list_ids
        .iter()
        .zip(chunks.iter())
        .map(|(list_id, outer)| ColumnLayout {
            list_id: *list_id,
            outer: *outer,
            viewport: Block::default().borders(Borders::ALL).inner(*outer),
        })
        .collect()
}

pub fn to_screen_rect(rect: Rect) -> ScreenRect {
    ScreenRect::new(
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_split_screen_reserves_footer() {
        let (board, footer) = split_screen(Rect::new(0, 0, 90, 20));
        assert_eq!(board, Rect::new(0, 0, 90, 16));
        assert_eq!(footer, Rect::new(0, 16, 90, 4));
    }

    #[test]
    fn test_columns_share_width_and_drop_border() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let columns = column_layouts(Rect::new(0, 0, 90, 16), &ids);

        assert_eq!(columns.len(), 3);
        assert_eq!(columns[1].list_id, ids[1]);
        assert_eq!(columns[1].outer, Rect::new(30, 0, 30, 16));
        assert_eq!(columns[1].viewport, Rect::new(31, 1, 28, 14));
        assert!(column_layouts(Rect::new(0, 0, 90, 16), &[]).is_empty());
    }

    #[test]
    fn test_screen_rect_conversion() {
        let rect = to_screen_rect(Rect::new(31, 1, 28, 14));
        assert!(rect.contains(31.5, 1.5));
        assert!(!rect.contains(59.5, 1.5));
    }
}
