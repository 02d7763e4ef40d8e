use crate::app::{App, AppMode};
use crate::columns::{split_screen, ColumnLayout};
use crate::popup::render_input_popup;
use crate::theme::*;
use lanes_core::Loggable;
use lanes_domain::{ListId, OrderedList};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    app.on_frame(area);
    let (_, footer) = split_screen(area);

    for column in app.columns().to_vec() {
        render_column(app, frame, &column);
    }
    render_ghost(app, frame);
    render_footer(app, frame, footer);

    if let AppMode::CreateItem(list_id) = app.mode {
        let name = app
            .board()
            .list(list_id)
            .map(|list| list.name.clone())
            .unwrap_or_default();
        render_input_popup(
            frame,
            " New Task ",
            &format!("Title for {}:", name),
            app.input.as_str(),
            app.input.cursor_column(),
        );
    }
}

fn render_column(app: &App, frame: &mut Frame, column: &ColumnLayout) {
    let Some(list) = app.board().list(column.list_id) else {
        return;
    };
    let drop_target = app
        .preview()
        .and_then(|preview| preview.target_list_id)
        == Some(column.list_id);
    let border_style = if drop_target {
        drop_target_border()
    } else if app.hovered() == Some(column.list_id) {
        focused_border()
    } else {
        unfocused_border()
    };

    let block = Block::default()
        .title(format!(" {} ({}) ", list.name, list.len()))
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(block, column.outer);

    render_rows(app, frame, column, list);

    if drop_target {
        if let Some(index) = app.preview().and_then(|preview| preview.insertion_index) {
            render_indicator(app, frame, column, index);
        }
    }
}

fn render_rows(app: &App, frame: &mut Frame, column: &ColumnLayout, list: &OrderedList) {
    let Some(surface) = app.surface(column.list_id) else {
        return;
    };
    let viewport = column.viewport;
    let scroll = scroll_offset(app, column.list_id);
    let item_height = app.controller().view().geometry().item_height();
    let dragged = app.controller().drag().session().map(|s| s.item_id);

    for (index, top) in surface.rows() {
        let Some(item) = list.get(index) else {
            continue;
        };
        let Some(rect) = row_rect(viewport, top - scroll, item_height) else {
            continue;
        };
        let style = if Some(item.id) == dragged {
            dragged_text()
        } else {
            normal_text()
        };
        frame.render_widget(Paragraph::new(item.title.as_str()).style(style), rect);
    }
}

/// Marks the boundary the item would be inserted at with arrows on both
/// borders of the column.
fn render_indicator(app: &App, frame: &mut Frame, column: &ColumnLayout, index: usize) {
    let viewport = column.viewport;
    if viewport.height == 0 || column.outer.width < 2 {
        return;
    }
    let item_height = app.controller().view().geometry().item_height();
    let offset = index as f64 * item_height - scroll_offset(app, column.list_id);
    let max_row = (viewport.height - 1) as f64;
    let row = viewport.y + offset.clamp(0.0, max_row).floor() as u16;

    let left = Rect::new(column.outer.x, row, 1, 1);
    let right = Rect::new(column.outer.right() - 1, row, 1, 1);
    frame.render_widget(Paragraph::new("\u{25b6}").style(drop_indicator()), left);
    frame.render_widget(Paragraph::new("\u{25c0}").style(drop_indicator()), right);
}

fn render_ghost(app: &App, frame: &mut Frame) {
    let Some(session) = app.controller().drag().session() else {
        return;
    };
    let Some(item) = app
        .board()
        .list(session.origin_list_id)
        .and_then(|list| list.get(session.origin_index))
    else {
        return;
    };
    let width = app
        .columns()
        .iter()
        .find(|column| column.list_id == session.origin_list_id)
        .map(|column| column.viewport.width)
        .unwrap_or(0);

    let (x, y) = session.ghost_origin();
    let area = frame.area();
    if width == 0 || x < 0.0 || y < 0.0 || y >= area.bottom() as f64 {
        return;
    }
    let x = x.floor() as u16;
    if x >= area.right() {
        return;
    }
    let rect = Rect::new(x, y.floor() as u16, width.min(area.right() - x), 1);
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(item.title.as_str()).style(ghost()), rect);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let latest = app
        .journal()
        .get_logs()
        .last()
        .map(|entry| {
            format!(
                "{} {}",
                entry.timestamp.format("%H:%M:%S"),
                entry.message
            )
        })
        .unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(app.status_line(), label_text())),
        Line::from(Span::styled(latest, normal_text())),
    ];
    let footer = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn scroll_offset(app: &App, list_id: ListId) -> f64 {
    app.controller()
        .view()
        .window(list_id)
        .map(|window| window.state().scroll_offset())
        .unwrap_or(0.0)
}

/// Screen cells for a row whose top sits `top` below the viewport top,
/// clipped to the viewport. `None` when nothing of it is visible.
fn row_rect(viewport: Rect, top: f64, item_height: f64) -> Option<Rect> {
    let bottom = top + item_height;
    let visible_top = top.max(0.0).ceil();
    let visible_bottom = bottom.min(viewport.height as f64).ceil();
    if visible_bottom <= visible_top {
        return None;
    }
    Some(Rect::new(
        viewport.x,
        viewport.y + visible_top as u16,
        viewport.width,
        (visible_bottom - visible_top) as u16,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use lanes_core::AppConfig;
    use lanes_domain::{Board, Item};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let mut board = Board::new("Test".to_string(), None);
        for (name, count) in [("Todo", 40), ("Done", 1)] {
            let items = (0..count)
                .map(|i| Item::new(format!("{} task {}", name, i)))
                .collect();
            board
                .insert_list(OrderedList::with_items(name.to_string(), items).unwrap())
                .unwrap();
        }
        App::new(board, &AppConfig::default()).unwrap()
    }

    fn draw(app: &mut App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_render_columns_and_footer() {
        let mut app = app();
        let lines = draw(&mut app);

        assert!(lines[0].contains(" Todo (40) "));
        assert!(lines[0].contains(" Done (1) "));
        assert!(lines[1].contains("Todo task 0"));
        assert!(lines[1].contains("Done task 0"));
        assert!(lines[14].contains("Todo task 13"));
        assert!(!lines.iter().any(|line| line.contains("Todo task 14")));
        assert!(lines[17].contains("n: new task"));
    }

    #[test]
    fn test_render_drag_indicator_and_ghost() {
        let mut app = app();
        draw(&mut app);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 3, 1));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 33, 4));
        let lines = draw(&mut app);

        // Done has one item, so the indicator clamps to the slot after it.
        assert!(lines[2].contains('\u{25b6}'));
        assert!(lines[2].contains('\u{25c0}'));
        assert!(lines[4].contains("Todo task 0"));
    }

    #[test]
    fn test_row_rect_clips_to_viewport() {
        let viewport = Rect::new(1, 1, 10, 5);
        assert_eq!(row_rect(viewport, 0.0, 1.0), Some(Rect::new(1, 1, 10, 1)));
        assert_eq!(row_rect(viewport, 4.0, 2.0), Some(Rect::new(1, 5, 10, 1)));
        assert_eq!(row_rect(viewport, -1.0, 1.0), None);
        assert_eq!(row_rect(viewport, 5.0, 1.0), None);
    }
}
