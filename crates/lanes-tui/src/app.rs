use crate::{
    columns::{column_layouts, split_screen, to_screen_rect, ColumnLayout},
    dialog::{handle_dialog_input, DialogAction},
    events::{Event, EventHandler},
    input::InputState,
    mouse::{PointerInput, PointerTranslator},
    surface::TerminalSurface,
    ui,
};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lanes_core::{AppConfig, LanesResult};
use lanes_domain::{
    Board, BoardController, BoardEvent, CommittedMove, LayoutProvider, ListId, MoveJournal,
    Preview,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// Rows scrolled per wheel notch.
const WHEEL_ROWS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    CreateItem(ListId),
}

pub struct App {
    pub should_quit: bool,
    pub mode: AppMode,
    pub input: InputState,
    controller: BoardController,
    surfaces: HashMap<ListId, TerminalSurface>,
    journal: MoveJournal,
    pointer: PointerTranslator,
    columns: Vec<ColumnLayout>,
    preview: Option<Preview>,
    hovered: Option<ListId>,
    status: Option<String>,
    frame_interval: Duration,
}

impl App {
    pub fn new(board: Board, config: &AppConfig) -> LanesResult<Self> {
        let surfaces = board
            .list_ids()
            .into_iter()
            .map(|id| (id, TerminalSurface::new()))
            .collect();
        let controller = BoardController::from_config(board, config)?;
        Ok(Self {
            should_quit: false,
            mode: AppMode::Normal,
            input: InputState::new(),
            controller,
            surfaces,
            journal: MoveJournal::new(),
            pointer: PointerTranslator::new(),
            columns: Vec::new(),
            preview: None,
            hovered: None,
            status: None,
            frame_interval: config.frame_interval(),
        })
    }

    pub fn controller(&self) -> &BoardController {
        &self.controller
    }

    pub fn board(&self) -> &Board {
        self.controller.board()
    }

    pub fn into_board(self) -> Board {
        self.controller.into_board()
    }

    pub fn surface(&self, list_id: ListId) -> Option<&TerminalSurface> {
        self.surfaces.get(&list_id)
    }

    pub fn journal(&self) -> &MoveJournal {
        &self.journal
    }

    pub fn columns(&self) -> &[ColumnLayout] {
        &self.columns
    }

    /// Current drop preview, if a drag is over some list.
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn hovered(&self) -> Option<ListId> {
        self.hovered
    }

    /// Recompute column placement for the given terminal area.
    pub fn relayout(&mut self, area: Rect) {
        let (board_area, _) = split_screen(area);
        let columns = column_layouts(board_area, &self.controller.board().list_ids());
        for column in &columns {
            if column.viewport.height == 0 || column.viewport.width == 0 {
                tracing::debug!("column for list {} has no room", column.list_id);
                continue;
            }
            if let Err(e) = self
                .controller
                .view_mut()
                .place_list(column.list_id, to_screen_rect(column.viewport))
            {
                tracing::warn!("cannot place list {}: {}", column.list_id, e);
            }
        }
        self.columns = columns;
    }

    /// Layout plus the coalesced refresh, run once before each draw.
    pub fn on_frame(&mut self, area: Rect) {
        self.relayout(area);
        self.controller.flush_frame(&mut self.surfaces);
    }

    pub fn on_tick(&mut self) {
        let now = self.pointer.now_ms();
        let events = self.controller.tick(now, &mut self.surfaces);
        self.apply_events(events);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.mode {
            AppMode::Normal => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Esc => {
                    if let Some(event) = self.controller.abort_drag() {
                        self.apply_events(vec![event]);
                    }
                }
                KeyCode::Char('n') => {
                    let target = self
                        .hovered
                        .or_else(|| self.controller.board().list_ids().first().copied());
                    if let Some(list_id) = target {
                        self.input.clear();
                        self.mode = AppMode::CreateItem(list_id);
                    }
                }
                _ => {}
            },
            AppMode::CreateItem(list_id) => match handle_dialog_input(&mut self.input, key.code) {
                DialogAction::Confirm => {
                    let title = self.input.as_str().trim().to_string();
                    match self
                        .controller
                        .append(list_id, title.clone(), &mut self.surfaces)
                    {
                        Ok(_) => {
                            self.status = Some(format!(
                                "Added '{}' to {}",
                                title,
                                self.list_name(list_id)
                            ));
                        }
                        Err(e) => {
                            tracing::warn!("append failed: {}", e);
                            self.status = Some(format!("Could not add task: {}", e));
                        }
                    }
                    self.input.clear();
                    self.mode = AppMode::Normal;
                }
                DialogAction::Cancel => {
                    self.input.clear();
                    self.mode = AppMode::Normal;
                }
                DialogAction::None => {}
            },
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if self.mode != AppMode::Normal {
            return;
        }
        match self.pointer.translate(&event) {
            Some(PointerInput::Sample(sample)) => {
                self.hovered = self.controller.view().list_at(sample.x, sample.y);
                let events =
                    self.controller
                        .handle_pointer(&sample, &mut self.surfaces, &mut self.journal);
                self.apply_events(events);
            }
            Some(PointerInput::Wheel { x, y, notches }) => {
                // The preview is pinned to the pointer while dragging, so the
                // wheel only scrolls an idle board.
                if self.controller.drag().is_active() {
                    return;
                }
                let Some(list_id) = self.controller.view().list_at(x, y) else {
                    return;
                };
                let delta = notches * WHEEL_ROWS * self.controller.view().geometry().item_height();
                if let Err(e) = self.controller.view_mut().scroll_by(list_id, delta) {
                    tracing::warn!("wheel scroll ignored: {}", e);
                }
            }
            None => {}
        }
    }

    fn apply_events(&mut self, events: Vec<BoardEvent>) {
        for event in events {
            match event {
                BoardEvent::DragStarted { item_id, .. } => {
                    tracing::debug!("drag started for {}", item_id);
                    self.preview = self.controller.drag().session().map(|s| s.preview());
                    self.status = None;
                }
                BoardEvent::Preview(preview) => self.preview = Some(preview),
                BoardEvent::AutoScrolled { list_id, delta } => {
                    tracing::debug!("auto-scrolled list {} by {}", list_id, delta);
                }
                BoardEvent::Moved(committed) => {
                    self.preview = None;
                    self.status = Some(self.describe_move(&committed));
                }
                BoardEvent::DroppedInPlace(_) => {
                    self.preview = None;
                    self.status = Some("Dropped back in place".to_string());
                }
                BoardEvent::Cancelled { reason } => {
                    self.preview = None;
                    self.status = Some(format!("Drag cancelled: {}", reason));
                }
            }
        }
    }

    fn list_name(&self, list_id: ListId) -> String {
        self.controller
            .board()
            .list(list_id)
            .map(|list| list.name.clone())
            .unwrap_or_else(|| list_id.to_string())
    }

    fn describe_move(&self, committed: &CommittedMove) -> String {
        let title = self
            .controller
            .board()
            .list(committed.target_list_id)
            .and_then(|list| list.get(committed.target_index))
            .map(|item| item.title.clone())
            .unwrap_or_else(|| committed.item_id.to_string());
        if committed.origin_list_id == committed.target_list_id {
            format!(
                "Moved '{}' to position {}",
                title,
                committed.target_index + 1
            )
        } else {
            format!(
                "Moved '{}' from {} to {} at position {}",
                title,
                self.list_name(committed.origin_list_id),
                self.list_name(committed.target_list_id),
                committed.target_index + 1
            )
        }
    }

    /// Footer text: the last status message, or the key help.
    pub fn status_line(&self) -> String {
        self.status.clone().unwrap_or_else(|| {
            "drag: move task | wheel: scroll | n: new task | Esc: abort drag | q: quit".to_string()
        })
    }

    pub async fn run(&mut self) -> LanesResult<()> {
        let mut terminal = setup_terminal()?;
        let mut events = EventHandler::new(self.frame_interval);

        let result = self.event_loop(&mut terminal, &mut events).await;

        events.stop();
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &mut EventHandler,
    ) -> LanesResult<()> {
        terminal.draw(|frame| ui::render(self, frame))?;

        while !self.should_quit {
            let Some(event) = events.next().await else {
                break;
            };
            match event {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize => {}
                Event::Tick => {
                    self.on_tick();
                    terminal.draw(|frame| ui::render(self, frame))?;
                }
            }
        }
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}
