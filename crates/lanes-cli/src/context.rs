use anyhow::Context;
use lanes_core::AppConfig;
use lanes_domain::{Board, BoardController, ListId, ScreenRect};
use lanes_tui::TerminalSurface;
use std::collections::HashMap;

/// Lists a fresh board starts with when no file is given.
const STARTER_LISTS: [&str; 3] = ["Todo", "In Progress", "Done"];

pub struct CliContext {
    pub config: AppConfig,
}

impl CliContext {
    pub fn new(item_height: Option<f64>, buffer: Option<usize>) -> Self {
        let mut config = AppConfig::load();
        if let Some(item_height) = item_height {
            config.item_height = item_height;
        }
        if let Some(buffer) = buffer {
            config.buffer_count = buffer;
        }
        Self { config }
    }

    pub async fn load_board(&self, file_path: &str) -> anyhow::Result<Board> {
        let content = tokio::fs::read_to_string(file_path)
            .await
            .with_context(|| format!("Cannot read board file {}", file_path))?;
        let board = Board::from_json(&content)?;
        tracing::info!(
            "Loaded board '{}' with {} lists from {}",
            board.name,
            board.lists().len(),
            file_path
        );
        Ok(board)
    }

    pub async fn save_board(&self, file_path: &str, board: &Board) -> anyhow::Result<()> {
        tokio::fs::write(file_path, board.to_json_pretty()?)
            .await
            .with_context(|| format!("Cannot write board file {}", file_path))?;
        Ok(())
    }

    pub fn starter_board() -> Board {
        let mut board = Board::new("Board".to_string(), None);
        for name in STARTER_LISTS {
            board.add_list(name.to_string());
        }
        board
    }

    /// Lay the lists out side by side in equal columns, mount a surface for
    /// each and paint the first frame.
    pub fn mount(
        &self,
        board: Board,
        column_width: f64,
        column_height: f64,
    ) -> anyhow::Result<HeadlessBoard> {
        let list_ids = board.list_ids();
        let mut controller = BoardController::from_config(board, &self.config)?;
        for (column, list_id) in list_ids.iter().enumerate() {
            let bounds = ScreenRect::new(
                column as f64 * column_width,
                0.0,
                column_width,
                column_height,
            );
            controller.view_mut().place_list(*list_id, bounds)?;
        }
        let mut surfaces: HashMap<ListId, TerminalSurface> = list_ids
            .into_iter()
            .map(|id| (id, TerminalSurface::new()))
            .collect();
        controller.flush_frame(&mut surfaces);
        Ok(HeadlessBoard {
            controller,
            surfaces,
        })
    }
}

/// A board driven without a terminal.
pub struct HeadlessBoard {
    pub controller: BoardController,
    pub surfaces: HashMap<ListId, TerminalSurface>,
}
