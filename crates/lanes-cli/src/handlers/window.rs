use crate::cli::WindowArgs;
use crate::context::CliContext;
use crate::output;
use serde::Serialize;

/// Column width is irrelevant to the window and only needs to be positive.
const HEADLESS_WIDTH: f64 = 100.0;

#[derive(Serialize)]
struct WindowReport {
    list: String,
    item_count: usize,
    item_height: f64,
    buffer_count: usize,
    scroll_offset: f64,
    viewport_height: f64,
    extent: f64,
    max_scroll_offset: f64,
    start: usize,
    end: usize,
    materialized: Vec<usize>,
}

pub async fn handle(ctx: &CliContext, file_path: &str, args: WindowArgs) -> anyhow::Result<()> {
    let board = ctx.load_board(file_path).await?;
    let list_id = board
        .list_by_name(&args.list)
        .map(|list| list.id)
        .ok_or_else(|| anyhow::anyhow!("List not found: {}", args.list))?;

    let mut headless = ctx.mount(board, HEADLESS_WIDTH, args.viewport)?;
    headless
        .controller
        .view_mut()
        .set_scroll_offset(list_id, args.scroll)?;
    headless.controller.flush_frame(&mut headless.surfaces);

    let view = headless.controller.view();
    let window = view
        .window(list_id)
        .ok_or_else(|| anyhow::anyhow!("List not mounted: {}", args.list))?;
    let state = window.state();
    let range = state.visible_range();

    output::output_success(WindowReport {
        list: args.list,
        item_count: state.item_count(),
        item_height: state.item_height(),
        buffer_count: view.geometry().buffer_count(),
        scroll_offset: state.scroll_offset(),
        viewport_height: state.viewport_height(),
        extent: state.extent(),
        max_scroll_offset: state.max_scroll_offset(),
        start: range.start,
        end: range.end,
        materialized: window.rows().materialized().into_iter().collect(),
    });
    Ok(())
}
