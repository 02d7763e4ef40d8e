use crate::cli::ReplayArgs;
use crate::context::CliContext;
use crate::output;
use anyhow::Context;
use lanes_domain::{BoardEvent, CommittedMove, MoveJournal, PointerSample};
use serde::Serialize;

#[derive(Serialize)]
struct ListOrder {
    name: String,
    items: Vec<String>,
}

#[derive(Serialize)]
struct ReplayReport {
    samples: usize,
    events: Vec<BoardEvent>,
    moves: Vec<CommittedMove>,
    lists: Vec<ListOrder>,
}

pub async fn handle(ctx: &CliContext, file_path: &str, args: ReplayArgs) -> anyhow::Result<()> {
    let board = ctx.load_board(file_path).await?;
    let content = tokio::fs::read_to_string(&args.trace)
        .await
        .with_context(|| format!("Cannot read trace {}", args.trace))?;
    let samples: Vec<PointerSample> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid pointer trace {}", args.trace))?;

    let mut headless = ctx.mount(board, args.column_width, args.column_height)?;
    let mut journal = MoveJournal::new();
    let mut events = Vec::new();
    for sample in &samples {
        events.extend(headless.controller.handle_pointer(
            sample,
            &mut headless.surfaces,
            &mut journal,
        ));
        events.extend(
            headless
                .controller
                .tick(sample.timestamp_ms, &mut headless.surfaces),
        );
    }
    tracing::info!(
        "Replayed {} samples, {} moves committed",
        samples.len(),
        journal.moves().len()
    );

    let lists = headless
        .controller
        .board()
        .lists()
        .iter()
        .map(|list| ListOrder {
            name: list.name.clone(),
            items: list.titles().into_iter().map(String::from).collect(),
        })
        .collect();
    output::output_success(ReplayReport {
        samples: samples.len(),
        events,
        moves: journal.moves().to_vec(),
        lists,
    });
    Ok(())
}
