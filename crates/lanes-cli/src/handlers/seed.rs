use crate::cli::SeedArgs;
use crate::context::CliContext;
use crate::output;
use lanes_domain::Board;
use serde::Serialize;

#[derive(Serialize)]
struct SeededList {
    id: String,
    name: String,
    items: usize,
}

pub async fn handle(ctx: &CliContext, args: SeedArgs) -> anyhow::Result<()> {
    let names: Vec<String> = args
        .lists
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    if names.iter().any(|name| name.is_empty()) {
        anyhow::bail!("List names must not be empty");
    }

    let mut board = Board::new(args.name, None);
    for name in &names {
        let list_id = board.add_list(name.clone());
        for n in 1..=args.items {
            board.append(list_id, format!("{} task {}", name, n))?;
        }
    }
    ctx.save_board(&args.output, &board).await?;

    let lists: Vec<SeededList> = board
        .lists()
        .iter()
        .map(|list| SeededList {
            id: list.id.to_string(),
            name: list.name.clone(),
            items: list.len(),
        })
        .collect();
    output::output_success(serde_json::json!({
        "output": args.output,
        "board_id": board.id.to_string(),
        "lists": lists,
    }));
    Ok(())
}
