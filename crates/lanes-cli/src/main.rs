mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use lanes_tui::App;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("LANES_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        output::output_error(&format!("{:#}", e));
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = CliContext::new(cli.item_height, cli.buffer);

    match cli.command {
        None => {
            let board = match cli.file {
                Some(ref file_path) if std::path::Path::new(file_path).exists() => {
                    ctx.load_board(file_path).await?
                }
                Some(ref file_path) => {
                    tracing::info!("{} does not exist, opening a starter board", file_path);
                    CliContext::starter_board()
                }
                None => CliContext::starter_board(),
            };
            let mut app = App::new(board, &ctx.config)?;
            app.run().await?;
        }
        Some(Commands::Seed(args)) => handlers::seed::handle(&ctx, args).await?,
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "lanes", &mut std::io::stdout());
        }
        Some(cmd) => {
            let file_path = cli
                .file
                .ok_or_else(|| anyhow::anyhow!("FILE is required for this command"))?;
            match cmd {
                Commands::Window(args) => handlers::window::handle(&ctx, &file_path, args).await?,
                Commands::Replay(args) => handlers::replay::handle(&ctx, &file_path, args).await?,
                Commands::Seed(_) | Commands::Completions { .. } => {}
            }
        }
    }

    Ok(())
}
