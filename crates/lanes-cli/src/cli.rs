use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lanes")]
#[command(about = "A virtualized, drag-reorderable task board", long_about = None)]
#[command(version, arg_required_else_help = false)]
pub struct Cli {
    /// Board file (or set LANES_FILE env var)
    #[arg(value_name = "FILE", env = "LANES_FILE")]
    pub file: Option<String>,

    /// Row height, overriding the config file
    #[arg(long, global = true)]
    pub item_height: Option<f64>,

    /// Rows kept materialized beyond the viewport, overriding the config file
    #[arg(long, global = true)]
    pub buffer: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a generated board file
    Seed(SeedArgs),
    /// Show which rows of a list would be materialized
    Window(WindowArgs),
    /// Feed a recorded pointer trace through the board
    Replay(ReplayArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct SeedArgs {
    /// Comma-separated list names
    #[arg(long, value_delimiter = ',', default_value = "Todo,Doing,Done")]
    pub lists: Vec<String>,
    /// Items generated per list
    #[arg(long, default_value_t = 10)]
    pub items: usize,
    #[arg(long, default_value = "Board")]
    pub name: String,
    #[arg(long)]
    pub output: String,
}

#[derive(Args)]
pub struct WindowArgs {
    /// Name of the list to inspect
    #[arg(long)]
    pub list: String,
    #[arg(long, default_value_t = 0.0)]
    pub scroll: f64,
    #[arg(long)]
    pub viewport: f64,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// JSON array of pointer samples
    #[arg(long)]
    pub trace: String,
    /// Width of every column
    #[arg(long, default_value_t = 100.0)]
    pub column_width: f64,
    /// Height of every column's viewport
    #[arg(long, default_value_t = 400.0)]
    pub column_height: f64,
}
