use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "todo", about = concat!("[X] todo v", env!("CARGO_PKG_VERSION"), " - a checklist in a plain-text file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output listings as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use this store file instead of searching for .todo
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List todo items, then done items (the default command)
    #[command(visible_alias = "ls")]
    List(ListArgs),
    /// Add items: one per argument, or one per line of piped input
    Add(AddArgs),
    /// Mark the Nth todo item done (it moves to the top of the file)
    Done(RankArgs),
    /// Reopen the Nth done item (it moves to the bottom of the file)
    #[command(visible_alias = "reopen")]
    Undo(RankArgs),
    /// Open the store in $VISUAL or $EDITOR
    Edit,
    /// Print the path of the store in use
    Path,
}

#[derive(Args, Default)]
pub struct ListArgs {
    /// How many items of each kind to show (default: list.limit from config)
    pub count: Option<String>,
    /// Only show todo items
    #[arg(short, long, conflicts_with = "done")]
    pub todo: bool,
    /// Only show done items
    #[arg(short, long)]
    pub done: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Item text (each argument becomes one item)
    pub text: Vec<String>,
    /// Also read items from stdin, one per line
    #[arg(long)]
    pub stdin: bool,
}

#[derive(Args)]
pub struct RankArgs {
    /// Position of the item among its kind, as shown by `todo list`
    pub rank: String,
}
