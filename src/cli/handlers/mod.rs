mod edit;
pub use edit::{cmd_edit, editor_command};

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::locate;
use crate::io::store_io::StoreError;
use crate::model::item::{ItemClass, Limit};
use crate::ops::{ingest_ops, list_ops, toggle_ops};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run a parsed command. Arguments are validated before the store is
/// located, so a bad count is reported as such even without a store.
pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let file = cli.file;

    match cli.command.unwrap_or_else(|| Commands::List(ListArgs::default())) {
        Commands::List(args) => cmd_list(args, file, json),
        Commands::Add(args) => cmd_add(args, file),
        Commands::Done(args) => cmd_done(args, file),
        Commands::Undo(args) => cmd_undo(args, file),
        Commands::Edit => cmd_edit(&ingest_store(file)?),
        Commands::Path => {
            println!("{}", ingest_store(file)?.display());
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The store to read or toggle. An explicit `--file` wins; otherwise search
/// upward from the working directory, then fall back to the home store.
fn existing_store(file: Option<PathBuf>) -> Result<PathBuf, StoreError> {
    let store = match file {
        Some(path) => path,
        None => locate::resolve()?,
    };
    tracing::debug!(store = %store.display(), "using store");
    Ok(store)
}

/// The store new items go to. Same search as [`existing_store`], but with no
/// home directory it lands in the working directory.
fn ingest_store(file: Option<PathBuf>) -> Result<PathBuf, StoreError> {
    let store = match file {
        Some(path) => path,
        None => locate::ingest_target()?,
    };
    tracing::debug!(store = %store.display(), "using store");
    Ok(store)
}

/// Parse a count or rank token. Every character must be an ASCII digit;
/// anything else (including overflow) yields 0 rather than a leading-digit prefix.
pub fn parse_count(token: &str) -> usize {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    token.parse().unwrap_or(0)
}

/// Turn a command-line token into a positive count, or reject it
fn require_positive(token: &str, what: &str) -> Result<Limit, StoreError> {
    Limit::new(parse_count(token)).ok_or_else(|| {
        StoreError::InvalidArgument(format!(
            "{} must be a positive number, got '{}'",
            what, token
        ))
    })
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_list(
    args: ListArgs,
    file: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let limit = match args.count.as_deref() {
        Some(token) => require_positive(token, "count")?,
        None => {
            let config = config_io::read_config()?;
            Limit::new(config.list.limit).ok_or_else(|| {
                StoreError::InvalidArgument("list.limit in config must be positive".to_string())
            })?
        }
    };

    let store = existing_store(file)?;

    let sections = match (args.todo, args.done) {
        (true, false) => vec![single_section(&store, ItemClass::Todo, limit)?],
        (false, true) => vec![single_section(&store, ItemClass::Done, limit)?],
        _ => {
            let (todo, done): (Vec<_>, Vec<_>) = list_ops::list_all(&store, limit)?
                .into_iter()
                .partition(|item| item.class == ItemClass::Todo);
            vec![
                Section {
                    class: ItemClass::Todo,
                    items: todo,
                },
                Section {
                    class: ItemClass::Done,
                    items: done,
                },
            ]
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&listing_to_json(&sections))?);
    } else {
        print!("{}", format_listing(&sections));
    }
    Ok(())
}

fn single_section(store: &Path, class: ItemClass, limit: Limit) -> Result<Section, StoreError> {
    let items = list_ops::list_items(store, class, limit)?.collect::<Result<Vec<_>, _>>()?;
    Ok(Section { class, items })
}

fn cmd_add(args: AddArgs, file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let read_stdin = args.stdin || (args.text.is_empty() && !stdin.is_terminal());
    if args.text.is_empty() && !read_stdin {
        return Err(StoreError::InvalidArgument("nothing to add".to_string()).into());
    }
    let store = ingest_store(file)?;
    let store = store.as_path();

    let mut added = 0;
    for text in &args.text {
        // Multi-line arguments become one item per non-empty line
        for line in text.lines().filter(|l| !l.is_empty()) {
            ingest_ops::append_item(store, line)?;
            added += 1;
        }
    }
    if read_stdin {
        added += ingest_ops::append_from_stream(store, stdin.lock())?;
    }

    println!("{}", format_added(added));
    Ok(())
}

fn cmd_done(args: RankArgs, file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let rank = require_positive(&args.rank, "rank")?;
    let outcome = toggle_ops::mark_done(&existing_store(file)?, rank)?;
    println!("{}", format_toggle(&outcome));
    Ok(())
}

fn cmd_undo(args: RankArgs, file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let rank = require_positive(&args.rank, "rank")?;
    let outcome = toggle_ops::reopen(&existing_store(file)?, rank)?;
    println!("{}", format_toggle(&outcome));
    Ok(())
}
