//! Flipping an item between todo and done.
//!
//! A toggle rewrites the whole store: the flipped item is pulled out of its
//! position and reinserted at the top of the file when it becomes done, or at
//! the bottom when it becomes todo. All other lines keep their relative order
//! and their exact bytes.
//!
//! There is no file locking. Two invocations toggling the same store at once
//! race, and the last one to rename its temp file over the store wins.

use std::io::{self, BufRead};
use std::path::Path;

use crate::io::recovery::{self, UnsavedRewrite};
use crate::io::store_io::{self, StoreError, StoreLines};
use crate::model::item::{ItemClass, Limit, ToggleOutcome};
use crate::parse::{is_class, serialize_lines, with_mark};

/// Result of rearranging a store's lines in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rearranged {
    /// The full store contents after the toggle
    pub lines: Vec<Vec<u8>>,
    /// The moved item, or `None` if no item had the requested rank
    pub outcome: Option<ToggleOutcome>,
    /// How many items of the searched class the store held
    pub matched: usize,
}

/// Pull the `rank`th item of `class` out of `lines`, give it the mark of
/// `target`, and put it back at the top (done) or bottom (todo).
pub fn rearrange<I>(lines: I, class: ItemClass, target: ItemClass, rank: Limit) -> Rearranged
where
    I: IntoIterator<Item = Vec<u8>>,
{
    let mut retained = Vec::new();
    let mut picked = None;
    let mut matched = 0;

    for line in lines {
        if is_class(&line, class) {
            matched += 1;
            if matched == rank.get() {
                picked = with_mark(&line, target);
                continue;
            }
        }
        retained.push(line);
    }

    let Some(line) = picked else {
        return Rearranged {
            lines: retained,
            outcome: None,
            matched,
        };
    };

    let outcome = ToggleOutcome {
        class: target,
        rank: rank.get(),
        line: line.clone(),
    };
    let lines = match target {
        ItemClass::Done => {
            let mut out = Vec::with_capacity(retained.len() + 1);
            out.push(line);
            out.extend(retained);
            out
        }
        ItemClass::Todo => {
            retained.push(line);
            retained
        }
    };

    Rearranged {
        lines,
        outcome: Some(outcome),
        matched,
    }
}

/// Toggle the `rank`th item of `class` in the store to the mark of `target`.
///
/// The store is read completely and closed before anything is written. If no
/// item has that rank the store is left untouched and `NotFound` is returned.
/// The new contents go to a temp file that is renamed over the store; if that
/// fails the contents are saved to the recovery log next to the store.
pub fn toggle(
    store: &Path,
    class: ItemClass,
    target: ItemClass,
    rank: Limit,
) -> Result<ToggleOutcome, StoreError> {
    let reader = store_io::open_for_read(store)?;
    toggle_with(store, reader, store_io::atomic_write, class, target, rank)
}

/// The read-then-write cycle behind [`toggle`], with the store's reader and
/// writer passed in.
fn toggle_with<R, W>(
    store: &Path,
    reader: R,
    write: W,
    class: ItemClass,
    target: ItemClass,
    rank: Limit,
) -> Result<ToggleOutcome, StoreError>
where
    R: BufRead,
    W: FnOnce(&Path, &[u8]) -> io::Result<()>,
{
    // The reader is consumed here, so the store is closed before any write
    let lines = StoreLines::new(reader, store).collect::<Result<Vec<_>, _>>()?;

    let Rearranged {
        lines,
        outcome,
        matched,
    } = rearrange(lines, class, target, rank);

    let Some(outcome) = outcome else {
        tracing::debug!(%class, rank = rank.get(), matched, "no item with that rank");
        return Err(StoreError::NotFound {
            class,
            rank: rank.get(),
            available: matched,
        });
    };

    let content = serialize_lines(&lines);
    if let Err(e) = write(store, &content) {
        recovery::log_unsaved(&UnsavedRewrite::new(store, &e, content));
        return Err(StoreError::Write {
            path: store.to_path_buf(),
            source: e,
        });
    }

    tracing::info!(from = %class, to = %target, rank = rank.get(), "toggled item");
    Ok(outcome)
}

/// Mark the `rank`th todo item done; it moves to the top of the store.
pub fn mark_done(store: &Path, rank: Limit) -> Result<ToggleOutcome, StoreError> {
    toggle(store, ItemClass::Todo, ItemClass::Done, rank)
}

/// Reopen the `rank`th done item; it moves to the bottom of the store.
pub fn reopen(store: &Path, rank: Limit) -> Result<ToggleOutcome, StoreError> {
    toggle(store, ItemClass::Done, ItemClass::Todo, rank)
}
