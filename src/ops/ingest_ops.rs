use std::fs::File;
use std::io::{BufRead, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::io::store_io::{self, StoreError};
use crate::parse::todo_line;

/// Append one new todo item to the end of the store, creating the store if
/// needed. The text must be a single line.
pub fn append_item(store: &Path, text: &str) -> Result<(), StoreError> {
    check_single_line(text)?;
    let mut file = open_appender(store)?;
    write_item(&mut file, store, text.as_bytes())?;
    tracing::info!(store = %store.display(), "appended item");
    Ok(())
}

/// Append one item per non-empty line of `input`, until it is exhausted.
/// Line bytes are copied as-is. Returns how many items were added.
pub fn append_from_stream<R: BufRead>(store: &Path, mut input: R) -> Result<usize, StoreError> {
    let mut file = None;
    let mut added = 0;
    let mut line = Vec::new();

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line).map_err(StoreError::Input)? == 0 {
            break;
        }
        let text = strip_newline(&line);
        if text.is_empty() {
            continue;
        }
        // Opened lazily so empty input leaves a missing store missing
        if file.is_none() {
            file = Some(open_appender(store)?);
        }
        if let Some(f) = file.as_mut() {
            write_item(f, store, text)?;
            added += 1;
        }
    }

    tracing::info!(store = %store.display(), added, "appended items from input");
    Ok(added)
}

/// Remove one trailing `\n` (or `\r\n`)
fn strip_newline(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r\n")
        .or_else(|| line.strip_suffix(b"\n"))
        .unwrap_or(line)
}

fn check_single_line(text: &str) -> Result<(), StoreError> {
    if text.contains('\n') {
        return Err(StoreError::InvalidArgument(
            "item text cannot contain a newline".to_string(),
        ));
    }
    Ok(())
}

/// Open the store for appending. If the existing file doesn't end in a
/// newline, one is written first so the new item starts on its own line.
fn open_appender(store: &Path) -> Result<File, StoreError> {
    let mut file = store_io::open_for_append(store)?;
    let write_err = |e: std::io::Error| StoreError::Write {
        path: store.to_path_buf(),
        source: e,
    };

    let len = file.metadata().map_err(write_err)?.len();
    if len > 0
        && let Some(last) = last_byte(store)
        && last != b'\n'
    {
        file.write_all(b"\n").map_err(write_err)?;
    }
    Ok(file)
}

/// Last byte of the file, read through a separate handle
fn last_byte(path: &Path) -> Option<u8> {
    let mut f = File::open(path).ok()?;
    f.seek(SeekFrom::End(-1)).ok()?;
    let mut buf = [0u8; 1];
    f.read_exact(&mut buf).ok()?;
    Some(buf[0])
}

fn write_item(file: &mut File, store: &Path, text: &[u8]) -> Result<(), StoreError> {
    file.write_all(&todo_line(text))
        .map_err(|e| StoreError::Write {
            path: store.to_path_buf(),
            source: e,
        })
}
