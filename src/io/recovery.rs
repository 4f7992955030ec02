//! Safety net for failed rewrites.
//!
//! When a toggle can't replace the store, the bytes it meant to write are
//! appended to `<store>.recovery` so nothing the user had is lost.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

/// Written once, when the log is created or empty.
const LOG_PREAMBLE: &[u8] = b"\
# todo recovery log
# Each block holds store contents that could not be written back.
# Copy what you need into your .todo, then delete this file.
";

/// Line closing each saved block
const BLOCK_END: &[u8] = b"@@ end\n";

/// Store contents that a rewrite failed to persist
#[derive(Debug, Clone)]
pub struct UnsavedRewrite {
    pub at: DateTime<Utc>,
    pub store: PathBuf,
    pub error: String,
    /// Exactly what the rewrite would have written
    pub contents: Vec<u8>,
}

impl UnsavedRewrite {
    pub fn new(store: &Path, error: &io::Error, contents: Vec<u8>) -> Self {
        UnsavedRewrite {
            at: Utc::now(),
            store: store.to_path_buf(),
            error: error.to_string(),
            contents,
        }
    }

    /// `@@ <time> <store>: <error>`, the raw contents, then `@@ end`.
    fn render(&self) -> Vec<u8> {
        let mut out = format!(
            "\n@@ {} {}: {}\n",
            self.at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.store.display(),
            self.error,
        )
        .into_bytes();
        out.extend_from_slice(&self.contents);
        if !self.contents.is_empty() && !self.contents.ends_with(b"\n") {
            out.push(b'\n');
        }
        out.extend_from_slice(BLOCK_END);
        out
    }
}

/// Recovery log for a store: `.todo` → `.todo.recovery`, in the same directory.
pub fn recovery_log_path(store: &Path) -> PathBuf {
    let mut name = store
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".recovery");
    store.with_file_name(name)
}

/// Append the unsaved contents to the store's recovery log.
/// Failing to do so is only a warning; the caller already has an error to report.
pub fn log_unsaved(unsaved: &UnsavedRewrite) {
    let path = recovery_log_path(&unsaved.store);
    match append_block(&path, unsaved) {
        Ok(()) => tracing::warn!(path = %path.display(), "saved unwritten store contents"),
        Err(e) => tracing::warn!(path = %path.display(), "could not write recovery log: {}", e),
    }
}

fn append_block(path: &Path, unsaved: &UnsavedRewrite) -> io::Result<()> {
    let fresh = std::fs::metadata(path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if fresh {
        file.write_all(LOG_PREAMBLE)?;
    }
    file.write_all(&unsaved.render())?;
    Ok(())
}
