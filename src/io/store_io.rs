use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::io::locate::LocateError;
use crate::model::item::ItemClass;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not read input: {0}")]
    Input(#[source] io::Error),
    #[error("no {class} item #{rank} (store has {available})")]
    NotFound {
        class: ItemClass,
        rank: usize,
        available: usize,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl StoreError {
    /// Process exit status for this kind of failure
    pub fn exit_code(&self) -> i32 {
        match self {
            StoreError::InvalidArgument(_) => 2,
            StoreError::NotFound { .. } => 3,
            StoreError::Locate(_) => 4,
            StoreError::Open { .. }
            | StoreError::Read { .. }
            | StoreError::Write { .. }
            | StoreError::Input(_) => 1,
        }
    }
}

/// Open a store for streaming reads
pub fn open_for_read(path: &Path) -> Result<BufReader<File>, StoreError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| StoreError::Open {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Open a store for appending, creating it if missing
pub fn open_for_append(path: &Path) -> Result<File, StoreError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StoreError::Open {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Forward-only iterator over the lines of a store, as raw bytes.
///
/// Only the `\n` terminator is stripped; a `\r` before it stays part of the
/// line, and bytes that aren't UTF-8 are passed through, so foreign lines
/// survive a rewrite unchanged.
pub struct StoreLines<R> {
    reader: R,
    path: PathBuf,
    finished: bool,
}

impl<R: BufRead> StoreLines<R> {
    pub fn new(reader: R, path: &Path) -> Self {
        StoreLines {
            reader,
            path: path.to_path_buf(),
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for StoreLines<R> {
    type Item = Result<Vec<u8>, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                }
                Some(Ok(line))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                }))
            }
        }
    }
}

/// Open a store and stream its lines
pub fn stream_lines(path: &Path) -> Result<StoreLines<BufReader<File>>, StoreError> {
    let reader = open_for_read(path)?;
    Ok(StoreLines::new(reader, path))
}

/// Write `content` to `path` atomically using a temp file + rename.
///
/// The temp file lives next to the real target (symlinks are followed) and
/// takes over the existing file's permissions.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    if let Ok(meta) = fs::metadata(&target) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}
