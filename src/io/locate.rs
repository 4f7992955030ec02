use std::path::{Path, PathBuf};

/// File name of a store, searched for in the working directory and its ancestors
pub const STORE_FILE_NAME: &str = ".todo";

/// Error type for store discovery
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("no .todo file found and the home directory is unknown (HOME is not set)")]
    NoHome,
    #[error("could not determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Get the user's home directory from `HOME`. Unset or empty means unknown.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// The fallback store under the given home directory
pub fn home_store_path(home: &Path) -> PathBuf {
    home.join(STORE_FILE_NAME)
}

/// Walk up from `start` looking for a store file. Returns the first one found.
pub fn find_upward(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(STORE_FILE_NAME);
        tracing::debug!(path = %candidate.display(), "checking for store");
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() || current.as_os_str().is_empty() {
            return None;
        }
    }
}

/// Resolve the store for a start directory, falling back to `<home>/.todo`.
///
/// The fallback is not checked for existence: reading or toggling a missing
/// home store fails when the store is opened, while appending creates it.
pub fn resolve_from(start: &Path, home: Option<&Path>) -> Result<PathBuf, LocateError> {
    if let Some(found) = find_upward(start) {
        tracing::debug!(path = %found.display(), "found store");
        return Ok(found);
    }
    let home = home.ok_or(LocateError::NoHome)?;
    let fallback = home_store_path(home);
    tracing::debug!(path = %fallback.display(), "no store above start dir, using home store");
    Ok(fallback)
}

/// Resolve the store for the current working directory and `HOME`.
pub fn resolve() -> Result<PathBuf, LocateError> {
    let cwd = std::env::current_dir().map_err(LocateError::CurrentDir)?;
    resolve_from(&cwd, home_dir().as_deref())
}

/// Where new items go. Like [`resolve_from`], but with no home directory the
/// store is created in `start` instead of failing.
pub fn ingest_target_from(start: &Path, home: Option<&Path>) -> PathBuf {
    match resolve_from(start, home) {
        Ok(path) => path,
        Err(_) => {
            let local = start.join(STORE_FILE_NAME);
            tracing::debug!(path = %local.display(), "home unknown, appending to start dir");
            local
        }
    }
}

/// Destination for new items from the current working directory and `HOME`.
pub fn ingest_target() -> Result<PathBuf, LocateError> {
    let cwd = std::env::current_dir().map_err(LocateError::CurrentDir)?;
    Ok(ingest_target_from(&cwd, home_dir().as_deref()))
}
