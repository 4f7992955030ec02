use std::path::Path;
use std::process::Command;

use crate::io::config_io;
use crate::model::config::TodoConfig;

/// Pick the editor: $VISUAL, then $EDITOR, then `editor.command` from config.
pub fn editor_command(config: &TodoConfig) -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.trim().is_empty())
        .unwrap_or_else(|| config.editor.command.clone())
}

/// Open the store in the user's editor and wait for it to exit.
///
/// The editor value may carry its own flags (`code --wait`); the store path
/// is appended as the last argument.
pub fn cmd_edit(store: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::read_config()?;
    let editor = editor_command(&config);

    let mut words = editor.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| format!("editor command is empty: '{}'", editor))?;

    tracing::debug!(editor = %editor, store = %store.display(), "launching editor");
    let status = Command::new(program)
        .args(words)
        .arg(store)
        .status()
        .map_err(|e| format!("could not run editor '{}': {}", editor, e))?;

    if !status.success() {
        return Err(format!("editor '{}' exited with {}", editor, status).into());
    }
    Ok(())
}
