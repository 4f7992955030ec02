use serde::{Deserialize, Serialize};

/// User configuration from `~/.config/todo/config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoConfig {
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListConfig {
    /// How many items per class to show when no count is given
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            limit: default_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditorConfig {
    /// Used by `todo edit` when neither $VISUAL nor $EDITOR is set
    #[serde(default = "default_editor")]
    pub command: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            command: default_editor(),
        }
    }
}

fn default_limit() -> usize {
    10
}

fn default_editor() -> String {
    "vi".to_string()
}
