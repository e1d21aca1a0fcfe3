//! Board configuration.

use serde::{Deserialize, Serialize};

/// Names and defaults used when a board is created or repaired.
///
/// The entry and terminal columns are the two fixed workflow stages; every
/// board has them, and neither can be removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Display name of the entry (first) workflow stage.
    pub entry_column: String,
    /// Display name of the terminal (done) workflow stage.
    pub terminal_column: String,
    /// Non-fixed columns placed between the entry and terminal stages.
    pub extra_columns: Vec<String>,
    /// Name of the catch-all block that receives unrouted tasks.
    pub default_block_name: String,
    /// Colour assigned to the catch-all block.
    pub default_block_color: String,
    /// File name used by file-backed snapshot stores.
    pub snapshot_file_name: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            entry_column: "Backlog".to_owned(),
            terminal_column: "Done".to_owned(),
            extra_columns: vec!["In Progress".to_owned()],
            default_block_name: "General".to_owned(),
            default_block_color: "#64748b".to_owned(),
            snapshot_file_name: "board.json".to_owned(),
        }
    }
}

impl BoardConfig {
    /// Creates a configuration with only the two fixed columns.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            extra_columns: Vec::new(),
            ..Self::default()
        }
    }

    /// Sets the non-fixed default columns.
    #[must_use]
    pub fn with_extra_columns(mut self, columns: impl IntoIterator<Item = String>) -> Self {
        self.extra_columns = columns.into_iter().collect();
        self
    }

    /// Sets the catch-all block name.
    #[must_use]
    pub fn with_default_block_name(mut self, name: impl Into<String>) -> Self {
        self.default_block_name = name.into();
        self
    }

    /// Sets the snapshot file name.
    #[must_use]
    pub fn with_snapshot_file_name(mut self, name: impl Into<String>) -> Self {
        self.snapshot_file_name = name.into();
        self
    }
}
