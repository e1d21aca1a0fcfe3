//! Serializable board snapshot exchanged with persistence adapters.

use super::{Block, ColumnRegistry, RecurringTask};
use serde::{Deserialize, Serialize};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

const fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Persistable state of a board: column registry, blocks with their tasks,
/// and recurring templates.
///
/// Occurrences are never part of a snapshot. Absent due dates serialize as
/// `null` and decode back to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Format version.
    #[serde(default = "current_version")]
    pub version: u32,
    /// Column registry; older snapshots may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnRegistry>,
    /// Blocks, each owning its ordered tasks.
    pub blocks: Vec<Block>,
    /// Recurring task templates.
    #[serde(default)]
    pub recurring_tasks: Vec<RecurringTask>,
}

impl BoardSnapshot {
    /// Encodes the snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if encoding fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Decodes a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when `raw` is not a valid snapshot.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
