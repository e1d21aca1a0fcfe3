//! Task priority and the drop-position mapping used by the movement engine.

use super::ParsePriorityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority, ordered from lowest to highest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Least urgent.
    Low,
    /// Default priority.
    #[default]
    Medium,
    /// Most urgent.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "normal" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical drop zone within a column.
///
/// Dropping a task into a zone assigns the zone's priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropPosition {
    /// Top of the column.
    Top,
    /// Middle of the column.
    Middle,
    /// Bottom of the column.
    Bottom,
}

impl DropPosition {
    /// Returns the priority assigned to tasks dropped in this zone.
    #[must_use]
    pub const fn priority(self) -> Priority {
        match self {
            Self::Top => Priority::High,
            Self::Middle => Priority::Medium,
            Self::Bottom => Priority::Low,
        }
    }
}
