//! Identifier types for the board domain.
//!
//! Tasks, blocks, and recurring templates use random UUIDs. Occurrences get
//! a UUID v5 derived from their template and date, and columns are keyed by
//! their normalized name.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Creates a new random ", $label, " identifier.")]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[doc = concat!("Creates a ", $label, " identifier from an existing UUID.")]
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a task, including materialized occurrences.
    TaskId,
    "task"
);

uuid_identifier!(
    /// Unique identifier for a block (a named task grouping).
    BlockId,
    "block"
);

uuid_identifier!(
    /// Unique identifier for a recurring task template.
    RecurringTaskId,
    "recurring task"
);

impl TaskId {
    /// Derives the identifier of the occurrence of `template` on `date`.
    ///
    /// The result is stable: expanding the same template for the same date
    /// always yields the same identifier.
    #[must_use]
    pub fn for_occurrence(template: RecurringTaskId, date: NaiveDate) -> Self {
        let name = date.format("%Y-%m-%d").to_string();
        Self(Uuid::new_v5(template.as_ref(), name.as_bytes()))
    }
}

/// Stable identifier of a workflow column.
///
/// Derived from the display name at creation time by lowercasing and
/// replacing whitespace runs with a single hyphen. The identifier never
/// changes when the column is renamed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Normalizes a display name into a column identifier.
    ///
    /// # Examples
    ///
    ///     use blockboard::board::domain::ColumnId;
    ///
    ///     assert_eq!(ColumnId::from_name("  QA  Review ").as_str(), "qa-review");
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let normalized = name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        Self(normalized)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the identifier carries no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ColumnId {
    fn from(value: &str) -> Self {
        Self::from_name(value)
    }
}

impl AsRef<str> for ColumnId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
