//! Error types for board domain validation and parsing.

use super::{BlockId, ColumnId, RecurringTaskId, TaskId};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while validating or applying board mutations.
///
/// The board absorbs these into silent no-ops at its public boundary; they
/// exist so rejections can be logged and unit-tested precisely.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// A task or template title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// A column display name is empty after trimming.
    #[error("column name must not be empty")]
    EmptyColumnName,

    /// A column with the same normalized identifier already exists.
    #[error("column already exists: {0}")]
    DuplicateColumn(ColumnId),

    /// The column is not part of the active registry.
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// The column is fixed and cannot be removed.
    #[error("column is fixed: {0}")]
    FixedColumn(ColumnId),

    /// A proposed column ordering is not a permutation of the active ids.
    #[error("column ordering must be a permutation of the existing columns")]
    InvalidColumnOrder,

    /// A block name is empty after trimming.
    #[error("block name must not be empty")]
    EmptyBlockName,

    /// A block with the same name (case-insensitive) already exists.
    #[error("block name already in use: {0}")]
    DuplicateBlockName(String),

    /// The block was not found.
    #[error("block not found: {0}")]
    BlockNotFound(BlockId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The recurring task template was not found.
    #[error("recurring task not found: {0}")]
    RecurringTaskNotFound(RecurringTaskId),

    /// A recurring task has no weekdays to recur on.
    #[error("recurring days must not be empty")]
    EmptyRecurringDays,

    /// A schedule label is empty after trimming.
    #[error("schedule label must not be empty")]
    EmptyScheduleLabel,

    /// A schedule label already exists for the weekday.
    #[error("schedule label already present: {0}")]
    DuplicateScheduleLabel(String),

    /// The due date precedes the start date.
    #[error("due date {due} precedes start date {start}")]
    InvertedDateRange {
        /// Requested start date.
        start: NaiveDate,
        /// Requested due date.
        due: NaiveDate,
    },

    /// The move would not change anything.
    #[error("source and target are identical")]
    SameTarget,
}

/// Error returned while parsing a priority label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing a weekday tag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown weekday: {0}")]
pub struct ParseDayOfWeekError(pub String);

/// Error returned while parsing a task kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task kind: {0}")]
pub struct ParseTaskKindError(pub String);
