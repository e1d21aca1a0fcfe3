//! Read-side ordering and filtering of task listings.
//!
//! Listings are computed fresh on every read in two ranked steps: first a
//! partition putting terminal-stage tasks ahead of the rest, then a stable
//! sort inside each partition by descending priority and ascending creation
//! time. Search filtering happens before either step.

use super::{ColumnId, Task};
use std::cmp::Ordering;

/// Filter applied to a listing before it is ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    search: Option<String>,
    column: Option<ColumnId>,
}

impl TaskQuery {
    /// Creates a query matching every task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the listing to tasks whose title or description contains
    /// `text`, ignoring case.
    #[must_use]
    pub fn matching(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Restricts the listing to one column.
    #[must_use]
    pub fn in_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Returns `true` when `task` passes the filter.
    #[must_use]
    pub fn accepts(&self, task: &Task) -> bool {
        let column_ok = self
            .column
            .as_ref()
            .is_none_or(|column| task.column() == column);
        let search_ok = self
            .search
            .as_deref()
            .is_none_or(|needle| task.matches_search(needle));
        column_ok && search_ok
    }
}

/// Higher priority first, then older tasks first.
#[must_use]
pub fn by_priority_then_created(left: &Task, right: &Task) -> Ordering {
    right
        .priority()
        .cmp(&left.priority())
        .then_with(|| left.created_at().cmp(&right.created_at()))
}

/// Splits tasks into terminal-stage and other tasks, preserving order.
#[must_use]
pub fn partition_terminal<'a>(
    tasks: Vec<&'a Task>,
    terminal: &ColumnId,
) -> (Vec<&'a Task>, Vec<&'a Task>) {
    tasks
        .into_iter()
        .partition(|task| task.column() == terminal)
}

/// Filters and orders a listing.
#[must_use]
pub fn list<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    query: &TaskQuery,
    terminal: &ColumnId,
) -> Vec<&'a Task> {
    let filtered: Vec<&Task> = tasks.into_iter().filter(|task| query.accepts(task)).collect();
    let (mut done, mut open) = partition_terminal(filtered, terminal);
    done.sort_by(|left, right| by_priority_then_created(left, right));
    open.sort_by(|left, right| by_priority_then_created(left, right));
    done.extend(open);
    done
}
