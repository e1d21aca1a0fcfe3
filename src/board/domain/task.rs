//! Task aggregate and edit types.

use super::{
    BlockId, BoardDomainError, ColumnId, ParseTaskKindError, Priority, RecurringDays,
    RecurringTaskId, TaskId,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// What a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// A plain to-do item.
    #[default]
    Simple,
    /// A single-day materialization of a recurring template.
    Occurrence,
    /// A task bound to a time of day.
    Appointment,
}

impl TaskKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Occurrence => "occurrence",
            Self::Appointment => "appointment",
        }
    }
}

impl TryFrom<&str> for TaskKind {
    type Error = ParseTaskKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simple" | "task" => Ok(Self::Simple),
            "occurrence" => Ok(Self::Occurrence),
            "appointment" => Ok(Self::Appointment),
            _ => Err(ParseTaskKindError(value.to_owned())),
        }
    }
}

/// A unit of work owned by a block and placed in a workflow column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    priority: Priority,
    column: ColumnId,
    block_id: BlockId,
    kind: TaskKind,
    created_at: DateTime<Utc>,
    start_date: NaiveDate,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    recurring_days: Option<RecurringDays>,
    #[serde(default)]
    recurring_time: Option<NaiveTime>,
    #[serde(default)]
    appointment_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    template_id: Option<RecurringTaskId>,
}

/// Caller-supplied fields for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: String,
    priority: Priority,
    column: Option<ColumnId>,
    kind: TaskKind,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    recurring_days: Option<RecurringDays>,
    recurring_time: Option<NaiveTime>,
    appointment_time: Option<NaiveTime>,
}

impl NewTask {
    /// Creates a simple medium-priority task draft with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            column: None,
            kind: TaskKind::Simple,
            start_date: None,
            due_date: None,
            recurring_days: None,
            recurring_time: None,
            appointment_time: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Places the task in a specific column instead of the entry stage.
    #[must_use]
    pub fn in_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Sets the task kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the start date; defaults to the creation day.
    #[must_use]
    pub const fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Sets informational recurrence weekdays.
    #[must_use]
    pub fn with_recurring_days(mut self, days: RecurringDays) -> Self {
        self.recurring_days = Some(days);
        self
    }

    /// Sets the informational recurrence time.
    #[must_use]
    pub const fn with_recurring_time(mut self, time: NaiveTime) -> Self {
        self.recurring_time = Some(time);
        self
    }

    /// Sets the appointment time.
    #[must_use]
    pub const fn with_appointment_time(mut self, time: NaiveTime) -> Self {
        self.appointment_time = Some(time);
        self
    }

    /// Returns the requested column, if any.
    #[must_use]
    pub const fn column(&self) -> Option<&ColumnId> {
        self.column.as_ref()
    }
}

impl Task {
    /// Creates a task owned by `block_id` in `column`.
    ///
    /// The start date defaults to the clock's current UTC day.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] for blank titles and
    /// [`BoardDomainError::InvertedDateRange`] when the due date precedes
    /// the start date.
    pub fn new(
        block_id: BlockId,
        column: ColumnId,
        draft: NewTask,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let title = validated_title(&draft.title)?;
        let created_at = clock.utc();
        let start_date = draft.start_date.unwrap_or_else(|| created_at.date_naive());
        ensure_ordered(start_date, draft.due_date)?;

        Ok(Self {
            id: TaskId::new(),
            title,
            description: draft.description,
            priority: draft.priority,
            column,
            block_id,
            kind: draft.kind,
            created_at,
            start_date,
            due_date: draft.due_date,
            recurring_days: draft.recurring_days,
            recurring_time: draft.recurring_time,
            appointment_time: draft.appointment_time,
            template_id: None,
        })
    }

    /// Builds the occurrence of a template on a single day.
    pub(crate) fn occurrence(
        template: &super::RecurringTask,
        date: NaiveDate,
        entry: ColumnId,
    ) -> Self {
        Self {
            id: TaskId::for_occurrence(template.id(), date),
            title: template.title().to_owned(),
            description: template.description().to_owned(),
            priority: template.priority(),
            column: entry,
            block_id: template.block_id(),
            kind: TaskKind::Occurrence,
            created_at: template.created_at(),
            start_date: date,
            due_date: Some(date),
            recurring_days: Some(template.recurring_days().clone()),
            recurring_time: template.recurring_time(),
            appointment_time: None,
            template_id: Some(template.id()),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the column tag.
    #[must_use]
    pub const fn column(&self) -> &ColumnId {
        &self.column
    }

    /// Returns the owning block.
    #[must_use]
    pub const fn block_id(&self) -> BlockId {
        self.block_id
    }

    /// Returns the task kind.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Returns the immutable creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the informational recurrence weekdays, if any.
    #[must_use]
    pub const fn recurring_days(&self) -> Option<&RecurringDays> {
        self.recurring_days.as_ref()
    }

    /// Returns the informational recurrence time, if any.
    #[must_use]
    pub const fn recurring_time(&self) -> Option<NaiveTime> {
        self.recurring_time
    }

    /// Returns the appointment time, if any.
    #[must_use]
    pub const fn appointment_time(&self) -> Option<NaiveTime> {
        self.appointment_time
    }

    /// Returns the source template of an occurrence.
    #[must_use]
    pub const fn template_id(&self) -> Option<RecurringTaskId> {
        self.template_id
    }

    /// Returns `true` when `needle` occurs in the title or description,
    /// ignoring case. A blank needle matches every task.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let lowered = needle.trim().to_lowercase();
        lowered.is_empty()
            || self.title.to_lowercase().contains(&lowered)
            || self.description.to_lowercase().contains(&lowered)
    }

    /// Applies an edit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the patch sets a blank
    /// title; nothing is applied in that case.
    pub fn apply(&mut self, patch: TaskPatch) -> Result<(), BoardDomainError> {
        if let Some(title) = patch.title.as_deref().map(validated_title).transpose()? {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(start) = patch.start_date {
            (self.start_date, self.due_date) = snap_start(start, self.due_date);
        }
        if patch.clear_due_date {
            self.due_date = None;
        } else if let Some(due) = patch.due_date {
            (self.start_date, self.due_date) = snap_due(self.start_date, due);
        }
        if let Some(days) = patch.recurring_days {
            self.recurring_days = Some(days);
        }
        if let Some(time) = patch.recurring_time {
            self.recurring_time = Some(time);
        }
        if let Some(time) = patch.appointment_time {
            self.appointment_time = Some(time);
        }
        Ok(())
    }

    pub(crate) fn set_column(&mut self, column: ColumnId) {
        self.column = column;
    }

    pub(crate) const fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub(crate) const fn set_block(&mut self, block_id: BlockId) {
        self.block_id = block_id;
    }
}

/// Partial edit of a task. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    kind: Option<TaskKind>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    clear_due_date: bool,
    recurring_days: Option<RecurringDays>,
    recurring_time: Option<NaiveTime>,
    appointment_time: Option<NaiveTime>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the kind.
    #[must_use]
    pub const fn kind(mut self, kind: TaskKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Moves the start date; a later-than-due start drags the due date along.
    #[must_use]
    pub const fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Moves the due date; an earlier-than-start due drags the start along.
    #[must_use]
    pub const fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self.clear_due_date = false;
        self
    }

    /// Removes the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = None;
        self.clear_due_date = true;
        self
    }

    /// Replaces the informational recurrence weekdays.
    #[must_use]
    pub fn recurring_days(mut self, days: RecurringDays) -> Self {
        self.recurring_days = Some(days);
        self
    }

    /// Replaces the informational recurrence time.
    #[must_use]
    pub const fn recurring_time(mut self, time: NaiveTime) -> Self {
        self.recurring_time = Some(time);
        self
    }

    /// Replaces the appointment time.
    #[must_use]
    pub const fn appointment_time(mut self, time: NaiveTime) -> Self {
        self.appointment_time = Some(time);
        self
    }
}

pub(crate) fn validated_title(raw: &str) -> Result<String, BoardDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn ensure_ordered(
    start: NaiveDate,
    due: Option<NaiveDate>,
) -> Result<(), BoardDomainError> {
    match due {
        Some(inverted) if inverted < start => Err(BoardDomainError::InvertedDateRange {
            start,
            due: inverted,
        }),
        _ => Ok(()),
    }
}

/// Applies an edited start date, snapping the due date onto it if inverted.
pub(crate) fn snap_start(
    start: NaiveDate,
    due: Option<NaiveDate>,
) -> (NaiveDate, Option<NaiveDate>) {
    match due {
        Some(current) if current < start => (start, Some(start)),
        _ => (start, due),
    }
}

/// Applies an edited due date, snapping the start date onto it if inverted.
pub(crate) fn snap_due(start: NaiveDate, due: NaiveDate) -> (NaiveDate, Option<NaiveDate>) {
    if due < start {
        (due, Some(due))
    } else {
        (start, Some(due))
    }
}
