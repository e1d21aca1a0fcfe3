//! Recurring task templates.

use super::task::{ensure_ordered, snap_due, snap_start, validated_title};
use super::{BlockId, BoardDomainError, Priority, RecurringDays, RecurringTaskId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Template that materializes one task per matching weekday.
///
/// Templates are never placed in columns themselves; the recurrence
/// expander derives dated occurrences from them on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTask {
    id: RecurringTaskId,
    title: String,
    description: String,
    priority: Priority,
    block_id: BlockId,
    created_at: DateTime<Utc>,
    start_date: NaiveDate,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    recurring_days: RecurringDays,
    #[serde(default)]
    recurring_time: Option<NaiveTime>,
}

/// Caller-supplied fields for a new recurring template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecurringTask {
    title: String,
    description: String,
    priority: Priority,
    recurring_days: RecurringDays,
    recurring_time: Option<NaiveTime>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    pin_to_schedule: bool,
}

impl NewRecurringTask {
    /// Creates a template draft recurring on `days`.
    #[must_use]
    pub fn new(title: impl Into<String>, days: RecurringDays) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            recurring_days: days,
            recurring_time: None,
            start_date: None,
            due_date: None,
            pin_to_schedule: false,
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

    /// Sets the time of day occurrences happen at.
    #[must_use]
    pub const fn at(mut self, time: NaiveTime) -> Self {
        self.recurring_time = Some(time);
        self
    }

    /// Sets the first day of the recurrence; defaults to the creation day.
    #[must_use]
    pub const fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the last day of the recurrence; without it the recurrence is
    /// unbounded.
    #[must_use]
    pub const fn until(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Adds the template to its block's weekly schedule on creation.
    #[must_use]
    pub const fn pinned_to_schedule(mut self) -> Self {
        self.pin_to_schedule = true;
        self
    }

    /// Returns `true` when the template should be pinned to the schedule.
    #[must_use]
    pub const fn pin_to_schedule(&self) -> bool {
        self.pin_to_schedule
    }
}

impl RecurringTask {
    /// Creates a template owned by `block_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] for blank titles,
    /// [`BoardDomainError::EmptyRecurringDays`] when no weekday is selected,
    /// and [`BoardDomainError::InvertedDateRange`] when the end precedes the
    /// start.
    pub fn new(
        block_id: BlockId,
        draft: NewRecurringTask,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let title = validated_title(&draft.title)?;
        if draft.recurring_days.is_empty() {
            return Err(BoardDomainError::EmptyRecurringDays);
        }
        let created_at = clock.utc();
        let start_date = draft.start_date.unwrap_or_else(|| created_at.date_naive());
        ensure_ordered(start_date, draft.due_date)?;

        Ok(Self {
            id: RecurringTaskId::new(),
            title,
            description: draft.description,
            priority: draft.priority,
            block_id,
            created_at,
            start_date,
            due_date: draft.due_date,
            recurring_days: draft.recurring_days,
            recurring_time: draft.recurring_time,
        })
    }

    /// Returns the template identifier.
    #[must_use]
    pub const fn id(&self) -> RecurringTaskId {
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

    /// Returns the owning block.
    #[must_use]
    pub const fn block_id(&self) -> BlockId {
        self.block_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the first day of the recurrence.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last day of the recurrence, if bounded.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the weekdays the template recurs on.
    #[must_use]
    pub const fn recurring_days(&self) -> &RecurringDays {
        &self.recurring_days
    }

    /// Returns the time of day, if any.
    #[must_use]
    pub const fn recurring_time(&self) -> Option<NaiveTime> {
        self.recurring_time
    }

    /// Label used for schedule entries pinned from this template.
    #[must_use]
    pub fn schedule_label(&self) -> String {
        match self.recurring_time {
            Some(time) => format!("{} {}", time.format("%H:%M"), self.title),
            None => self.title.clone(),
        }
    }

    /// Applies an edit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] or
    /// [`BoardDomainError::EmptyRecurringDays`] when the patch would break a
    /// template invariant; nothing is applied in that case.
    pub fn apply(&mut self, patch: RecurringTaskPatch) -> Result<(), BoardDomainError> {
        let validated = patch.title.as_deref().map(validated_title).transpose()?;
        if patch.recurring_days.as_ref().is_some_and(RecurringDays::is_empty) {
            return Err(BoardDomainError::EmptyRecurringDays);
        }
        if let Some(title) = validated {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(days) = patch.recurring_days {
            self.recurring_days = days;
        }
        if let Some(time) = patch.recurring_time {
            self.recurring_time = Some(time);
        }
        if let Some(start) = patch.start_date {
            (self.start_date, self.due_date) = snap_start(start, self.due_date);
        }
        if patch.clear_due_date {
            self.due_date = None;
        } else if let Some(due) = patch.due_date {
            (self.start_date, self.due_date) = snap_due(self.start_date, due);
        }
        Ok(())
    }
}

/// Partial edit of a recurring template. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurringTaskPatch {
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    recurring_days: Option<RecurringDays>,
    recurring_time: Option<NaiveTime>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    clear_due_date: bool,
}

impl RecurringTaskPatch {
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

    /// Replaces the weekdays.
    #[must_use]
    pub fn recurring_days(mut self, days: RecurringDays) -> Self {
        self.recurring_days = Some(days);
        self
    }

    /// Replaces the time of day.
    #[must_use]
    pub const fn recurring_time(mut self, time: NaiveTime) -> Self {
        self.recurring_time = Some(time);
        self
    }

    /// Moves the first day of the recurrence.
    #[must_use]
    pub const fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Moves the last day of the recurrence.
    #[must_use]
    pub const fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self.clear_due_date = false;
        self
    }

    /// Makes the recurrence unbounded.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = None;
        self.clear_due_date = true;
        self
    }

    /// Returns `true` when the patch touches anything pinned schedule
    /// entries are derived from: title, time, or weekdays.
    #[must_use]
    pub const fn relabels(&self) -> bool {
        self.title.is_some() || self.recurring_time.is_some() || self.recurring_days.is_some()
    }
}
