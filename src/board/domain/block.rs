//! Blocks: named task groupings with per-column view state and a weekly
//! schedule.

use super::{BlockId, BoardDomainError, ColumnId, DayOfWeek, RecurringTaskId, Task};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const CATCH_ALL_FALLBACK: &str = "General";

/// A label in a block's weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    template_id: Option<RecurringTaskId>,
}

impl ScheduleEntry {
    /// Returns the display label, typically a time range.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the recurring template that pinned this entry, if any.
    #[must_use]
    pub const fn template_id(&self) -> Option<RecurringTaskId> {
        self.template_id
    }
}

/// Weekday to ordered labels. Labels are unique per weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(BTreeMap<DayOfWeek, Vec<ScheduleEntry>>);

impl WeeklySchedule {
    /// Returns the entries for `day` in insertion order.
    #[must_use]
    pub fn entries(&self, day: DayOfWeek) -> &[ScheduleEntry] {
        self.0.get(&day).map_or(&[], Vec::as_slice)
    }

    /// Returns the labels for `day` in insertion order.
    #[must_use]
    pub fn labels(&self, day: DayOfWeek) -> Vec<&str> {
        self.entries(day).iter().map(ScheduleEntry::label).collect()
    }

    /// Returns `true` when no weekday has entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    fn insert(
        &mut self,
        day: DayOfWeek,
        label: &str,
        template_id: Option<RecurringTaskId>,
    ) -> Result<(), BoardDomainError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyScheduleLabel);
        }
        let entries = self.0.entry(day).or_default();
        if entries.iter().any(|entry| entry.label == trimmed) {
            return Err(BoardDomainError::DuplicateScheduleLabel(trimmed.to_owned()));
        }
        entries.push(ScheduleEntry {
            label: trimmed.to_owned(),
            template_id,
        });
        Ok(())
    }

    fn remove(&mut self, day: DayOfWeek, label: &str) -> bool {
        let Some(entries) = self.0.get_mut(&day) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|entry| entry.label != label.trim());
        let removed = entries.len() != before;
        if entries.is_empty() {
            self.0.remove(&day);
        }
        removed
    }

    fn purge_template(&mut self, template_id: RecurringTaskId) -> usize {
        let mut removed = 0;
        for entries in self.0.values_mut() {
            let before = entries.len();
            entries.retain(|entry| entry.template_id != Some(template_id));
            removed += before - entries.len();
        }
        self.0.retain(|_, entries| !entries.is_empty());
        removed
    }
}

/// A named grouping of tasks ("project").
///
/// The block owns its tasks as an ordered collection; the order is the
/// storage order the movement engine maintains (terminal-stage tasks first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    name: String,
    color: String,
    #[serde(default)]
    expanded: BTreeMap<ColumnId, bool>,
    #[serde(default)]
    schedule: WeeklySchedule,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl Block {
    /// Creates an empty block.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyBlockName`] for blank names.
    pub fn new(name: &str, color: impl Into<String>) -> Result<Self, BoardDomainError> {
        Ok(Self {
            id: BlockId::new(),
            name: validated_block_name(name)?,
            color: color.into(),
            expanded: BTreeMap::new(),
            schedule: WeeklySchedule::default(),
            tasks: Vec::new(),
        })
    }

    /// Creates the catch-all block, falling back to a built-in name when the
    /// configured one is blank.
    pub(crate) fn catch_all(name: &str, color: &str) -> Self {
        let resolved = validated_block_name(name).unwrap_or_else(|_| CATCH_ALL_FALLBACK.to_owned());
        Self {
            id: BlockId::new(),
            name: resolved,
            color: color.to_owned(),
            expanded: BTreeMap::new(),
            schedule: WeeklySchedule::default(),
            tasks: Vec::new(),
        }
    }

    /// Returns the block identifier.
    #[must_use]
    pub const fn id(&self) -> BlockId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the colour.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns `true` when the name matches `other` ignoring case.
    #[must_use]
    pub fn has_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.trim().to_lowercase()
    }

    /// Returns the tasks in storage order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns whether `column` is expanded in this block. Columns default to
    /// expanded.
    #[must_use]
    pub fn is_expanded(&self, column: &ColumnId) -> bool {
        self.expanded.get(column).copied().unwrap_or(true)
    }

    /// Returns the weekly schedule.
    #[must_use]
    pub const fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    pub(crate) fn rename(&mut self, name: &str) -> Result<(), BoardDomainError> {
        self.name = validated_block_name(name)?;
        Ok(())
    }

    pub(crate) fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub(crate) fn set_expanded(&mut self, column: ColumnId, expanded: bool) {
        self.expanded.insert(column, expanded);
    }

    pub(crate) fn forget_column(&mut self, column: &ColumnId) {
        self.expanded.remove(column);
    }

    pub(crate) const fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }

    pub(crate) fn add_schedule_label(
        &mut self,
        day: DayOfWeek,
        label: &str,
        template_id: Option<RecurringTaskId>,
    ) -> Result<(), BoardDomainError> {
        self.schedule.insert(day, label, template_id)
    }

    pub(crate) fn remove_schedule_label(&mut self, day: DayOfWeek, label: &str) -> bool {
        self.schedule.remove(day, label)
    }

    pub(crate) fn purge_template(&mut self, template_id: RecurringTaskId) -> usize {
        self.schedule.purge_template(template_id)
    }
}

fn validated_block_name(raw: &str) -> Result<String, BoardDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyBlockName);
    }
    Ok(trimmed.to_owned())
}
