//! Board aggregate root: columns, blocks with their tasks, and recurring
//! templates.
//!
//! All mutations are synchronous and take effect immediately. Invalid input
//! and unresolved identifiers never raise: the mutation is skipped, logged
//! at `debug`, and reported through an `Option`/`bool` return value.

use super::movement::{self, promote_terminal};
use super::ordering::{self, TaskQuery, by_priority_then_created};
use super::recurrence::{expand_for_date, expand_for_month};
use super::{
    Block, BlockId, BoardConfig, BoardDomainError, BoardSnapshot, ColumnId, ColumnRegistry,
    DayOfWeek, DropPosition, NewRecurringTask, NewTask, RecurringTask, RecurringTaskId,
    RecurringTaskPatch, SNAPSHOT_VERSION, Task, TaskId, TaskPatch,
};
use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, info, warn};

/// Logs a rejected mutation and converts it into a no-op.
fn absorb<T>(operation: &'static str, result: Result<T, BoardDomainError>) -> Option<T> {
    result
        .inspect_err(|err| debug!(operation, error = %err, "board mutation ignored"))
        .ok()
}

/// In-memory board state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    config: BoardConfig,
    columns: ColumnRegistry,
    blocks: Vec<Block>,
    recurring: Vec<RecurringTask>,
}

impl Board {
    /// Creates a board with the configured columns and the catch-all block.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        let mut board = Self {
            columns: ColumnRegistry::from_config(&config),
            config,
            blocks: Vec::new(),
            recurring: Vec::new(),
        };
        board.ensure_default_block();
        board
    }

    /// Rebuilds a board from a persisted snapshot.
    ///
    /// An inconsistent or missing column registry is replaced by the
    /// configured default, and tasks tagged with unknown columns are moved
    /// to the entry stage.
    #[must_use]
    pub fn from_snapshot(snapshot: BoardSnapshot, config: BoardConfig) -> Self {
        let columns = match snapshot.columns {
            Some(registry) if registry.is_consistent() => registry,
            Some(_) => {
                warn!("stored column registry is inconsistent; using defaults");
                ColumnRegistry::from_config(&config)
            }
            None => ColumnRegistry::from_config(&config),
        };
        let mut blocks = snapshot.blocks;
        for block in &mut blocks {
            let block_id = block.id();
            for task in block.tasks_mut() {
                if !columns.contains(task.column()) {
                    warn!(task = %task.id(), column = %task.column(), "repairing orphaned task");
                    task.set_column(columns.entry().clone());
                }
                task.set_block(block_id);
            }
        }
        Self {
            config,
            columns,
            blocks,
            recurring: snapshot.recurring_tasks,
        }
    }

    /// Captures the persistable state.
    #[must_use]
    pub fn to_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            version: SNAPSHOT_VERSION,
            columns: Some(self.columns.clone()),
            blocks: self.blocks.clone(),
            recurring_tasks: self.recurring.clone(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    // ── Columns ─────────────────────────────────────────────────────

    /// Returns the column registry.
    #[must_use]
    pub const fn columns(&self) -> &ColumnRegistry {
        &self.columns
    }

    /// Returns the display name of a column.
    #[must_use]
    pub fn column_name(&self, id: &ColumnId) -> Option<&str> {
        self.columns.get(id).map(super::Column::name)
    }

    /// Appends a column. Blank and duplicate names are ignored.
    pub fn add_column(&mut self, name: &str) -> Option<ColumnId> {
        let id = absorb("add_column", self.columns.add(name))?;
        info!(column = %id, "column added");
        Some(id)
    }

    /// Renames a column.
    ///
    /// Tasks reference the stable column identifier, so every task in the
    /// column resolves to the new name immediately.
    pub fn rename_column(&mut self, id: &ColumnId, new_name: &str) -> bool {
        absorb("rename_column", self.columns.rename(id, new_name)).is_some()
    }

    /// Replaces the column ordering with a permutation of the existing ids.
    pub fn reorder_columns(&mut self, sequence: Vec<ColumnId>) -> bool {
        absorb("reorder_columns", self.columns.reorder(sequence)).is_some()
    }

    /// Removes a non-fixed column along with every task tagged with it.
    pub fn remove_column(&mut self, id: &ColumnId) -> bool {
        if absorb("remove_column", self.columns.remove(id)).is_none() {
            return false;
        }
        let mut removed = 0;
        for block in &mut self.blocks {
            removed += purge_column(block, id);
            block.forget_column(id);
        }
        info!(column = %id, removed, "column removed");
        true
    }

    // ── Blocks ──────────────────────────────────────────────────────

    /// Returns all blocks.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Looks up a block.
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id() == id)
    }

    /// Looks up a block by name, ignoring case.
    #[must_use]
    pub fn block_by_name(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.has_name(name))
    }

    /// Returns the catch-all block, creating it if it was deleted.
    pub fn ensure_default_block(&mut self) -> BlockId {
        if let Some(block) = self.block_by_name(&self.config.default_block_name) {
            return block.id();
        }
        let block = Block::catch_all(
            &self.config.default_block_name,
            &self.config.default_block_color,
        );
        let id = block.id();
        self.blocks.push(block);
        debug!(block = %id, "catch-all block created");
        id
    }

    /// Creates a block. Blank names and case-insensitive duplicates are
    /// ignored.
    pub fn create_block(&mut self, name: &str, color: impl Into<String>) -> Option<BlockId> {
        let result = self
            .ensure_unique_block_name(name, None)
            .and_then(|()| Block::new(name, color));
        let block = absorb("create_block", result)?;
        let id = block.id();
        info!(block = %id, name = block.name(), "block created");
        self.blocks.push(block);
        Some(id)
    }

    /// Renames a block, enforcing case-insensitive uniqueness.
    pub fn rename_block(&mut self, id: BlockId, name: &str) -> bool {
        let result = self
            .ensure_unique_block_name(name, Some(id))
            .and_then(|()| self.block_mut(id))
            .and_then(|block| block.rename(name));
        absorb("rename_block", result).is_some()
    }

    /// Changes a block's colour.
    pub fn set_block_color(&mut self, id: BlockId, color: impl Into<String>) -> bool {
        let result = self.block_mut(id).map(|block| block.set_color(color));
        absorb("set_block_color", result).is_some()
    }

    /// Deletes a block with all its tasks and recurring templates.
    pub fn delete_block(&mut self, id: BlockId) -> bool {
        let Some(position) = self.blocks.iter().position(|block| block.id() == id) else {
            debug!(block = %id, "delete_block ignored: unknown block");
            return false;
        };
        let block = self.blocks.remove(position);
        self.recurring.retain(|template| template.block_id() != id);
        info!(block = %id, tasks = block.tasks().len(), "block deleted");
        true
    }

    /// Sets whether a column is expanded in a block's view.
    pub fn set_column_expanded(
        &mut self,
        block_id: BlockId,
        column: &ColumnId,
        expanded: bool,
    ) -> bool {
        let result = self.ensure_column(column).and_then(|()| self.block_mut(block_id));
        let Some(block) = absorb("set_column_expanded", result) else {
            return false;
        };
        block.set_expanded(column.clone(), expanded);
        true
    }

    /// Flips a column's expansion state and returns the new state.
    pub fn toggle_column_expanded(
        &mut self,
        block_id: BlockId,
        column: &ColumnId,
    ) -> Option<bool> {
        let expanded = !self.block(block_id)?.is_expanded(column);
        self.set_column_expanded(block_id, column, expanded)
            .then_some(expanded)
    }

    /// Adds a label to a block's weekly schedule. Duplicate labels for the
    /// same weekday are ignored.
    pub fn add_schedule_label(
        &mut self,
        block_id: BlockId,
        day: DayOfWeek,
        label: &str,
    ) -> bool {
        let result = self
            .block_mut(block_id)
            .and_then(|block| block.add_schedule_label(day, label, None));
        absorb("add_schedule_label", result).is_some()
    }

    /// Removes a label from a block's weekly schedule.
    pub fn remove_schedule_label(
        &mut self,
        block_id: BlockId,
        day: DayOfWeek,
        label: &str,
    ) -> bool {
        self.block_mut(block_id)
            .is_ok_and(|block| block.remove_schedule_label(day, label))
    }

    // ── Tasks ───────────────────────────────────────────────────────

    /// Looks up a stored task.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.blocks
            .iter()
            .flat_map(Block::tasks)
            .find(|task| task.id() == id)
    }

    /// Adds a task to a block, in the requested column or the entry stage.
    pub fn add_task(
        &mut self,
        block_id: BlockId,
        draft: NewTask,
        clock: &impl Clock,
    ) -> Option<TaskId> {
        let task = absorb("add_task", self.build_task(block_id, draft, clock))?;
        let id = task.id();
        let terminal = self.columns.terminal().clone();
        let entered_terminal = self.columns.is_terminal(task.column());
        let block = absorb("add_task", self.block_mut(block_id))?;
        block.tasks_mut().push(task);
        if entered_terminal {
            promote_terminal(block.tasks_mut(), &terminal);
        }
        debug!(task = %id, block = %block_id, "task added");
        Some(id)
    }

    /// Edits a task. A blank title rejects the whole edit.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> bool {
        let result = self.task_mut(id).and_then(|task| task.apply(patch));
        absorb("update_task", result).is_some()
    }

    /// Deletes a task.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        for block in &mut self.blocks {
            let tasks = block.tasks_mut();
            if let Some(position) = tasks.iter().position(|task| task.id() == id) {
                tasks.remove(position);
                return true;
            }
        }
        debug!(task = %id, "delete_task ignored: unknown task");
        false
    }

    /// Deletes the tasks of one block that sit in `column`, returning how
    /// many were removed.
    pub fn delete_column_scoped(&mut self, block_id: BlockId, column: &ColumnId) -> usize {
        let Some(block) = absorb("delete_column_scoped", self.block_mut(block_id)) else {
            return 0;
        };
        let removed = purge_column(block, column);
        info!(block = %block_id, column = %column, removed, "column cleared");
        removed
    }

    /// Moves a task to an active column, optionally setting its priority by
    /// drop zone. Entering the terminal stage re-establishes the block's
    /// done-at-top ordering.
    pub fn move_to_column(
        &mut self,
        task_id: TaskId,
        target: &ColumnId,
        position: Option<DropPosition>,
    ) -> bool {
        let terminal = self.columns.terminal().clone();
        let result = self
            .ensure_column(target)
            .and_then(|()| self.owning_block_mut(task_id))
            .and_then(|block| {
                movement::move_to_column(block, task_id, target, position, &terminal)
            });
        absorb("move_to_column", result).is_some()
    }

    /// Moves a task to the terminal stage.
    pub fn mark_done(&mut self, task_id: TaskId) -> bool {
        let terminal = self.columns.terminal().clone();
        self.move_to_column(task_id, &terminal, None)
    }

    /// Moves a task into `target` before the `target_index`-th task already
    /// there.
    pub fn reorder_within_column(
        &mut self,
        task_id: TaskId,
        target: &ColumnId,
        target_index: usize,
    ) -> bool {
        let terminal = self.columns.terminal().clone();
        let result = self
            .ensure_column(target)
            .and_then(|()| self.owning_block_mut(task_id))
            .and_then(|block| {
                movement::reorder_within_column(block, task_id, target, target_index, &terminal)
            });
        absorb("reorder_within_column", result).is_some()
    }

    /// Transfers a task to another block.
    pub fn move_across_blocks(&mut self, task_id: TaskId, target_block: BlockId) -> bool {
        let result = self.try_move_across_blocks(task_id, target_block);
        absorb("move_across_blocks", result).is_some()
    }

    fn try_move_across_blocks(
        &mut self,
        task_id: TaskId,
        target_block: BlockId,
    ) -> Result<(), BoardDomainError> {
        let source = self
            .task(task_id)
            .map(Task::block_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        if source == target_block {
            return Err(BoardDomainError::SameTarget);
        }
        if self.block(target_block).is_none() {
            return Err(BoardDomainError::BlockNotFound(target_block));
        }
        let source_tasks = self.block_mut(source)?.tasks_mut();
        let position = source_tasks
            .iter()
            .position(|task| task.id() == task_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        let mut task = source_tasks.remove(position);
        task.set_block(target_block);
        let terminal = self.columns.terminal().clone();
        movement::admit(self.block_mut(target_block)?, task, &terminal);
        Ok(())
    }

    /// Lists a block's tasks: filtered by `query`, terminal-stage tasks
    /// first, then by descending priority and ascending creation time.
    #[must_use]
    pub fn list_tasks(&self, block_id: BlockId, query: &TaskQuery) -> Vec<&Task> {
        self.block(block_id).map_or_else(Vec::new, |block| {
            ordering::list(block.tasks(), query, self.columns.terminal())
        })
    }

    /// Lists tasks across every block with the same ordering rules.
    #[must_use]
    pub fn search(&self, query: &TaskQuery) -> Vec<&Task> {
        ordering::list(
            self.blocks.iter().flat_map(Block::tasks),
            query,
            self.columns.terminal(),
        )
    }

    // ── Recurring templates ─────────────────────────────────────────

    /// Returns all recurring templates.
    #[must_use]
    pub fn recurring_tasks(&self) -> &[RecurringTask] {
        &self.recurring
    }

    /// Looks up a recurring template.
    #[must_use]
    pub fn recurring_task(&self, id: RecurringTaskId) -> Option<&RecurringTask> {
        self.recurring.iter().find(|template| template.id() == id)
    }

    /// Creates a recurring template, optionally pinning it to the block's
    /// weekly schedule.
    pub fn add_recurring_task(
        &mut self,
        block_id: BlockId,
        draft: NewRecurringTask,
        clock: &impl Clock,
    ) -> Option<RecurringTaskId> {
        let pin = draft.pin_to_schedule();
        let result = self
            .block(block_id)
            .ok_or(BoardDomainError::BlockNotFound(block_id))
            .and_then(|_| RecurringTask::new(block_id, draft, clock));
        let template = absorb("add_recurring_task", result)?;
        let id = template.id();
        if pin {
            self.pin_template(&template);
        }
        self.recurring.push(template);
        debug!(template = %id, block = %block_id, "recurring task added");
        Some(id)
    }

    /// Edits a recurring template. Pinned schedule entries follow title,
    /// time, and weekday changes.
    pub fn update_recurring_task(
        &mut self,
        id: RecurringTaskId,
        patch: RecurringTaskPatch,
    ) -> bool {
        let Some(template) = self.recurring.iter_mut().find(|template| template.id() == id) else {
            debug!(template = %id, "update_recurring_task ignored: unknown template");
            return false;
        };
        let relabel = patch.relabels();
        if absorb("update_recurring_task", template.apply(patch)).is_none() {
            return false;
        }
        if !relabel {
            return true;
        }
        let updated = template.clone();
        let pinned = self
            .block_mut(updated.block_id())
            .map(|block| block.purge_template(id))
            .unwrap_or_default();
        if pinned > 0 {
            self.pin_template(&updated);
        }
        true
    }

    /// Deletes a recurring template and every schedule entry it pinned.
    ///
    /// Entries are matched by template identifier, so another template with
    /// the same title keeps its entries.
    pub fn delete_recurring_task(&mut self, id: RecurringTaskId) -> bool {
        let before = self.recurring.len();
        self.recurring.retain(|template| template.id() != id);
        if self.recurring.len() == before {
            debug!(template = %id, "delete_recurring_task ignored: unknown template");
            return false;
        }
        let purged: usize = self
            .blocks
            .iter_mut()
            .map(|block| block.purge_template(id))
            .sum();
        info!(template = %id, purged, "recurring task deleted");
        true
    }

    fn pin_template(&mut self, template: &RecurringTask) {
        let label = template.schedule_label();
        let Ok(block) = self.block_mut(template.block_id()) else {
            return;
        };
        for day in template.recurring_days().iter() {
            if let Err(err) = block.add_schedule_label(day, &label, Some(template.id())) {
                debug!(template = %template.id(), %day, error = %err, "schedule pin skipped");
            }
        }
    }

    // ── Calendar reads ──────────────────────────────────────────────

    /// Materializes every template's occurrence on `date`.
    #[must_use]
    pub fn occurrences_on(&self, date: NaiveDate) -> Vec<Task> {
        let entry = self.columns.entry();
        self.recurring
            .iter()
            .filter_map(|template| expand_for_date(template, date, entry))
            .collect()
    }

    /// Materializes every template's occurrences in a calendar month,
    /// ordered by date.
    #[must_use]
    pub fn occurrences_in_month(&self, year: i32, month: u32) -> Vec<Task> {
        let entry = self.columns.entry();
        let mut occurrences: Vec<Task> = self
            .recurring
            .iter()
            .flat_map(|template| expand_for_month(template, year, month, entry))
            .collect();
        occurrences.sort_by(|left, right| {
            left.start_date()
                .cmp(&right.start_date())
                .then_with(|| by_priority_then_created(left, right))
        });
        occurrences
    }

    /// Returns everything scheduled on `date`: stored tasks due that day (or
    /// starting that day when undated) and template occurrences, ordered by
    /// time of day with untimed items last.
    #[must_use]
    pub fn agenda_for(&self, date: NaiveDate) -> Vec<Task> {
        let mut agenda: Vec<Task> = self
            .blocks
            .iter()
            .flat_map(Block::tasks)
            .filter(|task| task.due_date().unwrap_or_else(|| task.start_date()) == date)
            .cloned()
            .chain(self.occurrences_on(date))
            .collect();
        agenda.sort_by(|left, right| {
            let left_time = left.appointment_time().or_else(|| left.recurring_time());
            let right_time = right.appointment_time().or_else(|| right.recurring_time());
            match (left_time, right_time) {
                (Some(l), Some(r)) => l.cmp(&r),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
            .then_with(|| by_priority_then_created(left, right))
        });
        agenda
    }

    // ── Invariants ──────────────────────────────────────────────────

    /// Returns `true` when every stored task sits in an active column and
    /// every block keeps its terminal-stage tasks as a newest-first prefix.
    #[must_use]
    pub fn invariants_hold(&self) -> bool {
        let terminal = self.columns.terminal();
        self.blocks.iter().all(|block| {
            block
                .tasks()
                .iter()
                .all(|task| {
                    self.columns.contains(task.column()) && task.block_id() == block.id()
                })
                && movement::has_terminal_prefix(block.tasks(), terminal)
        })
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn build_task(
        &self,
        block_id: BlockId,
        draft: NewTask,
        clock: &impl Clock,
    ) -> Result<Task, BoardDomainError> {
        if self.block(block_id).is_none() {
            return Err(BoardDomainError::BlockNotFound(block_id));
        }
        let column = draft
            .column()
            .cloned()
            .unwrap_or_else(|| self.columns.entry().clone());
        self.ensure_column(&column)?;
        Task::new(block_id, column, draft, clock)
    }

    fn ensure_column(&self, column: &ColumnId) -> Result<(), BoardDomainError> {
        if self.columns.contains(column) {
            Ok(())
        } else {
            Err(BoardDomainError::UnknownColumn(column.clone()))
        }
    }

    fn ensure_unique_block_name(
        &self,
        name: &str,
        except: Option<BlockId>,
    ) -> Result<(), BoardDomainError> {
        let clash = self
            .blocks
            .iter()
            .any(|block| Some(block.id()) != except && block.has_name(name));
        if clash {
            return Err(BoardDomainError::DuplicateBlockName(name.trim().to_owned()));
        }
        Ok(())
    }

    fn block_mut(&mut self, id: BlockId) -> Result<&mut Block, BoardDomainError> {
        self.blocks
            .iter_mut()
            .find(|block| block.id() == id)
            .ok_or(BoardDomainError::BlockNotFound(id))
    }

    fn owning_block_mut(&mut self, task_id: TaskId) -> Result<&mut Block, BoardDomainError> {
        self.blocks
            .iter_mut()
            .find(|block| block.tasks().iter().any(|task| task.id() == task_id))
            .ok_or(BoardDomainError::TaskNotFound(task_id))
    }

    fn task_mut(&mut self, id: TaskId) -> Result<&mut Task, BoardDomainError> {
        self.blocks
            .iter_mut()
            .flat_map(Block::tasks_mut)
            .find(|task| task.id() == id)
            .ok_or(BoardDomainError::TaskNotFound(id))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

/// Removes a block's tasks tagged with `column`, returning the count.
fn purge_column(block: &mut Block, column: &ColumnId) -> usize {
    let tasks = block.tasks_mut();
    let before = tasks.len();
    tasks.retain(|task| task.column() != column);
    before - tasks.len()
}
