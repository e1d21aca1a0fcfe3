//! Movement engine: column changes, in-column reordering, and block
//! transfers for tasks inside a block's ordered collection.
//!
//! Whenever a task enters or leaves the terminal stage the block's
//! collection is stably partitioned so terminal-stage tasks form a prefix ordered by
//! descending creation time; the remaining tasks keep their relative order.

use super::{Block, BoardDomainError, ColumnId, DropPosition, Task, TaskId};

/// Moves a task to `target`, optionally re-prioritizing it by drop zone.
///
/// Without a position the priority is preserved, so moving a task into its
/// current column without a position leaves it unchanged. Entering or
/// leaving the terminal stage re-partitions the block.
///
/// # Errors
///
/// Returns [`BoardDomainError::TaskNotFound`] when the block does not own
/// the task.
pub fn move_to_column(
    block: &mut Block,
    task_id: TaskId,
    target: &ColumnId,
    position: Option<DropPosition>,
    terminal: &ColumnId,
) -> Result<(), BoardDomainError> {
    let task = block
        .tasks_mut()
        .iter_mut()
        .find(|task| task.id() == task_id)
        .ok_or(BoardDomainError::TaskNotFound(task_id))?;
    let left_terminal = task.column() == terminal;
    task.set_column(target.clone());
    if let Some(zone) = position {
        task.set_priority(zone.priority());
    }
    if left_terminal || target == terminal {
        promote_terminal(block.tasks_mut(), terminal);
    }
    Ok(())
}

/// Moves a task to `target` and inserts it before the `target_index`-th task
/// already in that column.
///
/// An index past the end of the column places the task after the column's
/// last task. Priority is untouched. Inserting into the terminal stage
/// re-applies the terminal prefix ordering, which takes precedence over the
/// requested index.
///
/// # Errors
///
/// Returns [`BoardDomainError::TaskNotFound`] when the block does not own
/// the task.
pub fn reorder_within_column(
    block: &mut Block,
    task_id: TaskId,
    target: &ColumnId,
    target_index: usize,
    terminal: &ColumnId,
) -> Result<(), BoardDomainError> {
    let tasks = block.tasks_mut();
    let current = tasks
        .iter()
        .position(|task| task.id() == task_id)
        .ok_or(BoardDomainError::TaskNotFound(task_id))?;
    let mut task = tasks.remove(current);
    let left_terminal = task.column() == terminal;
    task.set_column(target.clone());

    let slots: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, candidate)| candidate.column() == target)
        .map(|(index, _)| index)
        .collect();
    let insert_at = match (slots.get(target_index), slots.last()) {
        (Some(slot), _) => *slot,
        (None, Some(last)) => last + 1,
        (None, None) => tasks.len(),
    };
    tasks.insert(insert_at, task);

    if left_terminal || target == terminal {
        promote_terminal(tasks, terminal);
    }
    Ok(())
}

/// Places a task arriving from another block.
///
/// Terminal-stage tasks go to the front of the collection, all others to the
/// back. An arriving terminal-stage task then takes its creation-time slot
/// within the terminal prefix.
pub fn admit(block: &mut Block, task: Task, terminal: &ColumnId) {
    let tasks = block.tasks_mut();
    if task.column() == terminal {
        tasks.insert(0, task);
        promote_terminal(tasks, terminal);
    } else {
        tasks.push(task);
    }
}

/// Stably partitions `tasks` so terminal-stage tasks come first, newest
/// first, followed by every other task in its existing relative order.
pub fn promote_terminal(tasks: &mut Vec<Task>, terminal: &ColumnId) {
    let (mut done, rest): (Vec<Task>, Vec<Task>) = std::mem::take(tasks)
        .into_iter()
        .partition(|task| task.column() == terminal);
    done.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
    done.extend(rest);
    *tasks = done;
}

/// Returns `true` when terminal-stage tasks form a prefix of `tasks` ordered
/// by descending creation time.
#[must_use]
pub fn has_terminal_prefix(tasks: &[Task], terminal: &ColumnId) -> bool {
    let prefix_len = tasks
        .iter()
        .take_while(|task| task.column() == terminal)
        .count();
    let (prefix, rest) = tasks.split_at(prefix_len);
    let ordered = prefix
        .windows(2)
        .all(|pair| matches!(pair, [newer, older] if newer.created_at() >= older.created_at()));
    ordered && rest.iter().all(|task| task.column() != terminal)
}
