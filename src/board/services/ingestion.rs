//! Routes ingestion drafts onto a board.

use crate::board::{
    domain::{
        BlockId, Board, ColumnId, NewRecurringTask, NewTask, ParseDayOfWeekError,
        ParsePriorityError, ParseTaskKindError, Priority, RecurringDays, RecurringTaskId, TaskId,
        TaskKind, next_matching_day,
    },
    ports::{DraftTask, IngestionResponse},
};
use chrono::{NaiveDate, NaiveTime};
use mockable::Clock;
use thiserror::Error;
use tracing::debug;

const RECURRING_KIND: &str = "recurring";
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Why a single draft was not placed on the board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftRejection {
    /// The draft has no usable title.
    #[error("draft title must not be empty")]
    EmptyTitle,
    /// The priority label is not recognised.
    #[error(transparent)]
    Priority(#[from] ParsePriorityError),
    /// The kind label is not recognised.
    #[error(transparent)]
    Kind(#[from] ParseTaskKindError),
    /// A weekday tag is not recognised.
    #[error(transparent)]
    Weekday(#[from] ParseDayOfWeekError),
    /// A date field is not an ISO calendar date.
    #[error("unreadable date: {0}")]
    Date(String),
    /// A time field is not a time of day.
    #[error("unreadable time: {0}")]
    Time(String),
    /// A recurring draft carries no weekdays.
    #[error("recurring draft has no weekdays")]
    MissingRecurringDays,
    /// The board refused the draft, for example because its due date
    /// precedes its start date.
    #[error("board rejected the draft")]
    Rejected,
}

/// A draft that could not be routed, with its position in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedDraft {
    /// Index of the draft in the ingestion response.
    pub index: usize,
    /// Draft title as received.
    pub title: String,
    /// Rejection reason.
    pub reason: DraftRejection,
}

/// Outcome of routing one ingestion batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestionReport {
    /// Tasks created, in draft order.
    pub created_tasks: Vec<TaskId>,
    /// Recurring templates created, in draft order.
    pub created_templates: Vec<RecurringTaskId>,
    /// Drafts that were skipped.
    pub rejected: Vec<RejectedDraft>,
}

/// Places every draft of `response` on `board`.
///
/// Drafts are validated independently: a malformed entry is reported and
/// the rest of the batch still lands.
pub fn route_drafts(
    board: &mut Board,
    response: IngestionResponse,
    reference_date: NaiveDate,
    clock: &impl Clock,
) -> IngestionReport {
    let mut report = IngestionReport::default();
    let batch_block = response.suggested_block;
    for (index, draft) in response.tasks.into_iter().enumerate() {
        let title = draft.title.clone();
        let block_id = resolve_block(board, &draft, batch_block.as_deref());
        match route_draft(board, block_id, draft, reference_date, clock) {
            Ok(Routed::Task(id)) => report.created_tasks.push(id),
            Ok(Routed::Template(id)) => report.created_templates.push(id),
            Err(reason) => {
                debug!(index, %reason, "ingestion draft rejected");
                report.rejected.push(RejectedDraft {
                    index,
                    title,
                    reason,
                });
            }
        }
    }
    report
}

enum Routed {
    Task(TaskId),
    Template(RecurringTaskId),
}

fn resolve_block(board: &mut Board, draft: &DraftTask, batch_block: Option<&str>) -> BlockId {
    let suggested = [draft.suggested_block_name.as_deref(), batch_block]
        .into_iter()
        .flatten()
        .find_map(|name| board.block_by_name(name).map(|block| block.id()));
    suggested.unwrap_or_else(|| board.ensure_default_block())
}

fn route_draft(
    board: &mut Board,
    block_id: BlockId,
    draft: DraftTask,
    reference_date: NaiveDate,
    clock: &impl Clock,
) -> Result<Routed, DraftRejection> {
    if draft.title.trim().is_empty() {
        return Err(DraftRejection::EmptyTitle);
    }
    let priority = draft
        .priority
        .as_deref()
        .map(Priority::try_from)
        .transpose()?
        .unwrap_or_default();
    let days = draft
        .recurring_days
        .as_ref()
        .map(|tags| RecurringDays::parse(tags.iter().map(String::as_str)))
        .transpose()?;
    let kind_label = draft.kind.as_deref().map(str::trim).unwrap_or_default();
    let start_date = parse_date(draft.start_date.as_deref())?;
    let due_date = parse_date(draft.due_date.as_deref())?;
    let recurring_time = parse_time(draft.recurring_time.as_deref())?;
    let appointment_time = parse_time(draft.appointment_time.as_deref())?;

    if kind_label.eq_ignore_ascii_case(RECURRING_KIND) {
        let weekdays = days
            .filter(|selected| !selected.is_empty())
            .ok_or(DraftRejection::MissingRecurringDays)?;
        let mut template = NewRecurringTask::new(draft.title, weekdays)
            .with_description(draft.description)
            .with_priority(priority)
            .starting(start_date.unwrap_or(reference_date));
        if let Some(time) = recurring_time {
            template = template.at(time);
        }
        if let Some(due) = due_date {
            template = template.until(due);
        }
        return board
            .add_recurring_task(block_id, template, clock)
            .map(Routed::Template)
            .ok_or(DraftRejection::Rejected);
    }

    let kind = if kind_label.is_empty() {
        TaskKind::default()
    } else {
        TaskKind::try_from(kind_label)?
    };
    let mut task = NewTask::new(draft.title)
        .with_description(draft.description)
        .with_priority(priority)
        .with_kind(kind)
        .in_column(resolve_column(board, draft.initial_column.as_deref()));

    let (start, due) =
        resolve_dates(start_date, due_date, days.as_ref(), reference_date);
    task = task.starting(start);
    if let Some(day) = due {
        task = task.due(day);
    }
    if let Some(weekdays) = days {
        task = task.with_recurring_days(weekdays);
    }
    if let Some(time) = recurring_time {
        task = task.with_recurring_time(time);
    }
    if let Some(time) = appointment_time {
        task = task.with_appointment_time(time);
    }
    board
        .add_task(block_id, task, clock)
        .map(Routed::Task)
        .ok_or(DraftRejection::Rejected)
}

/// Parses an optional ISO date; blank values count as absent.
fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, DraftRejection> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| DraftRejection::Date(value.to_owned()))
        })
        .transpose()
}

/// Parses an optional time of day, with or without seconds.
fn parse_time(raw: Option<&str>) -> Result<Option<NaiveTime>, DraftRejection> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            TIME_FORMATS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
                .ok_or_else(|| DraftRejection::Time(value.to_owned()))
        })
        .transpose()
}

/// Picks concrete dates for a one-off draft.
///
/// A draft that names weekdays but no date lands on the next matching
/// weekday on or after the reference day. Otherwise the start date falls
/// back to the reference day, or to the due date when that is earlier.
fn resolve_dates(
    start: Option<NaiveDate>,
    due: Option<NaiveDate>,
    days: Option<&RecurringDays>,
    reference_date: NaiveDate,
) -> (NaiveDate, Option<NaiveDate>) {
    if start.is_none()
        && due.is_none()
        && let Some(day) = days.and_then(|selected| next_matching_day(reference_date, selected))
    {
        return (day, Some(day));
    }
    let resolved_start =
        start.unwrap_or_else(|| due.map_or(reference_date, |day| day.min(reference_date)));
    (resolved_start, due)
}

fn resolve_column(board: &Board, requested: Option<&str>) -> ColumnId {
    let columns = board.columns();
    requested
        .and_then(|name| columns.resolve(name))
        .map_or_else(
            || {
                if let Some(name) = requested {
                    debug!(column = name, "unknown draft column; using entry stage");
                }
                columns.entry().clone()
            },
            |column| column.id().clone(),
        )
}
