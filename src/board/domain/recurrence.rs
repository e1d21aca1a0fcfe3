//! Recurrence expansion: turning templates into dated occurrences.
//!
//! Every function here is pure. Occurrences are recomputed on each call and
//! carry identifiers derived from the template and date, so repeated
//! expansion of the same day yields identical tasks.

use super::{ColumnId, RecurringDays, RecurringTask, Task};
use chrono::{Days, NaiveDate};

/// Returns whether `template` produces an occurrence on `date`.
///
/// The checks run in order: the template must recur on at least one
/// weekday, the date's weekday must be selected, and the date must fall
/// within `[start_date, due_date]` when those bounds are set.
#[must_use]
pub fn occurs_on(template: &RecurringTask, date: NaiveDate) -> bool {
    let days = template.recurring_days();
    if days.is_empty() || !days.matches(date) {
        return false;
    }
    if date < template.start_date() {
        return false;
    }
    template.due_date().is_none_or(|due| date <= due)
}

/// Materializes the occurrence of `template` on `date`, if any.
///
/// The occurrence lands in the `entry` column with start and due dates set
/// to `date`.
///
/// # Examples
///
///     use blockboard::board::domain::{
///         expand_for_date, BlockId, ColumnId, DayOfWeek, NewRecurringTask, RecurringTask,
///     };
///     use chrono::NaiveDate;
///     use mockable::DefaultClock;
///
///     let start = NaiveDate::from_ymd_opt(2024, 8, 13).expect("valid date");
///     let draft = NewRecurringTask::new("Standup", [DayOfWeek::Wednesday].into_iter().collect())
///         .starting(start);
///     let template = RecurringTask::new(BlockId::new(), draft, &DefaultClock).expect("valid");
///     let entry = ColumnId::from_name("Backlog");
///
///     let wednesday = NaiveDate::from_ymd_opt(2024, 8, 14).expect("valid date");
///     assert!(expand_for_date(&template, wednesday, &entry).is_some());
///     assert!(expand_for_date(&template, start, &entry).is_none());
#[must_use]
pub fn expand_for_date(
    template: &RecurringTask,
    date: NaiveDate,
    entry: &ColumnId,
) -> Option<Task> {
    occurs_on(template, date).then(|| Task::occurrence(template, date, entry.clone()))
}

/// Materializes every occurrence between `from` and `to`, inclusive.
#[must_use]
pub fn expand_for_range(
    template: &RecurringTask,
    from: NaiveDate,
    to: NaiveDate,
    entry: &ColumnId,
) -> Vec<Task> {
    let lower = from.max(template.start_date());
    let upper = template.due_date().map_or(to, |due| to.min(due));
    if lower > upper {
        return Vec::new();
    }
    lower
        .iter_days()
        .take_while(|day| *day <= upper)
        .filter_map(|day| expand_for_date(template, day, entry))
        .collect()
}

/// Materializes every occurrence in the given calendar month.
///
/// Returns nothing for an invalid `year`/`month` pair.
#[must_use]
pub fn expand_for_month(
    template: &RecurringTask,
    year: i32,
    month: u32,
    entry: &ColumnId,
) -> Vec<Task> {
    month_bounds(year, month).map_or_else(Vec::new, |(first, last)| {
        expand_for_range(template, first, last, entry)
    })
}

/// Returns the first date on or after `reference` whose weekday is in
/// `days`.
#[must_use]
pub fn next_matching_day(reference: NaiveDate, days: &RecurringDays) -> Option<NaiveDate> {
    reference
        .iter_days()
        .take(7)
        .find(|day| days.matches(*day))
}

/// Returns the first and last day of a calendar month.
#[must_use]
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = first.checked_add_months(chrono::Months::new(1))?;
    let last = next_first.checked_sub_days(Days::new(1))?;
    Some((first, last))
}
