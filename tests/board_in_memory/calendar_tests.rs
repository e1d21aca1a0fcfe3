//! Integration tests for recurring templates and calendar reads.

use super::helpers::{SteppingClock, board, clock, date, general};
use blockboard::board::domain::{
    Board, DayOfWeek, NewRecurringTask, RecurringTaskPatch, TaskId, TaskKind,
};
use chrono::{Datelike, NaiveDate, Weekday};
use eyre::{OptionExt, ensure};
use rstest::rstest;

#[rstest]
fn occurrences_are_materialized_but_never_stored(
    mut board: Board,
    clock: SteppingClock,
) -> eyre::Result<()> {
    let block = general(&mut board);
    let template = board
        .add_recurring_task(
            block,
            NewRecurringTask::new("Standup", [DayOfWeek::Wednesday].into_iter().collect())
                .starting(date(2024, 8, 13))
                .until(date(2024, 9, 17)),
            &clock,
        )
        .ok_or_eyre("template added")?;

    let august = board.occurrences_in_month(2024, 8);
    let september = board.occurrences_in_month(2024, 9);
    let dates: Vec<NaiveDate> = august
        .iter()
        .chain(&september)
        .map(|task| task.start_date())
        .collect();

    ensure!(
        dates
            == [
                date(2024, 8, 14),
                date(2024, 8, 21),
                date(2024, 8, 28),
                date(2024, 9, 4),
                date(2024, 9, 11),
            ],
        "unexpected dates: {dates:?}"
    );
    ensure!(august.iter().all(|task| task.kind() == TaskKind::Occurrence));
    ensure!(august.iter().all(|task| task.template_id() == Some(template)));
    ensure!(
        august
            .iter()
            .all(|task| board.task(task.id()).is_none()),
        "occurrences must not be stored"
    );
    Ok(())
}

#[rstest]
fn open_ended_template_recurs_half_a_year_later(
    mut board: Board,
    clock: SteppingClock,
) -> eyre::Result<()> {
    let block = general(&mut board);
    board
        .add_recurring_task(
            block,
            NewRecurringTask::new("Yoga", [DayOfWeek::Tuesday].into_iter().collect())
                .starting(date(2024, 8, 6)),
            &clock,
        )
        .ok_or_eyre("template added")?;

    let february = board.occurrences_in_month(2025, 2);

    ensure!(february.len() == 4, "February 2025 has four Tuesdays");
    ensure!(
        february
            .iter()
            .all(|task| task.start_date().weekday() == Weekday::Tue)
    );
    Ok(())
}

#[rstest]
fn occurrence_ids_are_stable_across_reads(
    mut board: Board,
    clock: SteppingClock,
) -> eyre::Result<()> {
    let block = general(&mut board);
    board
        .add_recurring_task(
            block,
            NewRecurringTask::new("Journal", [DayOfWeek::Sunday].into_iter().collect())
                .starting(date(2024, 8, 1)),
            &clock,
        )
        .ok_or_eyre("template added")?;
    let sunday = date(2024, 8, 4);

    let first: Vec<TaskId> = board.occurrences_on(sunday).iter().map(|t| t.id()).collect();
    let second: Vec<TaskId> = board.agenda_for(sunday).iter().map(|t| t.id()).collect();

    ensure!(first.len() == 1);
    ensure!(first == second);
    Ok(())
}

#[rstest]
fn shortened_template_stops_recurring(
    mut board: Board,
    clock: SteppingClock,
) -> eyre::Result<()> {
    let block = general(&mut board);
    let id = board
        .add_recurring_task(
            block,
            NewRecurringTask::new("Course", [DayOfWeek::Thursday].into_iter().collect())
                .starting(date(2024, 8, 1)),
            &clock,
        )
        .ok_or_eyre("template added")?;

    ensure!(board.update_recurring_task(id, RecurringTaskPatch::new().due_date(date(2024, 8, 15))));

    ensure!(board.occurrences_in_month(2024, 8).len() == 3);
    ensure!(board.occurrences_in_month(2024, 9).is_empty());
    Ok(())
}
