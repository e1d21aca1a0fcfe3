//! Integration tests for task flow across columns and blocks.

use super::helpers::{SteppingClock, board, clock, general};
use blockboard::board::domain::{
    Board, ColumnId, DropPosition, NewTask, Priority, TaskId, TaskQuery,
};
use eyre::{OptionExt, ensure};
use rstest::rstest;

fn add(board: &mut Board, title: &str, clock: &SteppingClock) -> eyre::Result<TaskId> {
    let block = general(board);
    board
        .add_task(block, NewTask::new(title), clock)
        .ok_or_eyre("task should be added")
}

#[rstest]
fn report_marked_done_twice_stays_single_and_on_top(
    mut board: Board,
    clock: SteppingClock,
) -> eyre::Result<()> {
    add(&mut board, "Inbox zero", &clock)?;
    let report = add(&mut board, "Report", &clock)?;
    let done = board.columns().terminal().clone();

    ensure!(board.move_to_column(report, &done, None));
    ensure!(board.move_to_column(report, &done, None));

    let block = general(&mut board);
    let listed = board.list_tasks(block, &TaskQuery::all());
    let titles: Vec<&str> = listed.iter().map(|task| task.title()).collect();
    ensure!(titles == ["Report", "Inbox zero"], "unexpected order: {titles:?}");
    ensure!(board.invariants_hold());
    Ok(())
}

#[rstest]
fn workflow_through_every_column_keeps_invariants(
    mut board: Board,
    clock: SteppingClock,
) -> eyre::Result<()> {
    let ids = [
        add(&mut board, "One", &clock)?,
        add(&mut board, "Two", &clock)?,
        add(&mut board, "Three", &clock)?,
    ];
    let order: Vec<ColumnId> = board.columns().order().to_vec();

    for column in &order {
        for id in ids {
            ensure!(board.move_to_column(id, column, Some(DropPosition::Middle)));
            ensure!(board.invariants_hold(), "invariant broken entering {column}");
        }
    }

    let block = general(&mut board);
    let listed = board.list_tasks(block, &TaskQuery::all().in_column("done"));
    ensure!(listed.len() == 3);
    ensure!(listed.iter().all(|task| task.priority() == Priority::Medium));
    Ok(())
}

#[rstest]
fn renamed_review_column_keeps_its_tasks(
    mut board: Board,
    clock: SteppingClock,
) -> eyre::Result<()> {
    let block = general(&mut board);
    let review = board.add_column("Review").ok_or_eyre("column added")?;
    let id = board
        .add_task(block, NewTask::new("Audit").in_column("Review"), &clock)
        .ok_or_eyre("task added")?;

    ensure!(board.rename_column(&review, "QA Review"));

    let task = board.task(id).ok_or_eyre("task exists")?;
    ensure!(board.column_name(task.column()) == Some("QA Review"));
    let resolved = board
        .columns()
        .resolve("QA Review")
        .ok_or_eyre("renamed column resolves")?;
    ensure!(resolved.id() == task.column());
    let in_review = board.list_tasks(block, &TaskQuery::all().in_column(resolved.id().clone()));
    ensure!(in_review.len() == 1);
    Ok(())
}

#[rstest]
fn reordered_columns_keep_fixed_stages(mut board: Board) -> eyre::Result<()> {
    let mut order: Vec<ColumnId> = board.columns().order().to_vec();
    order.reverse();

    ensure!(board.reorder_columns(order.clone()));

    ensure!(board.columns().order() == order.as_slice());
    ensure!(board.columns().entry().as_str() == "backlog");
    ensure!(!board.remove_column(&ColumnId::from_name("Backlog")));
    Ok(())
}
