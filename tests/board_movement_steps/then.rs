//! Then steps for board movement BDD scenarios.

use super::world::{MovementWorld, run_async};
use blockboard::board::domain::{BoardSnapshot, TaskQuery};
use rstest_bdd_macros::then;

#[then(r#"the block lists "{titles}""#)]
fn block_lists(world: &MovementWorld, titles: String) -> Result<(), eyre::Report> {
    let board = world.service.board();
    let block = board
        .blocks()
        .first()
        .ok_or_else(|| eyre::eyre!("board has no blocks"))?;
    let listed: Vec<&str> = board
        .list_tasks(block.id(), &TaskQuery::all())
        .into_iter()
        .map(|task| task.title())
        .collect();
    let expected: Vec<&str> = titles.split(',').map(str::trim).collect();
    if listed != expected {
        return Err(eyre::eyre!("expected {expected:?}, found {listed:?}"));
    }
    if !board.invariants_hold() {
        return Err(eyre::eyre!("board invariants do not hold"));
    }
    Ok(())
}

#[then(r#"task "{title}" shows column "{column}""#)]
fn task_shows_column(
    world: &MovementWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    let shown = world.service.board().column_name(task.column());
    if shown != Some(column.as_str()) {
        return Err(eyre::eyre!("expected column {column:?}, found {shown:?}"));
    }
    Ok(())
}

#[then("the stored snapshot matches the board")]
fn stored_snapshot_matches(world: &mut MovementWorld) -> Result<(), eyre::Report> {
    run_async(world.service.flush()).map_err(|err| eyre::eyre!("flush failed: {err}"))?;
    let raw = world
        .store
        .raw()
        .ok_or_else(|| eyre::eyre!("nothing was stored"))?;
    let stored = BoardSnapshot::from_json(&raw)?;
    if stored != world.service.board().to_snapshot() {
        return Err(eyre::eyre!("stored snapshot differs from the board"));
    }
    Ok(())
}
