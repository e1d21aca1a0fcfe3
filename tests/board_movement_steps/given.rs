//! Given steps for board movement BDD scenarios.

use super::world::MovementWorld;
use blockboard::board::domain::NewTask;
use rstest_bdd_macros::given;

#[given(r#"a task titled "{title}""#)]
fn task_titled(world: &mut MovementWorld, title: String) -> Result<(), eyre::Report> {
    let block = world
        .service
        .mutate(|board, _| Some(board.ensure_default_block()))
        .ok_or_else(|| eyre::eyre!("catch-all block unavailable"))?;
    world
        .service
        .add_task(block, NewTask::new(title))
        .ok_or_else(|| eyre::eyre!("task was rejected"))?;
    Ok(())
}

#[given(r#"a column named "{name}""#)]
fn column_named(world: &mut MovementWorld, name: String) -> Result<(), eyre::Report> {
    world
        .service
        .mutate(|board, _| board.add_column(&name))
        .ok_or_else(|| eyre::eyre!("column {name:?} was rejected"))?;
    Ok(())
}

#[given(r#"a "{column}" task titled "{title}""#)]
fn task_in_column(
    world: &mut MovementWorld,
    column: String,
    title: String,
) -> Result<(), eyre::Report> {
    let column_id = world.column(&column)?;
    let block = world.service.board().blocks().first().map(|block| block.id());
    let block = block.ok_or_else(|| eyre::eyre!("board has no blocks"))?;
    world
        .service
        .add_task(block, NewTask::new(title).in_column(column_id))
        .ok_or_else(|| eyre::eyre!("task was rejected"))?;
    Ok(())
}
