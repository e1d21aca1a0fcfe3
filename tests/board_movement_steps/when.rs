//! When steps for board movement BDD scenarios.

use super::world::MovementWorld;
use rstest_bdd_macros::when;

#[when(r#""{title}" is moved to "{column}""#)]
fn move_task(world: &mut MovementWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let task_id = world.task_titled(&title)?.id();
    let target = world.column(&column)?;
    if !world.service.move_to_column(task_id, &target, None) {
        return Err(eyre::eyre!("moving {title:?} to {column:?} was ignored"));
    }
    Ok(())
}

#[when(r#"column "{from}" is renamed to "{to}""#)]
fn rename_column(world: &mut MovementWorld, from: String, to: String) -> Result<(), eyre::Report> {
    let column = world.column(&from)?;
    if !world.service.mutate(|board, _| board.rename_column(&column, &to)) {
        return Err(eyre::eyre!("renaming {from:?} was ignored"));
    }
    Ok(())
}
