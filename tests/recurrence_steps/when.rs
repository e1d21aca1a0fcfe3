//! When steps for recurrence BDD scenarios.

use super::world::{RecurrenceWorld, parse_date};
use blockboard::board::domain::expand_for_range;
use rstest_bdd_macros::when;

#[when(r#"occurrences are expanded from "{from}" to "{to}""#)]
fn expand_range(world: &mut RecurrenceWorld, from: String, to: String) -> Result<(), eyre::Report> {
    let (first, last) = (parse_date(&from)?, parse_date(&to)?);
    let entry = world.board.columns().entry().clone();
    world.occurrences = world
        .board
        .recurring_tasks()
        .iter()
        .flat_map(|template| expand_for_range(template, first, last, &entry))
        .collect();
    Ok(())
}

#[when("occurrences are expanded for month {month:u32} of {year:i32}")]
fn expand_month(world: &mut RecurrenceWorld, month: u32, year: i32) {
    world.occurrences = world.board.occurrences_in_month(year, month);
}

#[when(r#"the first "{title}" template is deleted"#)]
fn delete_first_template(world: &mut RecurrenceWorld, title: String) -> Result<(), eyre::Report> {
    let id = world
        .templates
        .iter()
        .copied()
        .find(|id| {
            world
                .board
                .recurring_task(*id)
                .is_some_and(|template| template.title() == title)
        })
        .ok_or_else(|| eyre::eyre!("no template titled {title:?}"))?;
    if !world.board.delete_recurring_task(id) {
        return Err(eyre::eyre!("template {id} was not deleted"));
    }
    Ok(())
}
