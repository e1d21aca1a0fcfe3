//! Given steps for recurrence BDD scenarios.

use super::world::{RecurrenceWorld, parse_date, parse_days};
use blockboard::board::domain::NewRecurringTask;
use chrono::NaiveTime;
use mockable::DefaultClock;
use rstest_bdd_macros::given;

fn add_template(
    world: &mut RecurrenceWorld,
    draft: NewRecurringTask,
) -> Result<(), eyre::Report> {
    let block = world.board.ensure_default_block();
    let id = world
        .board
        .add_recurring_task(block, draft, &DefaultClock)
        .ok_or_else(|| eyre::eyre!("template was rejected"))?;
    world.templates.push(id);
    Ok(())
}

#[given(r#"a recurring task "{title}" on "{days}" from "{start}" until "{due}""#)]
fn bounded_template(
    world: &mut RecurrenceWorld,
    title: String,
    days: String,
    start: String,
    due: String,
) -> Result<(), eyre::Report> {
    let draft = NewRecurringTask::new(title, parse_days(&days)?)
        .starting(parse_date(&start)?)
        .until(parse_date(&due)?);
    add_template(world, draft)
}

#[given(r#"an open-ended recurring task "{title}" on "{days}" from "{start}""#)]
fn open_ended_template(
    world: &mut RecurrenceWorld,
    title: String,
    days: String,
    start: String,
) -> Result<(), eyre::Report> {
    let draft = NewRecurringTask::new(title, parse_days(&days)?).starting(parse_date(&start)?);
    add_template(world, draft)
}

#[given(r#"a recurring task "{title}" on "{days}" at "{time}" pinned to the schedule"#)]
fn pinned_template(
    world: &mut RecurrenceWorld,
    title: String,
    days: String,
    time: String,
) -> Result<(), eyre::Report> {
    let at = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|err| eyre::eyre!("invalid time {time:?}: {err}"))?;
    let draft = NewRecurringTask::new(title, parse_days(&days)?)
        .at(at)
        .pinned_to_schedule();
    add_template(world, draft)
}
