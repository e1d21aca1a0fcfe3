//! Then steps for recurrence BDD scenarios.

use super::world::{RecurrenceWorld, parse_date};
use blockboard::board::domain::DayOfWeek;
use chrono::NaiveDate;
use rstest_bdd_macros::then;

#[then(r#"occurrences fall on "{dates}""#)]
fn occurrences_fall_on(world: &RecurrenceWorld, dates: String) -> Result<(), eyre::Report> {
    let expected = dates
        .split(',')
        .map(parse_date)
        .collect::<Result<Vec<NaiveDate>, _>>()?;
    let actual: Vec<NaiveDate> = world
        .occurrences
        .iter()
        .map(|task| task.start_date())
        .collect();
    if actual != expected {
        return Err(eyre::eyre!("expected {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("{count:usize} occurrences are produced")]
fn occurrence_count(world: &RecurrenceWorld, count: usize) -> Result<(), eyre::Report> {
    if world.occurrences.len() != count {
        return Err(eyre::eyre!(
            "expected {count} occurrences, found {}",
            world.occurrences.len()
        ));
    }
    Ok(())
}

#[then("the monday schedule lists {count:usize} entry")]
fn monday_schedule(world: &mut RecurrenceWorld, count: usize) -> Result<(), eyre::Report> {
    let block = world.board.ensure_default_block();
    let labels = world
        .board
        .block(block)
        .map(|found| found.schedule().labels(DayOfWeek::Monday).len())
        .ok_or_else(|| eyre::eyre!("catch-all block missing"))?;
    if labels != count {
        return Err(eyre::eyre!("expected {count} schedule entries, found {labels}"));
    }
    Ok(())
}
