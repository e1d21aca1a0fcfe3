//! Shared world state for recurrence BDD scenarios.

use blockboard::board::domain::{Board, BoardConfig, RecurringDays, RecurringTaskId, Task};
use chrono::NaiveDate;
use rstest::fixture;

/// Scenario world for recurrence behaviour tests.
pub struct RecurrenceWorld {
    pub board: Board,
    pub templates: Vec<RecurringTaskId>,
    pub occurrences: Vec<Task>,
}

impl RecurrenceWorld {
    /// Creates a world holding a fresh board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(BoardConfig::default()),
            templates: Vec::new(),
            occurrences: Vec::new(),
        }
    }
}

impl Default for RecurrenceWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RecurrenceWorld {
    RecurrenceWorld::default()
}

/// Parses an ISO date from a step argument.
pub fn parse_date(raw: &str) -> Result<NaiveDate, eyre::Report> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| eyre::eyre!("invalid date {raw:?}: {err}"))
}

/// Parses a comma-separated weekday list from a step argument.
pub fn parse_days(raw: &str) -> Result<RecurringDays, eyre::Report> {
    RecurringDays::parse(raw.split(',').map(str::trim))
        .map_err(|err| eyre::eyre!("invalid weekdays {raw:?}: {err}"))
}
