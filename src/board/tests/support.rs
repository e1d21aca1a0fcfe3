//! Shared fixtures for board unit tests.

use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::board::domain::{BlockId, Board, BoardConfig};

/// Clock that advances one second on every reading, so creation order is
/// strictly increasing and reproducible.
#[derive(Debug)]
pub struct StepClock {
    origin: DateTime<Utc>,
    ticks: AtomicI64,
}

impl StepClock {
    pub fn starting_at(origin: DateTime<Utc>) -> Self {
        Self {
            origin,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.origin + TimeDelta::seconds(tick)
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

#[fixture]
pub fn clock() -> StepClock {
    let origin = Utc
        .with_ymd_and_hms(2024, 8, 1, 9, 0, 0)
        .single()
        .expect("valid origin timestamp");
    StepClock::starting_at(origin)
}

#[fixture]
pub fn board() -> Board {
    Board::new(BoardConfig::default())
}

/// Returns the catch-all block id of a fresh board.
pub fn default_block(board: &mut Board) -> BlockId {
    board.ensure_default_block()
}
