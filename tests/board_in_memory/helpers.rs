//! Shared helpers for board integration tests.

use blockboard::board::domain::{BlockId, Board, BoardConfig};
use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock advancing one second per reading.
#[derive(Debug)]
pub struct SteppingClock {
    origin: DateTime<Utc>,
    ticks: AtomicI64,
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.origin + TimeDelta::seconds(tick)
    }
}

/// Provides a clock starting at 2024-08-01 09:00 UTC.
///
/// # Panics
///
/// Never in practice; the origin timestamp is a valid constant.
#[fixture]
pub fn clock() -> SteppingClock {
    let origin = Utc
        .with_ymd_and_hms(2024, 8, 1, 9, 0, 0)
        .single()
        .expect("valid origin timestamp");
    SteppingClock {
        origin,
        ticks: AtomicI64::new(0),
    }
}

/// Provides a board with the default configuration.
#[fixture]
pub fn board() -> Board {
    Board::new(BoardConfig::default())
}

/// Builds a calendar date.
///
/// # Panics
///
/// Panics if the parts do not form a valid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Returns the catch-all block of `board`.
pub fn general(board: &mut Board) -> BlockId {
    board.ensure_default_block()
}
