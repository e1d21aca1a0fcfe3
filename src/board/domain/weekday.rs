//! Weekday tags and recurring day sets.

use super::ParseDayOfWeekError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One of the seven weekday tags, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayOfWeek {
    /// All weekday tags, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Returns the weekday tag of a calendar date.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    /// Returns the canonical lowercase tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(value: DayOfWeek) -> Self {
        match value {
            DayOfWeek::Monday => Self::Mon,
            DayOfWeek::Tuesday => Self::Tue,
            DayOfWeek::Wednesday => Self::Wed,
            DayOfWeek::Thursday => Self::Thu,
            DayOfWeek::Friday => Self::Fri,
            DayOfWeek::Saturday => Self::Sat,
            DayOfWeek::Sunday => Self::Sun,
        }
    }
}

impl TryFrom<&str> for DayOfWeek {
    type Error = ParseDayOfWeekError;

    /// Accepts full names and three-letter abbreviations, case-insensitively.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| {
                let tag = day.as_str();
                normalized == tag || tag.get(..3).is_some_and(|short| normalized == short)
            })
            .ok_or_else(|| ParseDayOfWeekError(value.to_owned()))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of weekdays a template recurs on.
///
/// The set may be empty when reconstructed from stored data; creation paths
/// reject empty sets and the recurrence expander yields nothing for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecurringDays(BTreeSet<DayOfWeek>);

impl RecurringDays {
    /// Creates an empty day set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns `true` when no weekday is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when `day` is selected.
    #[must_use]
    pub fn contains(&self, day: DayOfWeek) -> bool {
        self.0.contains(&day)
    }

    /// Returns `true` when the weekday of `date` is selected.
    #[must_use]
    pub fn matches(&self, date: NaiveDate) -> bool {
        self.contains(DayOfWeek::of(date))
    }

    /// Adds a weekday to the set.
    pub fn insert(&mut self, day: DayOfWeek) {
        self.0.insert(day);
    }

    /// Iterates the selected weekdays, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = DayOfWeek> + '_ {
        self.0.iter().copied()
    }

    /// Parses a list of weekday tags, failing on the first unknown tag.
    ///
    /// # Errors
    ///
    /// Returns [`ParseDayOfWeekError`] for the first tag that is not a
    /// recognised weekday.
    pub fn parse<'a>(
        tags: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ParseDayOfWeekError> {
        tags.into_iter()
            .map(DayOfWeek::try_from)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }
}

impl FromIterator<DayOfWeek> for RecurringDays {
    fn from_iter<T: IntoIterator<Item = DayOfWeek>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
