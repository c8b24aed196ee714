//! Mapping between program day indices, (week, weekday) coordinates and
//! calendar dates.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Week and weekday of a program day, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayCoordinate {
    pub week: u32,
    pub weekday: u8,
}

impl DayCoordinate {
    /// Coordinate of a linear day index (0-based).
    pub fn from_index(index: u32) -> Self {
        Self {
            week: index / 7 + 1,
            weekday: (index % 7) as u8 + 1,
        }
    }

    /// Linear day index of this coordinate.
    ///
    /// Out-of-range parts are clamped: week 0 counts as week 1 and the
    /// weekday is held within 1..=7.
    pub fn to_index(&self) -> u32 {
        let week = self.week.max(1) - 1;
        let weekday = u32::from(self.weekday.clamp(1, 7) - 1);
        week.saturating_mul(7).saturating_add(weekday)
    }

    /// Short label, e.g. `W3D5`.
    pub fn label(&self) -> String {
        format!("W{}D{}", self.week, self.weekday)
    }
}

impl std::fmt::Display for DayCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Week {} - Day {}", self.week, self.weekday)
    }
}

/// 0-based day of the year (January 1st is 0), whatever the year.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal0()
}

/// Calendar date from a (year, month 0-11, day 1-31) triple.
pub fn calendar_date(year: i32, month0: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month0 + 1, day)
}

/// How calendar dates map onto program day indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum IndexMode {
    /// Day of the calendar year. The index restarts every January 1st, so
    /// a program crossing a year boundary reuses indices.
    #[default]
    CalendarYear,
    /// Days elapsed since the program start date.
    Epoch { start: NaiveDate },
}

impl IndexMode {
    /// Program day index of a date, if the date falls on or after the start.
    pub fn index_for(&self, date: NaiveDate) -> Option<u32> {
        match self {
            IndexMode::CalendarYear => Some(day_of_year(date)),
            IndexMode::Epoch { start } => {
                let elapsed = date.signed_duration_since(*start).num_days();
                u32::try_from(elapsed).ok()
            }
        }
    }

    /// Date of a program day index.
    ///
    /// `year` selects the calendar year in `CalendarYear` mode and is
    /// ignored for `Epoch`.
    pub fn date_for(&self, index: u32, year: i32) -> Option<NaiveDate> {
        match self {
            IndexMode::CalendarYear => NaiveDate::from_yo_opt(year, index.checked_add(1)?),
            IndexMode::Epoch { start } => start.checked_add_days(Days::new(u64::from(index))),
        }
    }
}
