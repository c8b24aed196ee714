//! Month calendar view model.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::storage::DatabaseError;
use crate::tracker::{DayCell, Tracker};

use super::day_index::IndexMode;

/// The month currently displayed. Months are 0-based (January is 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month0: u32,
}

impl MonthCursor {
    /// Create a cursor, `None` if `month0` is not in 0..12.
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        (month0 < 12).then_some(Self { year, month0 })
    }

    /// The month containing a date.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// Following month.
    pub fn next(self) -> Self {
        if self.month0 == 11 {
            Self {
                year: self.year + 1,
                month0: 0,
            }
        } else {
            Self {
                month0: self.month0 + 1,
                ..self
            }
        }
    }

    /// Preceding month.
    pub fn prev(self) -> Self {
        if self.month0 == 0 {
            Self {
                year: self.year - 1,
                month0: 11,
            }
        } else {
            Self {
                month0: self.month0 - 1,
                ..self
            }
        }
    }

    /// First day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
    }

    /// Every date of the month, in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let Some(first) = self.first_day() else {
            return Vec::new();
        };
        first
            .iter_days()
            .take_while(|d| d.month0() == self.month0)
            .collect()
    }

    /// Heading such as "October 2026".
    pub fn title(&self) -> String {
        self.first_day()
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month0 + 1))
    }
}

/// One date of a month grid. `day` is `None` when the date falls outside
/// the program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub day: Option<DayCell>,
}

/// A month of the program laid out for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthView {
    pub cursor: MonthCursor,
    /// Empty slots before the first date in a Monday-first grid
    pub leading_blanks: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthView {
    /// Build the view of one month.
    pub fn build(cursor: MonthCursor, mode: IndexMode, tracker: &Tracker<'_>) -> Result<Self, DatabaseError> {
        let dates = cursor.dates();
        let indices: Vec<Option<u32>> = dates.iter().map(|d| mode.index_for(*d)).collect();

        let by_index: HashMap<u32, DayCell> = tracker
            .day_cells(indices.iter().flatten().copied())?
            .into_iter()
            .map(|cell| (cell.index, cell))
            .collect();

        let cells = dates
            .iter()
            .zip(indices)
            .map(|(date, index)| CalendarCell {
                date: *date,
                day: index.and_then(|i| by_index.get(&i).copied()),
            })
            .collect();

        let leading_blanks = dates
            .first()
            .map(|d| d.weekday().num_days_from_monday())
            .unwrap_or(0);

        Ok(Self {
            cursor,
            leading_blanks,
            cells,
        })
    }
}
