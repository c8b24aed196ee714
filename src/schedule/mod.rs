//! Scheduling module.
//!
//! Maps program days onto weeks, weekdays and calendar dates, and lays
//! them out as month calendars.

pub mod calendar;
pub mod day_index;

// Re-exports for convenience
pub use calendar::{CalendarCell, MonthCursor, MonthView};
pub use day_index::{calendar_date, day_of_year, DayCoordinate, IndexMode};
