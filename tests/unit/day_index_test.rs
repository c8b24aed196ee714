//! Unit tests for day index resolution.

use chrono::NaiveDate;
use trainplan::schedule::{calendar_date, day_of_year, DayCoordinate, IndexMode, MonthCursor};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_day_of_year() {
    assert_eq!(day_of_year(date(2026, 1, 1)), 0);
    assert_eq!(day_of_year(date(2026, 2, 1)), 31);
    assert_eq!(day_of_year(date(2026, 12, 31)), 364);
    // Leap year
    assert_eq!(day_of_year(date(2024, 12, 31)), 365);
}

#[test]
fn test_calendar_date_uses_zero_based_month() {
    assert_eq!(calendar_date(2026, 0, 1), Some(date(2026, 1, 1)));
    assert_eq!(calendar_date(2026, 11, 31), Some(date(2026, 12, 31)));
    assert_eq!(calendar_date(2026, 1, 30), None);
}

#[test]
fn test_coordinates() {
    let c = DayCoordinate::from_index(18);
    assert_eq!(c, DayCoordinate { week: 3, weekday: 5 });
    assert_eq!(c.label(), "W3D5");
    assert_eq!(c.to_string(), "Week 3 - Day 5");
    assert_eq!(c.to_index(), 18);
}

#[test]
fn test_calendar_year_mode_restarts_each_year() {
    let mode = IndexMode::CalendarYear;
    assert_eq!(mode.index_for(date(2026, 1, 1)), Some(0));
    assert_eq!(mode.index_for(date(2027, 1, 1)), Some(0));
    assert_eq!(mode.date_for(31, 2026), Some(date(2026, 2, 1)));
}

#[test]
fn test_epoch_mode_crosses_year_boundary() {
    let mode = IndexMode::Epoch {
        start: date(2026, 12, 30),
    };
    assert_eq!(mode.index_for(date(2026, 12, 29)), None);
    assert_eq!(mode.index_for(date(2026, 12, 30)), Some(0));
    assert_eq!(mode.index_for(date(2027, 1, 2)), Some(3));
    assert_eq!(mode.date_for(3, 1999), Some(date(2027, 1, 2)));
}

#[test]
fn test_month_cursor_wraps() {
    let dec = MonthCursor::new(2026, 11).unwrap();
    let jan = dec.next();
    assert_eq!((jan.year, jan.month0), (2027, 0));
    assert_eq!(jan.prev(), dec);
    assert!(MonthCursor::new(2026, 12).is_none());
}
