//! Integration tests for a program persisted on disk.
//!
//! Covers a user finishing sessions, taking a vacation, editing an
//! exercise and coming back after the application restarts.

use chrono::NaiveDate;
use tempfile::tempdir;
use trainplan::program::{Exercise, ProgramGenerator};
use trainplan::schedule::{IndexMode, MonthCursor, MonthView};
use trainplan::storage::config::{load_config_from, save_config};
use trainplan::storage::{AppConfig, Database};
use trainplan::tracker::{DayStatus, FinishOutcome, Tracker};

#[test]
fn test_progress_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trainplan.db");
    let config = AppConfig::default();

    {
        let db = Database::open(&path).unwrap();
        let tracker = Tracker::open(&db, &config.program);

        assert_eq!(tracker.finish_today().unwrap(), FinishOutcome::Completed(0));
        assert_eq!(tracker.finish_today().unwrap(), FinishOutcome::Completed(1));
        tracker.mark_vacation(2, 7).unwrap();

        let form = tracker.begin_edit(Exercise::RussianTwist, 2).unwrap();
        tracker.save_edit(form.target, 6, 25).unwrap();
    }

    let db = Database::open(&path).unwrap();
    let tracker = Tracker::open(&db, &config.program);

    let today = tracker.today().unwrap().unwrap();
    assert_eq!(today.index, 8);
    assert!(!today.done);

    let twist = today
        .plan
        .exercises()
        .iter()
        .find(|line| line.exercise == Exercise::RussianTwist)
        .unwrap();
    assert_eq!((twist.series, twist.reps), (6, 25));

    assert_eq!(tracker.status_of(0).unwrap(), DayStatus::Done);
    assert_eq!(tracker.status_of(5).unwrap(), DayStatus::Vacation);
}

#[test]
fn test_full_program_shape() {
    let db = Database::open_in_memory().unwrap();
    let tracker = Tracker::open(&db, &AppConfig::default().program);
    let generator: &ProgramGenerator = tracker.generator();

    let program = generator.generate_program(52).unwrap();
    assert_eq!(program.len(), 52);

    let days: Vec<_> = program.iter().flatten().collect();
    assert_eq!(days.len(), 364);
    assert_eq!(days.iter().filter(|d| d.is_rest()).count(), 104);

    let last = &program[51][0];
    assert_eq!(last.exercises().len(), 5);
    assert_eq!(last.distance_km(), Some(30));
}

#[test]
fn test_finishing_every_day_completes_program() {
    let db = Database::open_in_memory().unwrap();
    let mut config = AppConfig::default();
    config.program.weeks = 2;
    let tracker = Tracker::open(&db, &config.program);

    tracker.mark_vacation(10, 11).unwrap();
    let mut completed = 0;
    while let FinishOutcome::Completed(_) = tracker.finish_today().unwrap() {
        completed += 1;
    }

    assert_eq!(completed, 12);
    assert!(tracker.today().unwrap().is_none());
}

#[test]
fn test_config_round_trip_drives_index_mode() {
    let dir = tempdir().unwrap();

    let mut config = load_config_from(dir.path()).unwrap();
    assert_eq!(config.program.index_mode(), IndexMode::CalendarYear);

    let start = NaiveDate::from_ymd_opt(2026, 12, 28).unwrap();
    config.program.start_date = Some(start);
    config.offline.generation = "sport-pwa-v2".to_string();
    save_config(&config).unwrap();

    let loaded = load_config_from(dir.path()).unwrap();
    assert_eq!(loaded.program.index_mode(), IndexMode::Epoch { start });
    assert_eq!(loaded.offline.manifest().generation, "sport-pwa-v2");
    assert_eq!(loaded.database_path(), dir.path().join("trainplan.db"));
}

#[test]
fn test_month_view_across_new_year() {
    let db = Database::open_in_memory().unwrap();
    let tracker = Tracker::open(&db, &AppConfig::default().program);
    tracker.finish_today().unwrap();

    let mode = IndexMode::Epoch {
        start: NaiveDate::from_ymd_opt(2026, 12, 28).unwrap(),
    };
    let view = MonthView::build(MonthCursor::new(2027, 0).unwrap(), mode, &tracker).unwrap();

    // January 1st 2027 is program day 4
    let first = view.cells[0].day.unwrap();
    assert_eq!(first.index, 4);
    assert_eq!(first.status, DayStatus::Pending);
    assert!(view.cells.iter().all(|cell| cell.day.is_some()));
}
