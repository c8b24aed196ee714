//! Unit tests for today resolution and day classification.

use trainplan::program::Exercise;
use trainplan::storage::{Database, KvStore, StoreKey};
use trainplan::tracker::{DayStatus, FinishOutcome, Today, Tracker};

#[test]
fn test_today_skips_vacations() {
    let db = Database::open_in_memory().unwrap();
    let store = KvStore::new(db.connection());
    store.save(&StoreKey::ProgramDay, &10u32).unwrap();

    let tracker = Tracker::new(store, 364);
    tracker.mark_vacation(10, 11).unwrap();

    assert_eq!(tracker.completion().resolve_today().unwrap(), Today::Day(12));
}

#[test]
fn test_vacation_past_end_completes_program() {
    let db = Database::open_in_memory().unwrap();
    let tracker = Tracker::new(KvStore::new(db.connection()), 14);
    tracker.mark_vacation(3, 100).unwrap();
    tracker.completion().complete_session(2).unwrap();

    assert_eq!(
        tracker.completion().resolve_today().unwrap(),
        Today::ProgramComplete
    );
    assert_eq!(tracker.finish_today().unwrap(), FinishOutcome::ProgramComplete);
}

#[test]
fn test_completing_old_day_keeps_pointer() {
    let db = Database::open_in_memory().unwrap();
    let tracker = Tracker::new(KvStore::new(db.connection()), 364);

    tracker.completion().complete_session(20).unwrap();
    tracker.completion().complete_session(4).unwrap();

    assert_eq!(tracker.completion().current_index().unwrap(), 21);
    assert!(tracker.completion().is_done(4).unwrap());
}

#[test]
fn test_every_day_has_one_status() {
    let db = Database::open_in_memory().unwrap();
    let tracker = Tracker::new(KvStore::new(db.connection()), 364);
    tracker.mark_vacation(7, 9).unwrap();
    tracker.finish_today().unwrap();

    let statuses: Vec<DayStatus> = tracker
        .program_strip(14)
        .unwrap()
        .into_iter()
        .map(|cell| cell.status)
        .collect();

    assert_eq!(
        statuses,
        vec![
            DayStatus::Done,
            DayStatus::Pending,
            DayStatus::Rest,
            DayStatus::Pending,
            DayStatus::Pending,
            DayStatus::Rest,
            DayStatus::Pending,
            DayStatus::Vacation,
            DayStatus::Vacation,
            DayStatus::Vacation,
            DayStatus::Pending,
            DayStatus::Pending,
            DayStatus::Rest,
            DayStatus::Pending,
        ]
    );
}

#[test]
fn test_edit_keeps_formula_distance() {
    let db = Database::open_in_memory().unwrap();
    let tracker = Tracker::new(KvStore::new(db.connection()), 364);

    let form = tracker.begin_edit(Exercise::Dips, 3).unwrap();
    let saved = tracker.save_edit(form.target, 4, 12).unwrap();
    assert_eq!((saved.series, saved.reps, saved.km), (4, 12, 8));

    let plan = tracker.plan_for(14).unwrap();
    let dips = plan
        .exercises()
        .iter()
        .find(|line| line.exercise == Exercise::Dips)
        .unwrap();
    assert_eq!((dips.series, dips.reps), (4, 12));
}
