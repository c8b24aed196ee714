//! Unit tests for the vacation ledger.

use trainplan::storage::{Database, KvStore, StoreKey};
use trainplan::tracker::VacationLedger;

#[test]
fn test_add_range_is_inclusive() {
    let db = Database::open_in_memory().unwrap();
    let ledger = VacationLedger::new(KvStore::new(db.connection()), 364);

    assert_eq!(ledger.add_range(10, 12).unwrap(), 3);
    assert!(ledger.is_vacation(10).unwrap());
    assert!(ledger.is_vacation(12).unwrap());
    assert!(!ledger.is_vacation(13).unwrap());
}

#[test]
fn test_overlapping_ranges_merge() {
    let db = Database::open_in_memory().unwrap();
    let ledger = VacationLedger::new(KvStore::new(db.connection()), 364);

    ledger.add_range(5, 8).unwrap();
    assert_eq!(ledger.add_range(7, 10).unwrap(), 2);
    assert_eq!(ledger.days().unwrap().len(), 6);
}

#[test]
fn test_inverted_range_is_ignored() {
    let db = Database::open_in_memory().unwrap();
    let store = KvStore::new(db.connection());
    let ledger = VacationLedger::new(store, 364);

    assert_eq!(ledger.add_range(9, 3).unwrap(), 0);
    assert!(store.get_raw(&StoreKey::Vacations).unwrap().is_none());
}

#[test]
fn test_reads_legacy_unsorted_list() {
    let db = Database::open_in_memory().unwrap();
    let store = KvStore::new(db.connection());
    store.set_raw(&StoreKey::Vacations, "[14,3,3,9]").unwrap();

    let ledger = VacationLedger::new(store, 364);
    let days: Vec<u32> = ledger.days().unwrap().into_iter().collect();
    assert_eq!(days, vec![3, 9, 14]);
}

#[test]
fn test_unbounded_range_stores_only_program_days() {
    let db = Database::open_in_memory().unwrap();
    let store = KvStore::new(db.connection());
    let ledger = VacationLedger::new(store, 364);

    assert_eq!(ledger.add_range(0, u32::MAX).unwrap(), 364);

    let stored: Vec<u32> = store.load(&StoreKey::Vacations).unwrap().unwrap();
    assert_eq!(stored.len(), 364);
    assert_eq!(stored.last(), Some(&363));
}
