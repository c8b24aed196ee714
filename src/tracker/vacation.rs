//! Vacation ledger: program days the user skips.

use std::collections::BTreeSet;

use crate::storage::{DatabaseError, KvStore, StoreKey};

/// Persisted set of vacation day indices within a program.
#[derive(Clone, Copy)]
pub struct VacationLedger<'a> {
    store: KvStore<'a>,
    total_days: u32,
}

impl<'a> VacationLedger<'a> {
    /// Create a ledger for a program of `total_days` days.
    pub fn new(store: KvStore<'a>, total_days: u32) -> Self {
        Self { store, total_days }
    }

    /// All vacation days, ascending.
    pub fn days(&self) -> Result<BTreeSet<u32>, DatabaseError> {
        let days: Vec<u32> = self.store.load_or(&StoreKey::Vacations, Vec::new())?;
        Ok(days.into_iter().collect())
    }

    /// Check whether a day index is marked as vacation.
    pub fn is_vacation(&self, index: u32) -> Result<bool, DatabaseError> {
        Ok(self.days()?.contains(&index))
    }

    /// Mark every day in `start..=end` as vacation.
    ///
    /// `end` saturates at the last program day. An inverted range, or one
    /// starting past the program, inserts nothing. Returns the number of
    /// days that were not already marked.
    pub fn add_range(&self, start: u32, end: u32) -> Result<usize, DatabaseError> {
        let Some(last) = self.total_days.checked_sub(1) else {
            return Ok(0);
        };
        let end = end.min(last);
        if start > end {
            tracing::debug!("Ignoring empty vacation range {}..={}", start, end);
            return Ok(0);
        }

        let mut days = self.days()?;
        let before = days.len();
        days.extend(start..=end);
        let added = days.len() - before;

        let stored: Vec<u32> = days.into_iter().collect();
        self.store.save(&StoreKey::Vacations, &stored)?;

        tracing::info!("Marked days {}..={} as vacation ({} new)", start, end, added);
        Ok(added)
    }
}
