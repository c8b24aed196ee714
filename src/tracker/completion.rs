//! Completion ledger and "today" resolution.

use serde::Serialize;

use crate::storage::{DatabaseError, KvStore, StoreKey};

use super::vacation::VacationLedger;

/// Result of resolving the current program day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "index")]
pub enum Today {
    /// The day index to present as today.
    Day(u32),
    /// The pointer, after skipping vacations, is past the last program day.
    ProgramComplete,
}

impl Today {
    /// Day index, if the program is still running.
    pub fn index(&self) -> Option<u32> {
        match self {
            Today::Day(index) => Some(*index),
            Today::ProgramComplete => None,
        }
    }
}

/// Per-day completion flags plus the program pointer.
#[derive(Clone, Copy)]
pub struct CompletionLedger<'a> {
    store: KvStore<'a>,
    vacations: VacationLedger<'a>,
    total_days: u32,
}

impl<'a> CompletionLedger<'a> {
    /// Create a ledger for a program of `total_days` days.
    pub fn new(store: KvStore<'a>, total_days: u32) -> Self {
        Self {
            store,
            vacations: VacationLedger::new(store, total_days),
            total_days,
        }
    }

    /// Number of days in the program.
    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    /// Persisted program pointer, 0 when unset.
    pub fn current_index(&self) -> Result<u32, DatabaseError> {
        self.store.load_or(&StoreKey::ProgramDay, 0)
    }

    /// First non-vacation day at or after the pointer.
    ///
    /// The scan stops at the end of the program, so a vacation range
    /// running past the last day yields `ProgramComplete`.
    pub fn resolve_today(&self) -> Result<Today, DatabaseError> {
        let vacations = self.vacations.days()?;
        let mut index = self.current_index()?;

        while index < self.total_days {
            if !vacations.contains(&index) {
                return Ok(Today::Day(index));
            }
            index += 1;
        }

        Ok(Today::ProgramComplete)
    }

    /// Check whether a day has been completed.
    pub fn is_done(&self, index: u32) -> Result<bool, DatabaseError> {
        self.store.load_or(&StoreKey::Done(index), false)
    }

    /// Set the completion flag of a day. Idempotent.
    pub fn mark_done(&self, index: u32) -> Result<(), DatabaseError> {
        self.store.save(&StoreKey::Done(index), &true)
    }

    /// Complete a session: flag the day as done and move the pointer to
    /// the following day.
    ///
    /// The pointer never moves backwards; completing a day behind the
    /// pointer only sets its flag.
    pub fn complete_session(&self, index: u32) -> Result<(), DatabaseError> {
        self.mark_done(index)?;

        let next = index.saturating_add(1);
        let current = self.current_index()?;
        if next > current {
            self.store.save(&StoreKey::ProgramDay, &next)?;
            tracing::info!("Completed day {}, pointer now {}", index, next);
        } else {
            tracing::debug!("Completed day {} behind pointer {}", index, current);
        }

        Ok(())
    }
}
