//! Manual prescription overrides.

use crate::storage::{DatabaseError, KvStore, StoreKey};

use super::types::{Exercise, OverrideKey, WeekPrescription};

/// Persisted manual overrides, one per (exercise, week).
#[derive(Clone, Copy)]
pub struct OverrideBook<'a> {
    store: KvStore<'a>,
}

impl<'a> OverrideBook<'a> {
    pub fn new(store: KvStore<'a>) -> Self {
        Self { store }
    }

    /// Get the override for an exercise in a week, if any.
    pub fn get(&self, exercise: Exercise, week: u32) -> Result<Option<WeekPrescription>, DatabaseError> {
        self.store.load(&Self::key(exercise, week))
    }

    /// Store an override. It replaces the formula output verbatim.
    pub fn set(
        &self,
        exercise: Exercise,
        week: u32,
        prescription: WeekPrescription,
    ) -> Result<(), DatabaseError> {
        self.store.save(&Self::key(exercise, week), &prescription)?;
        tracing::info!(
            "Override for {} week {}: {}x{} / {} km",
            exercise,
            week,
            prescription.series,
            prescription.reps,
            prescription.km
        );
        Ok(())
    }

    /// Remove an override. Returns whether one existed.
    pub fn clear(&self, exercise: Exercise, week: u32) -> Result<bool, DatabaseError> {
        self.store.remove(&Self::key(exercise, week))
    }

    fn key(exercise: Exercise, week: u32) -> StoreKey {
        StoreKey::ManualOverride(OverrideKey::new(exercise, week))
    }
}
