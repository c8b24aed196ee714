//! Program generation.
//!
//! Day plans are recomputed on every request from the progression rule and
//! the current overrides; nothing is cached, so an override shows up on the
//! next call.

use crate::storage::{DatabaseError, KvStore};

use super::overrides::OverrideBook;
use super::progression::progression_for_week;
use super::types::{DayPlan, Exercise, ExercisePrescription, WeekPrescription};

/// Weekdays (1-based) that are always rest days.
pub const REST_WEEKDAYS: [u8; 2] = [3, 6];

/// Builds prescriptions and day plans.
#[derive(Clone, Copy)]
pub struct ProgramGenerator<'a> {
    overrides: OverrideBook<'a>,
}

impl<'a> ProgramGenerator<'a> {
    /// Create a generator reading overrides from the store.
    pub fn new(store: KvStore<'a>) -> Self {
        Self {
            overrides: OverrideBook::new(store),
        }
    }

    /// Access the override book.
    pub fn overrides(&self) -> &OverrideBook<'a> {
        &self.overrides
    }

    /// Effective prescription for an exercise in a week.
    ///
    /// A manual override is returned as stored, without capping.
    pub fn compute_week_data(&self, week: u32, exercise: Exercise) -> Result<WeekPrescription, DatabaseError> {
        if let Some(manual) = self.overrides.get(exercise, week)? {
            return Ok(manual);
        }
        Ok(progression_for_week(week))
    }

    /// Plan for one day of a week. `weekday` is 1-based.
    pub fn generate_day(&self, week: u32, weekday: u8) -> Result<DayPlan, DatabaseError> {
        if REST_WEEKDAYS.contains(&weekday) {
            return Ok(DayPlan::Rest);
        }

        let exercises = Exercise::STRENGTH
            .into_iter()
            .map(|exercise| {
                let data = self.compute_week_data(week, exercise)?;
                Ok(ExercisePrescription {
                    exercise,
                    series: data.series,
                    reps: data.reps,
                })
            })
            .collect::<Result<Vec<_>, DatabaseError>>()?;

        let distance_km = self.compute_week_data(week, Exercise::Distance)?.km;

        Ok(DayPlan::Training {
            exercises,
            distance_km,
        })
    }

    /// Plans for every day of one week.
    pub fn generate_week(&self, week: u32) -> Result<[DayPlan; 7], DatabaseError> {
        Ok([
            self.generate_day(week, 1)?,
            self.generate_day(week, 2)?,
            self.generate_day(week, 3)?,
            self.generate_day(week, 4)?,
            self.generate_day(week, 5)?,
            self.generate_day(week, 6)?,
            self.generate_day(week, 7)?,
        ])
    }

    /// Materialize the whole program, week by week.
    pub fn generate_program(&self, weeks: u32) -> Result<Vec<[DayPlan; 7]>, DatabaseError> {
        (1..=weeks).map(|week| self.generate_week(week)).collect()
    }

    /// Save a manual edit of series and reps.
    ///
    /// The stored override also carries the week's distance target as
    /// computed right now, so a later change to the distance rule does not
    /// affect this week.
    pub fn edit_exercise(
        &self,
        exercise: Exercise,
        week: u32,
        series: u32,
        reps: u32,
    ) -> Result<WeekPrescription, DatabaseError> {
        let km = self.compute_week_data(week, Exercise::Distance)?.km;
        let manual = WeekPrescription { series, reps, km };
        self.overrides.set(exercise, week, manual)?;
        Ok(manual)
    }
}
