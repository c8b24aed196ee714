//! Session façade: today's session, day details and user actions.
//!
//! Combines the program generator with the vacation and completion
//! ledgers to answer "what should I do today" and "what happened on day
//! N", and applies the user's actions (finish, vacation, edit).

use std::collections::BTreeSet;

use serde::Serialize;

use crate::program::{DayPlan, Exercise, ProgramGenerator, WeekPrescription, REST_WEEKDAYS};
use crate::schedule::day_index::DayCoordinate;
use crate::storage::{Database, DatabaseError, KvStore, ProgramSettings};

use super::completion::{CompletionLedger, Today};
use super::vacation::VacationLedger;

/// State of one program day. Every day is in exactly one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Skipped as vacation
    Vacation,
    /// Structural rest day
    Rest,
    /// Training completed
    Done,
    /// Training not completed yet
    Pending,
}

impl std::fmt::Display for DayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayStatus::Vacation => write!(f, "Vacation"),
            DayStatus::Rest => write!(f, "Rest"),
            DayStatus::Done => write!(f, "Done"),
            DayStatus::Pending => write!(f, "Pending"),
        }
    }
}

/// Today's session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodayView {
    pub index: u32,
    pub coordinate: DayCoordinate,
    pub plan: DayPlan,
    pub done: bool,
}

/// Full detail of one program day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDetail {
    pub index: u32,
    pub coordinate: DayCoordinate,
    pub plan: DayPlan,
    pub status: DayStatus,
}

/// Compact per-day summary used by calendar grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub index: u32,
    pub coordinate: DayCoordinate,
    pub status: DayStatus,
    pub is_today: bool,
}

/// Outcome of finishing today's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "index")]
pub enum FinishOutcome {
    /// The day was completed and the pointer moved past it.
    Completed(u32),
    /// Today was already flagged as done; nothing changed.
    AlreadyDone(u32),
    /// There is no day left to finish.
    ProgramComplete,
}

/// The exercise and week selected for a manual edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseEdit {
    pub exercise: Exercise,
    pub week: u32,
}

/// An edit selection with its pre-filled values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditForm {
    pub target: ExerciseEdit,
    pub series: u32,
    pub reps: u32,
}

/// Training tracker over one key-value store.
#[derive(Clone, Copy)]
pub struct Tracker<'a> {
    generator: ProgramGenerator<'a>,
    vacations: VacationLedger<'a>,
    completion: CompletionLedger<'a>,
}

impl<'a> Tracker<'a> {
    /// Create a tracker for a program of `total_days` days.
    pub fn new(store: KvStore<'a>, total_days: u32) -> Self {
        Self {
            generator: ProgramGenerator::new(store),
            vacations: VacationLedger::new(store, total_days),
            completion: CompletionLedger::new(store, total_days),
        }
    }

    /// Create a tracker over a database using the program settings.
    pub fn open(db: &'a Database, settings: &ProgramSettings) -> Self {
        Self::new(KvStore::new(db.connection()), settings.total_days())
    }

    pub fn generator(&self) -> &ProgramGenerator<'a> {
        &self.generator
    }

    pub fn vacations(&self) -> &VacationLedger<'a> {
        &self.vacations
    }

    pub fn completion(&self) -> &CompletionLedger<'a> {
        &self.completion
    }

    /// Number of days in the program.
    pub fn total_days(&self) -> u32 {
        self.completion.total_days()
    }

    /// Plan of a program day.
    pub fn plan_for(&self, index: u32) -> Result<DayPlan, DatabaseError> {
        let coordinate = DayCoordinate::from_index(index);
        self.generator.generate_day(coordinate.week, coordinate.weekday)
    }

    /// State of a program day.
    pub fn status_of(&self, index: u32) -> Result<DayStatus, DatabaseError> {
        let vacations = self.vacations.days()?;
        self.classify(index, &vacations)
    }

    fn classify(&self, index: u32, vacations: &BTreeSet<u32>) -> Result<DayStatus, DatabaseError> {
        if vacations.contains(&index) {
            return Ok(DayStatus::Vacation);
        }
        if REST_WEEKDAYS.contains(&DayCoordinate::from_index(index).weekday) {
            return Ok(DayStatus::Rest);
        }
        if self.completion.is_done(index)? {
            return Ok(DayStatus::Done);
        }
        Ok(DayStatus::Pending)
    }

    /// Today's session, or `None` once the program is complete.
    pub fn today(&self) -> Result<Option<TodayView>, DatabaseError> {
        let Today::Day(index) = self.completion.resolve_today()? else {
            return Ok(None);
        };

        Ok(Some(TodayView {
            index,
            coordinate: DayCoordinate::from_index(index),
            plan: self.plan_for(index)?,
            done: self.completion.is_done(index)?,
        }))
    }

    /// Finish today's session.
    ///
    /// Rest days can be finished too, which moves the pointer past them.
    pub fn finish_today(&self) -> Result<FinishOutcome, DatabaseError> {
        let Today::Day(index) = self.completion.resolve_today()? else {
            return Ok(FinishOutcome::ProgramComplete);
        };

        if self.completion.is_done(index)? {
            return Ok(FinishOutcome::AlreadyDone(index));
        }

        self.completion.complete_session(index)?;
        Ok(FinishOutcome::Completed(index))
    }

    /// Detail of a program day, `None` past the end of the program.
    pub fn day_detail(&self, index: u32) -> Result<Option<DayDetail>, DatabaseError> {
        if index >= self.total_days() {
            return Ok(None);
        }

        Ok(Some(DayDetail {
            index,
            coordinate: DayCoordinate::from_index(index),
            plan: self.plan_for(index)?,
            status: self.status_of(index)?,
        }))
    }

    /// Summary cells for a set of day indices. Indices past the end of
    /// the program are skipped.
    pub fn day_cells<I>(&self, indices: I) -> Result<Vec<DayCell>, DatabaseError>
    where
        I: IntoIterator<Item = u32>,
    {
        let vacations = self.vacations.days()?;
        let today = self.completion.resolve_today()?.index();

        indices
            .into_iter()
            .filter(|index| *index < self.total_days())
            .map(|index| {
                Ok(DayCell {
                    index,
                    coordinate: DayCoordinate::from_index(index),
                    status: self.classify(index, &vacations)?,
                    is_today: today == Some(index),
                })
            })
            .collect()
    }

    /// The first `days` program days.
    pub fn program_strip(&self, days: u32) -> Result<Vec<DayCell>, DatabaseError> {
        self.day_cells(0..days.min(self.total_days()))
    }

    /// Mark an inclusive range of days as vacation.
    pub fn mark_vacation(&self, start: u32, end: u32) -> Result<usize, DatabaseError> {
        self.vacations.add_range(start, end)
    }

    /// Select an exercise for editing, pre-filled with its effective values.
    pub fn begin_edit(&self, exercise: Exercise, week: u32) -> Result<EditForm, DatabaseError> {
        let current = self.generator.compute_week_data(week, exercise)?;
        Ok(EditForm {
            target: ExerciseEdit { exercise, week },
            series: current.series,
            reps: current.reps,
        })
    }

    /// Save edited series and reps for the selected exercise.
    pub fn save_edit(
        &self,
        target: ExerciseEdit,
        series: u32,
        reps: u32,
    ) -> Result<WeekPrescription, DatabaseError> {
        self.generator
            .edit_exercise(target.exercise, target.week, series, reps)
    }
}
