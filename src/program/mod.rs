//! Training program module.
//!
//! Generates the progressive program:
//! - Closed-form week-over-week progression with capped outputs
//! - Manual per-week overrides that replace the formula
//! - Day plans (rest or training) and whole-program materialization

pub mod generator;
pub mod overrides;
pub mod progression;
pub mod types;

/// Default program length in weeks.
pub const DEFAULT_PROGRAM_WEEKS: u32 = 52;

// Re-exports for convenience
pub use generator::{ProgramGenerator, REST_WEEKDAYS};
pub use overrides::OverrideBook;
pub use progression::{progression_for_week, BASE, MAX_KM, MAX_REPS, MAX_SERIES, MAX_VOLUME};
pub use types::{DayPlan, Exercise, ExercisePrescription, OverrideKey, WeekPrescription};
