//! Training tracker module.
//!
//! Tracks the user's progress through the program:
//! - Vacation days skipped when resolving today
//! - Per-day completion flags and the program pointer
//! - Session façade used by the front end

pub mod completion;
pub mod session;
pub mod vacation;

// Re-exports for convenience
pub use completion::{CompletionLedger, Today};
pub use session::{
    DayCell, DayDetail, DayStatus, EditForm, ExerciseEdit, FinishOutcome, TodayView, Tracker,
};
pub use vacation::VacationLedger;
