//! Program types: exercise catalog, prescriptions and day plans.

use serde::{Deserialize, Serialize};

/// Exercise catalog.
///
/// The catalog name is the persisted identity of an exercise (it appears in
/// manual override keys), so it never changes. `Distance` is the synthetic
/// entry carrying the running/walking target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Exercise {
    /// Incline push-ups
    InclinePushUps,
    /// Cross crunches
    CrossCrunches,
    /// Dynamic plank, counted in seconds
    DynamicPlank,
    /// Dips
    Dips,
    /// Russian twist
    RussianTwist,
    /// Distance target in km
    Distance,
}

impl Exercise {
    /// Strength exercises performed on every training day, in display order.
    pub const STRENGTH: [Exercise; 5] = [
        Exercise::InclinePushUps,
        Exercise::CrossCrunches,
        Exercise::DynamicPlank,
        Exercise::Dips,
        Exercise::RussianTwist,
    ];

    /// Every catalog entry, including the distance target.
    pub const ALL: [Exercise; 6] = [
        Exercise::InclinePushUps,
        Exercise::CrossCrunches,
        Exercise::DynamicPlank,
        Exercise::Dips,
        Exercise::RussianTwist,
        Exercise::Distance,
    ];

    /// Catalog name.
    pub fn name(&self) -> &'static str {
        match self {
            Exercise::InclinePushUps => "Pompes inclinées",
            Exercise::CrossCrunches => "Crunchs croisés",
            Exercise::DynamicPlank => "Gainage dynamique (sec)",
            Exercise::Dips => "Dips",
            Exercise::RussianTwist => "Russian twist",
            Exercise::Distance => "km",
        }
    }

    /// Short ASCII identifier for the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Exercise::InclinePushUps => "incline-push-ups",
            Exercise::CrossCrunches => "cross-crunches",
            Exercise::DynamicPlank => "dynamic-plank",
            Exercise::Dips => "dips",
            Exercise::RussianTwist => "russian-twist",
            Exercise::Distance => "km",
        }
    }

    /// Look up an exercise by catalog name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }
}

impl std::fmt::Display for Exercise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Exercise {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.slug().eq_ignore_ascii_case(wanted) || e.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown exercise: {}", s))
    }
}

impl From<Exercise> for String {
    fn from(exercise: Exercise) -> Self {
        exercise.name().to_string()
    }
}

impl TryFrom<String> for Exercise {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Exercise::from_name(&value).ok_or_else(|| format!("Unknown exercise: {}", value))
    }
}

/// Series, reps and distance for one exercise in one week.
///
/// This is both the output of the progression rule and the stored form of
/// a manual override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPrescription {
    /// Number of series
    pub series: u32,
    /// Repetitions per series
    pub reps: u32,
    /// Distance target in km
    pub km: u32,
}

impl WeekPrescription {
    /// Create a prescription.
    pub const fn new(series: u32, reps: u32, km: u32) -> Self {
        Self { series, reps, km }
    }

    /// Total repetitions across all series.
    pub fn volume(&self) -> u32 {
        self.series.saturating_mul(self.reps)
    }
}

/// Composite key of a manual override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverrideKey {
    pub exercise: Exercise,
    pub week: u32,
}

impl OverrideKey {
    pub fn new(exercise: Exercise, week: u32) -> Self {
        Self { exercise, week }
    }
}

/// One exercise line of a training day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExercisePrescription {
    /// Exercise, serialized as its catalog name
    #[serde(rename = "name")]
    pub exercise: Exercise,
    /// Number of series
    pub series: u32,
    /// Repetitions per series
    pub reps: u32,
}

/// What the user does on one program day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DayPlan {
    /// Structural rest day
    Rest,
    /// Strength circuit followed by a run/walk
    Training {
        exercises: Vec<ExercisePrescription>,
        distance_km: u32,
    },
}

impl DayPlan {
    /// Check if this is a rest day.
    pub fn is_rest(&self) -> bool {
        matches!(self, DayPlan::Rest)
    }

    /// Distance target, if this is a training day.
    pub fn distance_km(&self) -> Option<u32> {
        match self {
            DayPlan::Rest => None,
            DayPlan::Training { distance_km, .. } => Some(*distance_km),
        }
    }

    /// Exercise lines, empty on rest days.
    pub fn exercises(&self) -> &[ExercisePrescription] {
        match self {
            DayPlan::Rest => &[],
            DayPlan::Training { exercises, .. } => exercises,
        }
    }
}
