//! Week-over-week progression rule.
//!
//! Series grow by two per week, reps by two per week during the first six
//! weeks and by one afterwards, distance by two km per week and then by two
//! km every other week. Every output is capped, and the reps are cut back
//! whenever series × reps would exceed the volume ceiling.

use super::types::WeekPrescription;

/// Week-1 prescription.
pub const BASE: WeekPrescription = WeekPrescription::new(3, 10, 4);

/// Maximum number of series.
pub const MAX_SERIES: u32 = 20;

/// Maximum repetitions per series.
pub const MAX_REPS: u32 = 30;

/// Maximum total repetitions (series × reps) in one exercise.
pub const MAX_VOLUME: u32 = 300;

/// Maximum distance in km.
pub const MAX_KM: u32 = 30;

/// Last week of the initial ramp.
const RAMP_WEEKS: u32 = 6;

/// Formula prescription for a week, ignoring manual overrides.
///
/// Weeks are 1-based; week 0 is treated as week 1.
pub fn progression_for_week(week: u32) -> WeekPrescription {
    let week = week.max(1);
    let elapsed = week - 1;

    let series = BASE
        .series
        .saturating_add(elapsed.saturating_mul(2))
        .min(MAX_SERIES);

    let reps = if week <= RAMP_WEEKS {
        BASE.reps + elapsed * 2
    } else {
        (BASE.reps + 10).saturating_add(week - (RAMP_WEEKS + 1))
    }
    .min(MAX_REPS);

    let km = if week <= RAMP_WEEKS {
        BASE.km + elapsed * 2
    } else {
        14u32.saturating_add(((week - RAMP_WEEKS) / 2).saturating_mul(2))
    }
    .min(MAX_KM);

    // Series are never reduced to satisfy the ceiling
    let reps = if series * reps > MAX_VOLUME {
        MAX_VOLUME / series
    } else {
        reps
    };

    WeekPrescription { series, reps, km }
}
