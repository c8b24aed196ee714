//! Unit tests for the progression formula.

use trainplan::program::{
    progression_for_week, WeekPrescription, BASE, MAX_KM, MAX_REPS, MAX_SERIES, MAX_VOLUME,
};

#[test]
fn test_worked_examples() {
    assert_eq!(progression_for_week(1), WeekPrescription::new(3, 10, 4));
    assert_eq!(progression_for_week(7), WeekPrescription::new(15, 20, 14));
    // Series and reps both capped, reps then cut to the volume ceiling
    assert_eq!(progression_for_week(20), WeekPrescription::new(20, 15, 28));
}

#[test]
fn test_week_zero_is_week_one() {
    assert_eq!(progression_for_week(0), BASE);
}

#[test]
fn test_caps_hold_for_long_programs() {
    for week in 1..=520 {
        let p = progression_for_week(week);
        assert!(p.series <= MAX_SERIES, "series over cap in week {}", week);
        assert!(p.reps <= MAX_REPS, "reps over cap in week {}", week);
        assert!(p.km <= MAX_KM, "km over cap in week {}", week);
        assert!(p.volume() <= MAX_VOLUME, "volume over cap in week {}", week);
    }
}

#[test]
fn test_distance_plateaus() {
    assert_eq!(progression_for_week(22).km, MAX_KM);
    assert_eq!(progression_for_week(52).km, MAX_KM);
}

#[test]
fn test_huge_week_does_not_overflow() {
    let p = progression_for_week(u32::MAX);
    assert_eq!(p.series, MAX_SERIES);
    assert_eq!(p.km, MAX_KM);
    assert_eq!(p.volume(), MAX_VOLUME);
}
