//! Property-based tests for `DateRange` and `ReservationStatus`.

use super::{DateRange, ReservationStatus};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

// Strategy for generating calendar dates between 2000 and roughly 2100
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..36_500).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset)
    })
}

// Strategy for generating valid ranges of 1 to 60 days
fn range_strategy() -> impl Strategy<Value = DateRange> {
    (date_strategy(), 1i64..=60)
        .prop_map(|(start, len)| DateRange::new(start, start + Duration::days(len)).unwrap())
}

fn status_strategy() -> impl Strategy<Value = ReservationStatus> {
    prop_oneof![
        Just(ReservationStatus::Pending),
        Just(ReservationStatus::Approved),
        Just(ReservationStatus::Cancelled),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Overlap is symmetric
    #[test]
    fn overlap_symmetric(a in range_strategy(), b in range_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    // Every range overlaps itself
    #[test]
    fn overlap_reflexive(a in range_strategy()) {
        prop_assert!(a.overlaps(&a));
    }

    // Overlap matches "some day lies in both ranges"
    #[test]
    fn overlap_matches_shared_day(a in range_strategy(), b in range_strategy()) {
        let shares_day = (0..a.days())
            .map(|offset| a.start() + Duration::days(offset))
            .any(|day| b.start() <= day && day < b.end());
        prop_assert_eq!(a.overlaps(&b), shares_day);
    }

    // A range starting on another's end date never overlaps it
    #[test]
    fn back_to_back_never_overlaps(a in range_strategy(), len in 1i64..=60) {
        let next = DateRange::new(a.end(), a.end() + Duration::days(len)).unwrap();
        prop_assert!(!a.overlaps(&next));
        prop_assert!(!next.overlaps(&a));
    }

    // Construction succeeds exactly when end is after start
    #[test]
    fn construction_requires_end_after_start(start in date_strategy(), end in date_strategy()) {
        prop_assert_eq!(DateRange::new(start, end).is_ok(), end > start);
    }

    // Range length is always positive
    #[test]
    fn days_positive(a in range_strategy()) {
        prop_assert!(a.days() >= 1);
    }

    // Status names parse back to the same status
    #[test]
    fn status_name_round_trip(status in status_strategy()) {
        let parsed: ReservationStatus = status.to_string().parse().unwrap();
        prop_assert_eq!(parsed, status);
    }
}
