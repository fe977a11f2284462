mod common;

use chrono::NaiveDate;
use common::loaded_store;
use environment_reader::forecast::{Selection, SelectionController};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Hour(isize),
    Day(isize),
    SelectHour(usize),
    SelectDay(usize),
    Now(u32),
    Reconcile,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-30isize..30).prop_map(Op::Hour),
        (-10isize..10).prop_map(Op::Day),
        (0usize..400).prop_map(Op::SelectHour),
        (0usize..20).prop_map(Op::SelectDay),
        (0u32..24 * 10).prop_map(Op::Now),
        Just(Op::Reconcile),
    ]
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 12).expect("valid date")
}

proptest! {
    #[test]
    fn pointer_stays_in_range_under_any_operations(
        days in 1usize..10,
        ops in prop::collection::vec(op(), 1..40),
    ) {
        let store = loaded_store(start(), days);
        let mut selection = SelectionController::new();

        for op in ops {
            match op {
                Op::Hour(delta) => selection.navigate_hour(&store, delta),
                Op::Day(delta) => selection.navigate_day(&store, delta),
                Op::SelectHour(idx) => selection.select_hour(&store, idx),
                Op::SelectDay(idx) => selection.select_day(&store, idx),
                Op::Now(hours) => {
                    let now = start().and_hms_opt(0, 30, 0).expect("time")
                        + chrono::Duration::hours(i64::from(hours));
                    selection.go_to_now(&store, now);
                }
                Op::Reconcile => selection.reconcile(&store),
            }
            prop_assert!(selection.hour_index() < store.hourly_len());
            prop_assert!(selection.day_index() < store.daily_len());
        }
    }

    #[test]
    fn hour_navigation_wraps_around_the_series(
        days in 1usize..8,
        first in 0usize..200,
        delta in -500isize..500,
    ) {
        let store = loaded_store(start(), days);
        let len = store.hourly_len();
        let mut selection = SelectionController::new();
        selection.select_hour(&store, first);
        let origin = selection.hour_index();

        selection.navigate_hour(&store, delta);

        let expected = (origin as isize + delta).rem_euclid(len as isize) as usize;
        prop_assert_eq!(selection.hour_index(), expected);
    }

    #[test]
    fn navigation_always_pins_and_now_always_goes_live(
        days in 1usize..8,
        delta in -5isize..5,
        hour in 0u32..48,
    ) {
        let store = loaded_store(start(), days);
        let mut selection = SelectionController::new();

        selection.navigate_day(&store, delta);
        let pinned = matches!(selection.selection(), Selection::Pinned { .. });
        prop_assert!(pinned);

        let now = start().and_hms_opt(0, 0, 0).expect("time") + chrono::Duration::hours(i64::from(hour));
        selection.go_to_now(&store, now);
        prop_assert!(selection.is_live());
    }

    #[test]
    fn selected_hour_and_day_agree_on_the_date(
        days in 1usize..8,
        index in 0usize..24 * 8,
    ) {
        let store = loaded_store(start(), days);
        let mut selection = SelectionController::new();

        selection.select_hour(&store, index);

        let hour_date = store.hourly_time(selection.hour_index()).map(|t| t.date());
        let day_date = store.daily_row(selection.day_index()).map(|d| d.date);
        prop_assert_eq!(hour_date, day_date);
        prop_assert_eq!(selection.pinned_date(), hour_date);
    }

    #[test]
    fn day_steps_land_on_noon(days in 1usize..8, delta in -20isize..20) {
        let store = loaded_store(start(), days);
        let mut selection = SelectionController::new();

        selection.navigate_day(&store, delta);

        let expected_day = delta.rem_euclid(days as isize) as usize;
        prop_assert_eq!(selection.day_index(), expected_day);
        prop_assert_eq!(selection.hour_index(), expected_day * 24 + 12);
    }

    #[test]
    fn pinned_hour_stays_on_pinned_date_after_replace(
        days in 1usize..8,
        pin_hour in prop::option::of(0usize..24 * 8),
        pin_day in 0usize..8,
        shift in -4i64..6,
        new_days in 1usize..10,
    ) {
        let before = loaded_store(start(), days);
        let mut selection = SelectionController::new();
        match pin_hour {
            Some(index) => selection.select_hour(&before, index),
            None => selection.select_day(&before, pin_day),
        }

        let after = loaded_store(start() + chrono::Duration::days(shift), new_days);
        selection.reconcile(&after);

        prop_assert!(selection.hour_index() < after.hourly_len());
        prop_assert!(selection.day_index() < after.daily_len());
        let hour_date = after.hourly_time(selection.hour_index()).map(|t| t.date());
        prop_assert!(selection.pinned_date().is_some());
        prop_assert_eq!(selection.pinned_date(), hour_date);
    }
}
