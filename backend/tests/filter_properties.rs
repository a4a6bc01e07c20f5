//! Property tests for filter composition.

mod support;

use proptest::prelude::*;
use std::collections::BTreeSet;

use flight_delays::models::{FilterSelection, MonthRange};
use flight_delays::services::{apply_filters, fingerprint_view};

const STATES: [&str; 5] = ["CA", "TX", "NY", "FL", "ZZ"];
const CITIES: [&str; 8] = [
    "Los Angeles",
    "San Francisco",
    "San Diego",
    "Austin",
    "Houston",
    "New York",
    "Miami",
    "Nowhere",
];

fn pick(pool: &'static [&'static str]) -> impl Strategy<Value = BTreeSet<String>> {
    proptest::sample::subsequence(pool.to_vec(), 0..=pool.len())
        .prop_map(|values| values.into_iter().map(String::from).collect())
}

fn month_range() -> impl Strategy<Value = MonthRange> {
    (1u32..=12, 1u32..=12).prop_map(|(a, b)| {
        MonthRange::new(a.min(b), a.max(b)).expect("ordered months are valid")
    })
}

fn selection() -> impl Strategy<Value = FilterSelection> {
    (
        pick(&STATES),
        pick(&CITIES),
        month_range(),
        proptest::option::of(-40i64..130),
    )
        .prop_map(|(states, cities, months, min_delay)| FilterSelection {
            states,
            cities,
            months,
            min_delay,
        })
}

proptest! {
    #[test]
    fn prop_same_selection_same_view(selection in selection()) {
        let dataset = support::mixed_dataset();
        let first = apply_filters(&dataset, &selection);
        let second = apply_filters(&dataset, &selection);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(fingerprint_view(&first), fingerprint_view(&second));
    }

    #[test]
    fn prop_every_row_satisfies_selection(selection in selection()) {
        let dataset = support::mixed_dataset();
        let view = apply_filters(&dataset, &selection);
        for record in view.records() {
            prop_assert!(selection.months.contains(record.month()));
            if let Some(min_delay) = selection.min_delay {
                prop_assert!(record.departure_delay >= min_delay);
            }
            if !selection.states.is_empty() {
                prop_assert!(selection.states.contains(&record.origin_state));
            }
            if !selection.cities.is_empty() {
                prop_assert!(selection.cities.contains(&record.origin_city));
            }
        }
    }

    #[test]
    fn prop_view_is_ordered_subsequence(selection in selection()) {
        let dataset = support::mixed_dataset();
        let view = apply_filters(&dataset, &selection);
        let mut remaining = dataset.records().iter();
        for record in view.records() {
            prop_assert!(remaining.any(|candidate| candidate == record));
        }
    }

    #[test]
    fn prop_empty_categories_are_no_ops(
        months in month_range(),
        min_delay in proptest::option::of(-40i64..130),
    ) {
        let dataset = support::mixed_dataset();
        let selection = FilterSelection::default()
            .with_months(months)
            .with_min_delay(min_delay);
        let view = apply_filters(&dataset, &selection);
        let expected = dataset
            .records()
            .iter()
            .filter(|r| months.contains(r.month()))
            .filter(|r| min_delay.map_or(true, |d| r.departure_delay >= d))
            .count();
        prop_assert_eq!(view.len(), expected);
    }

    #[test]
    fn prop_raising_min_delay_never_grows_view(
        selection in selection(),
        low in -40i64..130,
        raise in 0i64..60,
    ) {
        let dataset = support::mixed_dataset();
        let lower = apply_filters(&dataset, &selection.clone().with_min_delay(Some(low)));
        let higher = apply_filters(&dataset, &selection.with_min_delay(Some(low + raise)));
        prop_assert!(higher.len() <= lower.len());
    }

    #[test]
    fn prop_narrowing_months_never_grows_view(selection in selection()) {
        let dataset = support::mixed_dataset();
        let months = selection.months;
        let narrowed = MonthRange::new(months.min_month(), months.min_month())
            .expect("single month is valid");
        let wide = apply_filters(&dataset, &selection);
        let narrow = apply_filters(&dataset, &selection.clone().with_months(narrowed));
        prop_assert!(narrow.len() <= wide.len());
    }
}
