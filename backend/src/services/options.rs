//! Dependent option resolution for the cascading state → city filter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::dataset::Dataset;
use crate::models::{FIRST_MONTH, LAST_MONTH};

/// Cities selectable under the current state selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityOptions(BTreeSet<String>);

impl CityOptions {
    pub fn contains(&self, city: &str) -> bool {
        self.0.contains(city)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keep only the cities in `selected` that are still offered.
    pub fn retain_valid(&self, selected: &BTreeSet<String>) -> BTreeSet<String> {
        selected
            .iter()
            .filter(|city| self.contains(city))
            .cloned()
            .collect()
    }
}

impl From<BTreeSet<String>> for CityOptions {
    fn from(cities: BTreeSet<String>) -> Self {
        Self(cities)
    }
}

/// Compute the city options for a state selection.
///
/// Depends only on the states, never on the current city selection, so a
/// stale city choice can never block a state change.
pub fn resolve_city_options(dataset: &Dataset, selected_states: &BTreeSet<String>) -> CityOptions {
    CityOptions(dataset.cities_for_states(selected_states))
}

/// One entry of the month range control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOption {
    pub value: u32,
    pub label: String,
}

/// The month range control always offers the whole year.
pub fn month_options() -> Vec<MonthOption> {
    (FIRST_MONTH..=LAST_MONTH)
        .filter_map(|value| {
            let first_day = NaiveDate::from_ymd_opt(2000, value, 1)?;
            Some(MonthOption {
                value,
                label: first_day.format("%B").to_string(),
            })
        })
        .collect()
}
