//! Filter composition over the dataset.
//!
//! Each dimension is an independent predicate; the view keeps a record only if
//! every active predicate accepts it. Within a dimension the selected values
//! are OR-combined. Row order of the dataset is preserved.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::models::{FilterSelection, FlightRecord};

/// Materialized result of applying a selection to the dataset.
///
/// Always replaced wholesale when the selection changes, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilteredView {
    records: Vec<FlightRecord>,
}

impl FilteredView {
    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<FlightRecord>> for FilteredView {
    fn from(records: Vec<FlightRecord>) -> Self {
        Self { records }
    }
}

/// Month predicate. Always active; the default range is the whole year.
fn month_matches(record: &FlightRecord, selection: &FilterSelection) -> bool {
    selection.months.contains(record.month())
}

/// Delay predicate. A missing threshold disables it (it is not zero).
fn delay_matches(record: &FlightRecord, selection: &FilterSelection) -> bool {
    selection
        .min_delay
        .map_or(true, |min_delay| record.departure_delay >= min_delay)
}

fn state_matches(record: &FlightRecord, selection: &FilterSelection) -> bool {
    selection.states.is_empty() || selection.states.contains(&record.origin_state)
}

fn city_matches(record: &FlightRecord, selection: &FilterSelection) -> bool {
    selection.cities.is_empty() || selection.cities.contains(&record.origin_city)
}

/// Check a single record against every active dimension.
pub fn matches(record: &FlightRecord, selection: &FilterSelection) -> bool {
    month_matches(record, selection)
        && delay_matches(record, selection)
        && state_matches(record, selection)
        && city_matches(record, selection)
}

/// Apply `selection` to `dataset`, producing a stable, deterministic view.
pub fn apply_filters(dataset: &Dataset, selection: &FilterSelection) -> FilteredView {
    let records: Vec<FlightRecord> = dataset
        .records()
        .iter()
        .filter(|record| matches(record, selection))
        .cloned()
        .collect();

    log::debug!(
        "Filtered {} of {} records (states={}, cities={}, months={}..={}, min_delay={:?})",
        records.len(),
        dataset.len(),
        selection.states.len(),
        selection.cities.len(),
        selection.months.min_month(),
        selection.months.max_month(),
        selection.min_delay
    );

    FilteredView { records }
}
