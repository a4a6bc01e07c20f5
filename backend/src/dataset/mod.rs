//! Dataset store for flight records.
//!
//! The dataset is loaded once at process start and is read-only afterwards.
//! Derived indices (unique origin states, cities per state) are built on first
//! use and cached for the lifetime of the store.
//!
//! # Lifecycle
//!
//! ```text
//! init_dataset(path) ──► OnceLock<Arc<Dataset>> ──► get_dataset() (read-only)
//! ```
//!
//! A failed load leaves the process handle unset; the server refuses to start.

pub mod loader;

pub use loader::{load_flights_csv, LoadError, REQUIRED_COLUMNS};

use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::models::FlightRecord;

/// Immutable, ordered collection of flight records.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<FlightRecord>,
    index: OnceLock<DatasetIndex>,
}

#[derive(Debug, Default)]
struct DatasetIndex {
    states: BTreeSet<String>,
    cities_by_state: BTreeMap<String, BTreeSet<String>>,
    all_cities: BTreeSet<String>,
}

impl DatasetIndex {
    fn build(records: &[FlightRecord]) -> Self {
        let mut index = DatasetIndex::default();
        for record in records {
            index.states.insert(record.origin_state.clone());
            index.all_cities.insert(record.origin_city.clone());
            index
                .cities_by_state
                .entry(record.origin_state.clone())
                .or_default()
                .insert(record.origin_city.clone());
        }
        index
    }
}

impl Dataset {
    /// Build a store from records already in memory.
    pub fn from_records(records: Vec<FlightRecord>) -> Self {
        Self {
            records,
            index: OnceLock::new(),
        }
    }

    /// Load a store from a CSV file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        load_flights_csv(path)
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn index(&self) -> &DatasetIndex {
        self.index.get_or_init(|| DatasetIndex::build(&self.records))
    }

    /// Distinct origin states, sorted.
    pub fn unique_states(&self) -> &BTreeSet<String> {
        &self.index().states
    }

    /// Distinct origin cities across the whole dataset, sorted.
    pub fn all_cities(&self) -> &BTreeSet<String> {
        &self.index().all_cities
    }

    /// Cities whose origin state is in `states`; every city when `states` is empty.
    pub fn cities_for_states(&self, states: &BTreeSet<String>) -> BTreeSet<String> {
        let index = self.index();
        if states.is_empty() {
            return index.all_cities.clone();
        }
        states
            .iter()
            .filter_map(|state| index.cities_by_state.get(state))
            .flatten()
            .cloned()
            .collect()
    }
}

/// Process-wide dataset, initialized once at startup.
static DATASET: OnceLock<Arc<Dataset>> = OnceLock::new();

/// Load the process-wide dataset from `path`.
///
/// Calling this again after a successful load is a no-op and returns the
/// already loaded dataset.
pub fn init_dataset(path: &Path) -> Result<Arc<Dataset>, LoadError> {
    if let Some(dataset) = DATASET.get() {
        return Ok(Arc::clone(dataset));
    }

    let dataset = Arc::new(Dataset::load(path)?);
    let _ = DATASET.set(Arc::clone(&dataset));
    Ok(Arc::clone(DATASET.get().unwrap_or(&dataset)))
}

/// Get the process-wide dataset.
pub fn get_dataset() -> Result<&'static Arc<Dataset>> {
    DATASET
        .get()
        .context("Dataset not initialized. Call init_dataset() first.")
}
