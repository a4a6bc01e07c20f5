//! Reactive controller: owns the filter selection and republishes derived
//! artifacts whenever an input event arrives.
//!
//! # Recompute graph
//!
//! ```text
//! StatesChanged / Reset ──► resolve city options ──► prune stale cities ─┐
//!                                                                        ▼
//! CitiesChanged / MonthRangeChanged / MinDelayChanged ──────────► apply filters
//!                                                                        │
//!                                                   project ◄────────────┘
//!                                                      │
//!                                                   publish (watch channel)
//! ```
//!
//! Each event is resolved completely before `handle` returns. Rejected events
//! leave the previous selection and snapshot untouched. The recomputing phase
//! lasts exactly as long as the `&mut self` borrow taken by `handle`, so any
//! caller holding the controller only ever sees it idle, with the published
//! snapshot matching its current selection.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::watch;

use super::filtering::{apply_filters, FilteredView};
use super::fingerprint::fingerprint_view;
use super::options::{resolve_city_options, CityOptions};
use super::projection::{project, ChartSeries, TableRow};
use crate::dataset::Dataset;
use crate::models::{FilterSelection, MonthRange, SelectionError};

/// A discrete change of one input control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FilterEvent {
    StatesChanged { states: Vec<String> },
    CitiesChanged { cities: Vec<String> },
    MonthRangeChanged { min_month: u32, max_month: u32 },
    MinDelayChanged { min_delay: Option<i64> },
    Reset,
}

impl FilterEvent {
    /// Whether this event can change the city options.
    fn affects_options(&self) -> bool {
        matches!(self, FilterEvent::StatesChanged { .. } | FilterEvent::Reset)
    }
}

/// Everything the consumers need after one publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    /// Increases by one per accepted event; the most recent value wins.
    pub generation: u64,
    pub selection: FilterSelection,
    pub city_options: CityOptions,
    pub row_count: usize,
    pub table: Vec<TableRow>,
    pub chart: ChartSeries,
    pub fingerprint: String,
}

pub struct ReactiveController {
    dataset: Arc<Dataset>,
    selection: FilterSelection,
    city_options: CityOptions,
    view: FilteredView,
    generation: u64,
    publisher: watch::Sender<Arc<ViewSnapshot>>,
}

impl ReactiveController {
    /// Create a controller with the default (unconstrained) selection and
    /// publish its first snapshot as generation 0.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let selection = FilterSelection::default();
        let city_options = resolve_city_options(&dataset, &selection.states);
        let view = apply_filters(&dataset, &selection);
        let snapshot = build_snapshot(0, &selection, &city_options, &view);
        let (publisher, _) = watch::channel(Arc::new(snapshot));

        Self {
            dataset,
            selection,
            city_options,
            view,
            generation: 0,
            publisher,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn city_options(&self) -> &CityOptions {
        &self.city_options
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<ViewSnapshot> {
        self.publisher.borrow().clone()
    }

    /// Subscribe to published snapshots. Receivers only see the latest one.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewSnapshot>> {
        self.publisher.subscribe()
    }

    /// Apply one input event and publish the recomputed artifacts.
    pub fn handle(&mut self, event: FilterEvent) -> Result<Arc<ViewSnapshot>, SelectionError> {
        let recompute_options = event.affects_options();
        let next = self.next_selection(event)?;

        self.selection = next;
        if recompute_options {
            self.refresh_city_options();
        }
        self.view = apply_filters(&self.dataset, &self.selection);

        Ok(self.publish())
    }

    /// Validate an event against the current state and build the selection it
    /// asks for. Nothing is mutated here.
    fn next_selection(&self, event: FilterEvent) -> Result<FilterSelection, SelectionError> {
        let mut next = self.selection.clone();
        match event {
            FilterEvent::StatesChanged { states } => {
                next.states = states.into_iter().collect();
            }
            FilterEvent::CitiesChanged { cities } => {
                let requested: BTreeSet<String> = cities.into_iter().collect();
                let kept = self.city_options.retain_valid(&requested);
                if kept.len() != requested.len() {
                    warn!(
                        "Dropped {} city selection(s) not offered for the current states",
                        requested.len() - kept.len()
                    );
                }
                next.cities = kept;
            }
            FilterEvent::MonthRangeChanged {
                min_month,
                max_month,
            } => {
                next.months = MonthRange::new(min_month, max_month).inspect_err(|e| {
                    warn!("Rejected month range change: {}", e);
                })?;
            }
            FilterEvent::MinDelayChanged { min_delay } => {
                next.min_delay = min_delay;
            }
            FilterEvent::Reset => {
                next = FilterSelection::default();
            }
        }
        Ok(next)
    }

    /// Recompute city options for the selected states and drop any selected
    /// city that is no longer offered.
    fn refresh_city_options(&mut self) {
        self.city_options = resolve_city_options(&self.dataset, &self.selection.states);
        let kept = self.city_options.retain_valid(&self.selection.cities);
        if kept.len() != self.selection.cities.len() {
            info!(
                "Pruned {} stale city selection(s) after state change",
                self.selection.cities.len() - kept.len()
            );
            self.selection.cities = kept;
        }
    }

    fn publish(&mut self) -> Arc<ViewSnapshot> {
        self.generation += 1;
        let snapshot = Arc::new(build_snapshot(
            self.generation,
            &self.selection,
            &self.city_options,
            &self.view,
        ));
        self.publisher.send_replace(Arc::clone(&snapshot));

        debug!(
            "Published generation {} ({} rows, fingerprint {})",
            snapshot.generation, snapshot.row_count, snapshot.fingerprint
        );
        snapshot
    }
}

fn build_snapshot(
    generation: u64,
    selection: &FilterSelection,
    city_options: &CityOptions,
    view: &FilteredView,
) -> ViewSnapshot {
    let projection = project(view);
    ViewSnapshot {
        generation,
        selection: selection.clone(),
        city_options: city_options.clone(),
        row_count: view.len(),
        table: projection.table,
        chart: projection.chart,
        fingerprint: fingerprint_view(view),
    }
}
