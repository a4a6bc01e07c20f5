//! Filter-and-recompute pipeline.
//!
//! The pieces are plain functions over the read-only [`Dataset`](crate::dataset::Dataset);
//! only the [`controller`] holds mutable state.
//!
//! - [`options`]: dependent city options for the selected states
//! - [`filtering`]: composition of the active predicates into a filtered view
//! - [`projection`]: table rows and chart series derived from a view
//! - [`fingerprint`]: content digest of a view
//! - [`controller`]: event handling, pruning and publishing

pub mod controller;
pub mod filtering;
pub mod fingerprint;
pub mod options;
pub mod projection;

pub use controller::{FilterEvent, ReactiveController, ViewSnapshot};
pub use filtering::{apply_filters, FilteredView};
pub use fingerprint::fingerprint_view;
pub use options::{month_options, resolve_city_options, CityOptions, MonthOption};
pub use projection::{
    project, AirlineSeries, AxisRange, BoxSummary, ChartAxes, ChartSeries, Projection,
    ScatterPoint, TableRow, DISPLAY_COLUMNS,
};
