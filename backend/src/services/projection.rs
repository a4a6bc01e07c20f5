//! Projection of a filtered view into table rows and chart series.
//!
//! Both artifacts are derived from the same [`FilteredView`], so the table and
//! the chart always describe exactly the same rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::filtering::FilteredView;
use crate::models::FlightRecord;

/// Headroom added below the smallest delay on the chart's y-axis.
pub const Y_AXIS_HEADROOM: i64 = 10;

/// Tukey fence multiplier for box-plot outliers.
const FENCE_FACTOR: f64 = 1.5;

/// Column headers of the table, in display order.
pub const DISPLAY_COLUMNS: [&str; 6] = [
    "FLIGHT_NUMBER",
    "DATE_FLIGHT",
    "AIRLINE_CODE",
    "ORIGIN_CITY",
    "DESTINATION_CITY",
    "DEPARTURE_DELAY",
];

/// A record restricted to the displayed columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub flight_number: String,
    pub date: NaiveDate,
    pub airline_code: String,
    pub origin_city: String,
    pub destination_city: String,
    pub departure_delay: i64,
}

impl From<&FlightRecord> for TableRow {
    fn from(record: &FlightRecord) -> Self {
        Self {
            flight_number: record.flight_number.clone(),
            date: record.date,
            airline_code: record.airline_code.clone(),
            origin_city: record.origin_city.clone(),
            destination_city: record.destination_city.clone(),
            departure_delay: record.departure_delay,
        }
    }
}

/// One scatter point: x = airline, y = delay, labelled with its origin city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub airline_code: String,
    pub departure_delay: i64,
    pub origin_city: String,
}

/// Box-plot summary for one airline's delays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub count: usize,
    pub mean: f64,
    pub min: i64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: i64,
    /// Lowest value inside the lower Tukey fence (whisker end).
    pub lower_fence: i64,
    /// Highest value inside the upper Tukey fence (whisker end).
    pub upper_fence: i64,
    pub outliers: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineSeries {
    pub airline_code: String,
    pub points: Vec<ScatterPoint>,
    pub summary: BoxSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartAxes {
    pub x_title: String,
    pub y_title: String,
    pub y_range: AxisRange,
}

/// Chart payload. An empty view is an explicit `NoData`, never a NaN range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartSeries {
    NoData,
    Ready {
        axes: ChartAxes,
        groups: Vec<AirlineSeries>,
        total_count: usize,
    },
}

impl ChartSeries {
    pub fn is_no_data(&self) -> bool {
        matches!(self, ChartSeries::NoData)
    }
}

/// Both artifacts derived from one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub table: Vec<TableRow>,
    pub chart: ChartSeries,
}

/// Derive table rows and chart series from a filtered view.
pub fn project(view: &FilteredView) -> Projection {
    Projection {
        table: table_rows(view),
        chart: chart_series(view),
    }
}

/// Table rows in view order. Paging and sorting are left to the renderer.
pub fn table_rows(view: &FilteredView) -> Vec<TableRow> {
    view.records().iter().map(TableRow::from).collect()
}

/// Y-axis range `[min - headroom, max]` over the view, or `None` if empty.
pub fn y_axis_range(view: &FilteredView) -> Option<AxisRange> {
    let delays = view.records().iter().map(|r| r.departure_delay);
    let min = delays.clone().min()?;
    let max = delays.max()?;
    Some(AxisRange {
        min: min.saturating_sub(Y_AXIS_HEADROOM),
        max,
    })
}

/// Per-airline scatter points and box summaries, airlines in sorted order.
pub fn chart_series(view: &FilteredView) -> ChartSeries {
    let Some(y_range) = y_axis_range(view) else {
        return ChartSeries::NoData;
    };

    let mut grouped: BTreeMap<&str, Vec<&FlightRecord>> = BTreeMap::new();
    for record in view.records() {
        grouped
            .entry(record.airline_code.as_str())
            .or_default()
            .push(record);
    }

    let groups = grouped
        .into_iter()
        .filter_map(|(airline_code, records)| {
            let delays: Vec<i64> = records.iter().map(|r| r.departure_delay).collect();
            let summary = compute_box_summary(&delays)?;
            let points = records
                .iter()
                .map(|r| ScatterPoint {
                    airline_code: r.airline_code.clone(),
                    departure_delay: r.departure_delay,
                    origin_city: r.origin_city.clone(),
                })
                .collect();
            Some(AirlineSeries {
                airline_code: airline_code.to_string(),
                points,
                summary,
            })
        })
        .collect();

    ChartSeries::Ready {
        axes: ChartAxes {
            x_title: "Airline".to_string(),
            y_title: "Delay".to_string(),
            y_range,
        },
        groups,
        total_count: view.len(),
    }
}

/// Quantile of sorted values using linear interpolation between closest ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Compute box-plot statistics for a set of delays. `None` for no values.
pub fn compute_box_summary(values: &[i64]) -> Option<BoxSummary> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let sum: i128 = values.iter().map(|&v| i128::from(v)).sum();
    let mean = sum as f64 / count as f64;

    let mut sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let low_limit = q1 - FENCE_FACTOR * iqr;
    let high_limit = q3 + FENCE_FACTOR * iqr;

    let is_outlier = |v: i64| (v as f64) < low_limit || (v as f64) > high_limit;
    let inliers = values.iter().copied().filter(|&v| !is_outlier(v));
    // q1..=q3 always holds at least one value, so inliers is never empty.
    let lower_fence = inliers.clone().min().unwrap_or(q1 as i64);
    let upper_fence = inliers.max().unwrap_or(q3 as i64);
    let outliers = values.iter().copied().filter(|&v| is_outlier(v)).collect();

    Some(BoxSummary {
        count,
        mean,
        min: values.iter().copied().min().unwrap_or_default(),
        q1,
        median,
        q3,
        max: values.iter().copied().max().unwrap_or_default(),
        lower_fence,
        upper_fence,
        outliers,
    })
}
