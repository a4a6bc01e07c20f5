//! Data Transfer Objects for the HTTP API.
//!
//! Snapshot, table and chart payloads are the service types themselves; the
//! types here only cover request bodies and the smaller responses.

use serde::{Deserialize, Serialize};

pub use crate::services::{ChartSeries, MonthOption, TableRow, ViewSnapshot};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Number of records in the loaded dataset
    pub records: usize,
}

/// Options for every input control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub states: Vec<String>,
    /// Cities offered for the currently selected states
    pub cities: Vec<String>,
    pub months: Vec<MonthOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatesRequest {
    #[serde(default)]
    pub states: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitiesRequest {
    #[serde(default)]
    pub cities: Vec<String>,
}

/// Month bounds are validated by the controller, not by deserialization, so
/// bad ranges come back as `INVALID_SELECTION`. Signed fields let negative
/// months reach that check instead of failing in the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthsRequest {
    pub min_month: i64,
    pub max_month: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinDelayRequest {
    /// `null` or absent disables the delay filter
    #[serde(default)]
    pub min_delay: Option<i64>,
}

/// Table payload for the current view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableResponse {
    pub generation: u64,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
    pub total: usize,
}

/// Chart payload for the current view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    pub generation: u64,
    pub chart: ChartSeries,
}
