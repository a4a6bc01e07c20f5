//! CSV loading for the flight dataset.
//!
//! The file is parsed with polars, the required columns are cast to the types
//! the domain expects, and each row is converted into a [`FlightRecord`].
//! Any failure here is startup-fatal for the server.

use log::{debug, info};
use polars::prelude::*;
use std::path::{Path, PathBuf};

use super::Dataset;
use crate::models::FlightRecord;

/// Columns every dataset file must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "YEAR",
    "MONTH",
    "DAY",
    "FLIGHT_NUMBER",
    "AIRLINE_CODE",
    "ORIGIN_STATE",
    "ORIGIN_CITY",
    "DESTINATION_CITY",
    "DEPARTURE_DELAY",
];

const INTEGER_COLUMNS: [&str; 4] = ["YEAR", "MONTH", "DAY", "DEPARTURE_DELAY"];

// FLIGHT_NUMBER is usually inferred as an integer; it is kept as text.
const TEXT_COLUMNS: [&str; 5] = [
    "FLIGHT_NUMBER",
    "AIRLINE_CODE",
    "ORIGIN_STATE",
    "ORIGIN_CITY",
    "DESTINATION_CITY",
];

/// Error raised while loading the dataset. Always unrecoverable.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Cannot read dataset file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset CSV: {0}")]
    Csv(#[from] PolarsError),

    #[error("Dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Row {row}: missing or unparsable value in column {column}")]
    MissingValue { row: usize, column: &'static str },

    #[error("Row {row}: {year}-{month}-{day} is not a calendar date")]
    InvalidDate {
        row: usize,
        year: i64,
        month: i64,
        day: i64,
    },
}

/// Parse a flights CSV file into a [`Dataset`].
pub fn load_flights_csv(path: &Path) -> Result<Dataset, LoadError> {
    std::fs::metadata(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    debug!(
        "Parsed {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    let records = dataframe_to_records(df)?;
    info!(
        "Loaded {} flight records from {}",
        records.len(),
        path.display()
    );
    Ok(Dataset::from_records(records))
}

/// Convert a parsed DataFrame into flight records, preserving row order.
pub fn dataframe_to_records(df: DataFrame) -> Result<Vec<FlightRecord>, LoadError> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !column_names.iter().any(|name| name == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    // Non-strict casts: cells that cannot be converted become null and are
    // reported per row below.
    let mut lazy_df = df.lazy();
    for name in INTEGER_COLUMNS {
        lazy_df = lazy_df.with_column(col(name).cast(DataType::Int64));
    }
    for name in TEXT_COLUMNS {
        lazy_df = lazy_df.with_column(col(name).cast(DataType::String));
    }
    let df = lazy_df.collect()?;

    let years = df.column("YEAR")?.i64()?;
    let months = df.column("MONTH")?.i64()?;
    let days = df.column("DAY")?.i64()?;
    let delays = df.column("DEPARTURE_DELAY")?.i64()?;
    let flight_numbers = df.column("FLIGHT_NUMBER")?.str()?;
    let airlines = df.column("AIRLINE_CODE")?.str()?;
    let origin_states = df.column("ORIGIN_STATE")?.str()?;
    let origin_cities = df.column("ORIGIN_CITY")?.str()?;
    let destination_cities = df.column("DESTINATION_CITY")?.str()?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let year = required(years.get(row), row, "YEAR")?;
        let month = required(months.get(row), row, "MONTH")?;
        let day = required(days.get(row), row, "DAY")?;
        let invalid_date = || LoadError::InvalidDate {
            row,
            year,
            month,
            day,
        };

        let record = FlightRecord::from_parts(
            required(flight_numbers.get(row), row, "FLIGHT_NUMBER")?,
            i32::try_from(year).map_err(|_| invalid_date())?,
            u32::try_from(month).map_err(|_| invalid_date())?,
            u32::try_from(day).map_err(|_| invalid_date())?,
            required(airlines.get(row), row, "AIRLINE_CODE")?,
            required(origin_states.get(row), row, "ORIGIN_STATE")?,
            required(origin_cities.get(row), row, "ORIGIN_CITY")?,
            required(destination_cities.get(row), row, "DESTINATION_CITY")?,
            required(delays.get(row), row, "DEPARTURE_DELAY")?,
        )
        .ok_or_else(invalid_date)?;

        records.push(record);
    }

    Ok(records)
}

fn required<T>(value: Option<T>, row: usize, column: &'static str) -> Result<T, LoadError> {
    value.ok_or(LoadError::MissingValue { row, column })
}
