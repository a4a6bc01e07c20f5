use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the flight dataset.
///
/// Records are immutable once loaded; every derived artifact (filtered view,
/// table rows, chart series) works on clones or borrows of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub flight_number: String,
    pub date: NaiveDate,
    pub airline_code: String,
    pub origin_state: String,
    pub origin_city: String,
    pub destination_city: String,
    /// Departure delay in minutes. Negative values are early departures.
    pub departure_delay: i64,
}

impl FlightRecord {
    /// Calendar month of the flight (1..=12).
    pub fn month(&self) -> u32 {
        chrono::Datelike::month(&self.date)
    }

    /// Build a record from the raw year/month/day components of a CSV row.
    ///
    /// Returns `None` when the components do not name a real calendar date.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        flight_number: impl Into<String>,
        year: i32,
        month: u32,
        day: u32,
        airline_code: impl Into<String>,
        origin_state: impl Into<String>,
        origin_city: impl Into<String>,
        destination_city: impl Into<String>,
        departure_delay: i64,
    ) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self {
            flight_number: flight_number.into(),
            date,
            airline_code: airline_code.into(),
            origin_state: origin_state.into(),
            origin_city: origin_city.into(),
            destination_city: destination_city.into(),
            departure_delay,
        })
    }
}
