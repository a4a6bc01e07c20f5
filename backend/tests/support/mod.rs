#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;

use flight_delays::dataset::Dataset;
use flight_delays::models::FlightRecord;
use tempfile::NamedTempFile;

pub const CSV_HEADER: &str = "YEAR,MONTH,DAY,FLIGHT_NUMBER,AIRLINE_CODE,ORIGIN_STATE,ORIGIN_CITY,DESTINATION_CITY,DEPARTURE_DELAY";

pub fn flight(
    flight_number: &str,
    month: u32,
    airline: &str,
    state: &str,
    city: &str,
    delay: i64,
) -> FlightRecord {
    FlightRecord::from_parts(flight_number, 2015, month, 1, airline, state, city, "Chicago", delay)
        .expect("valid fixture date")
}

/// Three flights: (CA, LA, 5, Jan), (CA, SF, 70, Mar), (TX, Austin, -5, Jun).
pub fn three_flight_dataset() -> Arc<Dataset> {
    Arc::new(Dataset::from_records(vec![
        flight("101", 1, "AA", "CA", "LA", 5),
        flight("202", 3, "UA", "CA", "SF", 70),
        flight("303", 6, "WN", "TX", "Austin", -5),
    ]))
}

/// A larger dataset spread over several states, cities, airlines and months.
pub fn mixed_dataset() -> Arc<Dataset> {
    let places = [
        ("CA", "Los Angeles"),
        ("CA", "San Francisco"),
        ("CA", "San Diego"),
        ("TX", "Austin"),
        ("TX", "Houston"),
        ("NY", "New York"),
        ("FL", "Miami"),
    ];
    let airlines = ["AA", "DL", "UA", "WN"];

    let records = (0..120)
        .map(|i: i64| {
            let (state, city) = places[(i as usize * 5) % places.len()];
            let airline = airlines[(i as usize * 3) % airlines.len()];
            let month = (i % 12) as u32 + 1;
            let delay = (i * 37) % 150 - 30;
            flight(&format!("{}", 1000 + i), month, airline, state, city, delay)
        })
        .collect();
    Arc::new(Dataset::from_records(records))
}

/// Write CSV `rows` (without header) to a temp file.
pub fn write_csv(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "{}", CSV_HEADER).expect("write header");
    for row in rows {
        writeln!(file, "{}", row).expect("write row");
    }
    file
}
