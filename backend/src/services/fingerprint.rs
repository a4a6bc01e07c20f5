//! Content fingerprints for filtered views.

use sha2::{Digest, Sha256};

use super::filtering::FilteredView;

/// Fingerprint of a view's rows, in order.
///
/// Every field is written followed by a unit separator and every record by a
/// record separator, so adjacent values cannot run into each other.
pub fn fingerprint_view(view: &FilteredView) -> String {
    let mut hasher = Sha256::new();
    for record in view.records() {
        let date = record.date.to_string();
        let delay = record.departure_delay.to_string();
        let fields = [
            record.flight_number.as_str(),
            date.as_str(),
            record.airline_code.as_str(),
            record.origin_state.as_str(),
            record.origin_city.as_str(),
            record.destination_city.as_str(),
            delay.as_str(),
        ];
        for field in fields {
            hasher.update(field.as_bytes());
            hasher.update([0x1f]);
        }
        hasher.update([0x1e]);
    }
    hex::encode(hasher.finalize())
}
