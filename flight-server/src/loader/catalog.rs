//! Catalog snapshot loading.
//!
//! Parses the flight catalog JSON and validates every record before it
//! reaches the core: malformed codes, times or prices and zero capacities
//! are rejected here, so the catalog and inventory only ever see valid
//! flights.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::catalog::Catalog;
use crate::domain::{AirportCode, ClockTime, FlightId, FlightRecord, Price};
use crate::inventory::SeatInventory;

/// Error returned when a catalog file cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    /// The file could not be read
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON of the expected shape
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record failed domain validation
    #[error("flight {id:?}: {reason}")]
    InvalidFlight {
        /// The offending record's id field, verbatim
        id: String,
        /// What was wrong with it
        reason: String,
    },

    /// Two records share one flight id
    #[error("duplicate flight id: {0}")]
    DuplicateFlight(String),
}

/// A loaded catalog with its matching seat inventory.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    /// Price indices per route.
    pub catalog: Catalog,
    /// Seat counters, one per flight, at full capacity.
    pub inventory: SeatInventory,
}

/// On-disk shape of the catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    flights: Vec<FlightSpec>,
}

#[derive(Debug, Deserialize)]
struct FlightSpec {
    id: String,
    origin: String,
    destination: String,
    departure: String,
    arrival: String,
    price: f64,
    capacity: u32,
}

/// Load and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<CatalogSnapshot, CatalogLoadError> {
    let contents = std::fs::read_to_string(path)?;
    let snapshot = parse_catalog(&contents)?;
    info!(
        path = %path.display(),
        flights = snapshot.inventory.flight_count(),
        routes = snapshot.catalog.route_count(),
        "catalog loaded"
    );
    Ok(snapshot)
}

/// Parse and validate catalog JSON.
pub fn parse_catalog(json: &str) -> Result<CatalogSnapshot, CatalogLoadError> {
    let file: CatalogFile = serde_json::from_str(json)?;
    let snapshot = CatalogSnapshot::default();

    for spec in file.flights {
        let record = validate_flight(&spec)?;
        let record = Arc::new(record);
        if !snapshot.inventory.register(&record) {
            return Err(CatalogLoadError::DuplicateFlight(spec.id));
        }
        snapshot.catalog.add_flight(record);
    }

    Ok(snapshot)
}

fn validate_flight(spec: &FlightSpec) -> Result<FlightRecord, CatalogLoadError> {
    let invalid = |reason: String| CatalogLoadError::InvalidFlight {
        id: spec.id.clone(),
        reason,
    };

    let id = FlightId::parse(&spec.id).map_err(|e| invalid(e.to_string()))?;
    let origin = AirportCode::parse(&spec.origin).map_err(|e| invalid(e.to_string()))?;
    let destination = AirportCode::parse(&spec.destination).map_err(|e| invalid(e.to_string()))?;
    let departure = ClockTime::parse_hhmm(&spec.departure).map_err(|e| invalid(e.to_string()))?;
    let arrival = ClockTime::parse_hhmm(&spec.arrival).map_err(|e| invalid(e.to_string()))?;
    let price = Price::from_major(spec.price).map_err(|e| invalid(e.to_string()))?;

    FlightRecord::new(id, origin, destination, departure, arrival, price, spec.capacity)
        .map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID: &str = r#"{
        "flights": [
            {
                "id": "FL123",
                "origin": "LAX",
                "destination": "ATL",
                "departure": "08:00",
                "arrival": "10:00",
                "price": 500,
                "capacity": 180
            },
            {
                "id": "FL124",
                "origin": "LAX",
                "destination": "ATL",
                "departure": "09:00",
                "arrival": "11:00",
                "price": 300,
                "capacity": 120
            },
            {
                "id": "FL125",
                "origin": "LAX",
                "destination": "JFK",
                "departure": "12:00",
                "arrival": "14:00",
                "price": 450.50,
                "capacity": 90
            }
        ]
    }"#;

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    #[test]
    fn parse_valid_catalog() {
        let snapshot = parse_catalog(VALID).unwrap();

        assert_eq!(snapshot.catalog.route_count(), 2);
        assert_eq!(snapshot.inventory.flight_count(), 3);

        let found = snapshot
            .catalog
            .nearest(code("LAX"), code("ATL"), Price::from_major(460.0).unwrap())
            .unwrap();
        assert_eq!(found.id.as_str(), "FL123");
        assert_eq!(
            snapshot.inventory.seats_remaining(&found.id),
            Some(180)
        );
    }

    #[test]
    fn reject_malformed_json() {
        assert!(matches!(
            parse_catalog("not json").unwrap_err(),
            CatalogLoadError::Parse(_)
        ));
        // A negative capacity does not fit u32
        let json = r#"{"flights": [{"id": "FL1", "origin": "LAX", "destination": "ATL",
            "departure": "08:00", "arrival": "10:00", "price": 100, "capacity": -5}]}"#;
        assert!(matches!(
            parse_catalog(json).unwrap_err(),
            CatalogLoadError::Parse(_)
        ));
    }

    fn spec_with(field: &str, value: &str) -> String {
        let mut flight = serde_json::json!({
            "id": "FL123",
            "origin": "LAX",
            "destination": "ATL",
            "departure": "08:00",
            "arrival": "10:00",
            "price": 500,
            "capacity": 180
        });
        flight[field] = serde_json::from_str(value).unwrap();
        serde_json::json!({ "flights": [flight] }).to_string()
    }

    #[test]
    fn reject_invalid_fields() {
        for (field, value) in [
            ("id", "\"fl123\""),
            ("origin", "\"L\""),
            ("destination", "\"atl\""),
            ("departure", "\"8:00\""),
            ("arrival", "\"25:00\""),
            ("price", "-10"),
            ("capacity", "0"),
        ] {
            let json = spec_with(field, value);
            let err = parse_catalog(&json).unwrap_err();
            assert!(
                matches!(err, CatalogLoadError::InvalidFlight { .. }),
                "field {field} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn reject_same_endpoints() {
        let json = spec_with("destination", "\"LAX\"");
        let err = parse_catalog(&json).unwrap_err();
        assert!(matches!(err, CatalogLoadError::InvalidFlight { .. }));
    }

    #[test]
    fn reject_duplicate_flight_ids() {
        let json = r#"{"flights": [
            {"id": "FL123", "origin": "LAX", "destination": "ATL",
             "departure": "08:00", "arrival": "10:00", "price": 500, "capacity": 180},
            {"id": "FL123", "origin": "LAX", "destination": "JFK",
             "departure": "09:00", "arrival": "11:00", "price": 300, "capacity": 120}
        ]}"#;

        let err = parse_catalog(json).unwrap_err();
        assert!(matches!(err, CatalogLoadError::DuplicateFlight(id) if id == "FL123"));
    }

    #[test]
    fn empty_catalog_is_allowed() {
        let snapshot = parse_catalog(r#"{"flights": []}"#).unwrap();
        assert_eq!(snapshot.catalog.route_count(), 0);
        assert_eq!(snapshot.inventory.flight_count(), 0);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        let snapshot = load_catalog(file.path()).unwrap();
        assert_eq!(snapshot.inventory.flight_count(), 3);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_catalog(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io(_)));
    }
}
