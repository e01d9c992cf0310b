//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{AirportCode, FlightRecord, Itinerary, Leg, LegOutcome};
use crate::planner::RoutePath;

/// Query for the shortest route between two airports.
#[derive(Debug, Deserialize)]
pub struct ShortestRouteQuery {
    /// Start airport code
    pub origin: String,

    /// Target airport code
    pub destination: String,
}

/// Query for the nearest-price flight on a route.
#[derive(Debug, Deserialize)]
pub struct FlightSearchQuery {
    /// Start airport code
    pub origin: String,

    /// Target airport code
    pub destination: String,

    /// Target fare in major units, e.g. "460" or "460.00"
    pub price: String,
}

/// Request to plan and book a full itinerary.
#[derive(Debug, Deserialize)]
pub struct PlanItineraryRequest {
    /// Start airport code
    pub origin: String,

    /// Target airport code
    pub destination: String,

    /// Target fare per leg, major units
    pub target_price: f64,
}

/// Request to book one seat on a flight.
#[derive(Debug, Deserialize)]
pub struct BookFlightRequest {
    /// Flight identifier, e.g. "FL123"
    pub flight_id: String,
}

/// Request to cancel one booking on a flight.
#[derive(Debug, Deserialize)]
pub struct CancelFlightRequest {
    /// Flight identifier, e.g. "FL123"
    pub flight_id: String,
}

/// A flight in API responses.
#[derive(Debug, Serialize)]
pub struct FlightResult {
    /// Flight identifier
    pub flight_id: String,

    /// Departure airport code
    pub origin: String,

    /// Arrival airport code
    pub destination: String,

    /// Scheduled departure, "HH:MM"
    pub departure: String,

    /// Scheduled arrival, "HH:MM"
    pub arrival: String,

    /// Fare in major units, e.g. "450.00"
    pub price: String,

    /// Total seat capacity
    pub capacity: u32,

    /// Seats currently left, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats_remaining: Option<u32>,
}

impl FlightResult {
    /// Build from a record plus an optional live seat count.
    pub fn from_record(record: &FlightRecord, seats_remaining: Option<u32>) -> Self {
        Self {
            flight_id: record.id.to_string(),
            origin: record.origin.to_string(),
            destination: record.destination.to_string(),
            departure: record.departure.to_string(),
            arrival: record.arrival.to_string(),
            price: record.price.to_string(),
            capacity: record.capacity,
            seats_remaining,
        }
    }
}

/// Response for a shortest-route query.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Start airport code
    pub origin: String,

    /// Target airport code
    pub destination: String,

    /// Whether any path exists
    pub reachable: bool,

    /// Total distance in kilometres, when reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance_km: Option<u64>,

    /// The airport sequence, empty when unreachable
    pub airports: Vec<String>,
}

impl RouteResponse {
    /// Response for a found path.
    pub fn found(path: &RoutePath) -> Self {
        Self {
            origin: path
                .airports
                .first()
                .map(ToString::to_string)
                .unwrap_or_default(),
            destination: path
                .airports
                .last()
                .map(ToString::to_string)
                .unwrap_or_default(),
            reachable: true,
            total_distance_km: Some(path.total_distance),
            airports: path.airports.iter().map(ToString::to_string).collect(),
        }
    }

    /// Response for an unreachable pair.
    pub fn unreachable(origin: AirportCode, destination: AirportCode) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            reachable: false,
            total_distance_km: None,
            airports: Vec::new(),
        }
    }
}

/// Response for a nearest-price search.
#[derive(Debug, Serialize)]
pub struct FlightSearchResponse {
    /// The closest-priced flight, absent when the route has none
    pub flight: Option<FlightResult>,
}

/// Response for a booking or cancellation.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    /// Flight identifier
    pub flight_id: String,

    /// Seats left after the operation
    pub seats_remaining: u32,
}

/// One leg of a planned itinerary.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// Departure airport code
    pub origin: String,

    /// Arrival airport code
    pub destination: String,

    /// "booked", "sold_out" or "no_flight"
    pub outcome: String,

    /// The matched flight, absent when the route has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight: Option<FlightResult>,
}

impl From<&Leg> for LegResult {
    fn from(leg: &Leg) -> Self {
        let (outcome, flight) = match &leg.outcome {
            LegOutcome::Booked {
                flight,
                seats_remaining,
            } => (
                "booked",
                Some(FlightResult::from_record(flight, Some(*seats_remaining))),
            ),
            LegOutcome::SoldOut { flight } => {
                ("sold_out", Some(FlightResult::from_record(flight, Some(0))))
            }
            LegOutcome::NoFlight => ("no_flight", None),
        };

        Self {
            origin: leg.origin.to_string(),
            destination: leg.destination.to_string(),
            outcome: outcome.to_string(),
            flight,
        }
    }
}

/// Response for an itinerary planning request.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    /// Start airport code
    pub origin: String,

    /// Target airport code
    pub destination: String,

    /// "complete", "partial" or "no_route"
    pub status: String,

    /// Total route distance in kilometres
    pub total_distance_km: u64,

    /// Legs in travel order
    pub legs: Vec<LegResult>,
}

impl From<&Itinerary> for ItineraryResponse {
    fn from(itinerary: &Itinerary) -> Self {
        Self {
            origin: itinerary.origin().to_string(),
            destination: itinerary.destination().to_string(),
            status: itinerary.status().to_string(),
            total_distance_km: itinerary.total_distance(),
            legs: itinerary.legs().iter().map(LegResult::from).collect(),
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, FlightId, Price};
    use std::sync::Arc;

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn record() -> FlightRecord {
        FlightRecord::new(
            FlightId::parse("FL123").unwrap(),
            code("JFK"),
            code("LAX"),
            ClockTime::parse_hhmm("08:00").unwrap(),
            ClockTime::parse_hhmm("11:30").unwrap(),
            Price::from_major(450.0).unwrap(),
            180,
        )
        .unwrap()
    }

    #[test]
    fn flight_result_formats_fields() {
        let result = FlightResult::from_record(&record(), Some(12));
        assert_eq!(result.flight_id, "FL123");
        assert_eq!(result.departure, "08:00");
        assert_eq!(result.arrival, "11:30");
        assert_eq!(result.price, "450.00");
        assert_eq!(result.seats_remaining, Some(12));
    }

    #[test]
    fn flight_result_omits_unknown_seats() {
        let json = serde_json::to_value(FlightResult::from_record(&record(), None)).unwrap();
        assert!(json.get("seats_remaining").is_none());
        assert_eq!(json["price"], "450.00");
    }

    #[test]
    fn route_response_found() {
        let path = RoutePath {
            airports: vec![code("JFK"), code("ORD"), code("LAX")],
            total_distance: 2540,
        };
        let response = RouteResponse::found(&path);

        assert_eq!(response.origin, "JFK");
        assert_eq!(response.destination, "LAX");
        assert!(response.reachable);
        assert_eq!(response.total_distance_km, Some(2540));
        assert_eq!(response.airports, vec!["JFK", "ORD", "LAX"]);
    }

    #[test]
    fn route_response_unreachable_omits_distance() {
        let response = RouteResponse::unreachable(code("JFK"), code("HND"));
        assert!(!response.reachable);

        let json = serde_json::to_value(response).unwrap();
        assert!(json.get("total_distance_km").is_none());
        assert_eq!(json["airports"], serde_json::json!([]));
    }

    #[test]
    fn leg_result_outcomes() {
        let flight = Arc::new(record());

        let booked = LegResult::from(&Leg::new(
            code("JFK"),
            code("LAX"),
            LegOutcome::Booked {
                flight: Arc::clone(&flight),
                seats_remaining: 7,
            },
        ));
        assert_eq!(booked.outcome, "booked");
        assert_eq!(booked.flight.as_ref().unwrap().seats_remaining, Some(7));

        let sold_out = LegResult::from(&Leg::new(
            code("JFK"),
            code("LAX"),
            LegOutcome::SoldOut { flight },
        ));
        assert_eq!(sold_out.outcome, "sold_out");
        assert_eq!(sold_out.flight.as_ref().unwrap().seats_remaining, Some(0));

        let no_flight = LegResult::from(&Leg::new(code("JFK"), code("LAX"), LegOutcome::NoFlight));
        assert_eq!(no_flight.outcome, "no_flight");
        assert!(no_flight.flight.is_none());
    }

    #[test]
    fn itinerary_response_no_route() {
        let itinerary = Itinerary::no_route(code("JFK"), code("HND"));
        let response = ItineraryResponse::from(&itinerary);

        assert_eq!(response.status, "no_route");
        assert_eq!(response.total_distance_km, 0);
        assert!(response.legs.is_empty());
    }
}
