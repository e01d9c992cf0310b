//! Itinerary types.
//!
//! An `Itinerary` represents the outcome of one planning request: the
//! airport sequence the route planner chose, and per leg the flight that
//! was selected by nearest-price match together with its booking outcome.

use std::fmt;
use std::sync::Arc;

use super::{AirportCode, FlightRecord};

/// Booking outcome for a single leg.
#[derive(Debug, Clone)]
pub enum LegOutcome {
    /// A flight was found and a seat was reserved.
    Booked {
        /// The booked flight.
        flight: Arc<FlightRecord>,
        /// Seats left on the flight after this booking.
        seats_remaining: u32,
    },
    /// A flight was found but had no seats left.
    SoldOut {
        /// The flight that could not be booked.
        flight: Arc<FlightRecord>,
    },
    /// The catalog holds no flight for this leg's route.
    NoFlight,
}

impl LegOutcome {
    /// Returns the selected flight, if any flight was matched at all.
    pub fn flight(&self) -> Option<&Arc<FlightRecord>> {
        match self {
            LegOutcome::Booked { flight, .. } => Some(flight),
            LegOutcome::SoldOut { flight } => Some(flight),
            LegOutcome::NoFlight => None,
        }
    }

    /// Returns true if a seat was successfully reserved.
    pub fn is_booked(&self) -> bool {
        matches!(self, LegOutcome::Booked { .. })
    }
}

/// One origin-to-destination segment of an itinerary.
#[derive(Debug, Clone)]
pub struct Leg {
    /// Departure airport of this segment.
    pub origin: AirportCode,
    /// Arrival airport of this segment.
    pub destination: AirportCode,
    /// What happened when the builder tried to fulfil the segment.
    pub outcome: LegOutcome,
}

impl Leg {
    /// Creates a leg with the given outcome.
    pub fn new(origin: AirportCode, destination: AirportCode, outcome: LegOutcome) -> Self {
        Self {
            origin,
            destination,
            outcome,
        }
    }

    /// Returns true if a seat was reserved for this leg.
    pub fn is_fulfilled(&self) -> bool {
        self.outcome.is_booked()
    }
}

/// Overall status of an itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItineraryStatus {
    /// Every leg has a booked seat.
    Complete,
    /// At least one leg is unfulfilled (sold out or no flight).
    Partial,
    /// The route planner found no path between the endpoints.
    NoRoute,
}

impl fmt::Display for ItineraryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItineraryStatus::Complete => "complete",
            ItineraryStatus::Partial => "partial",
            ItineraryStatus::NoRoute => "no_route",
        };
        f.write_str(s)
    }
}

/// A planned, possibly partially booked, multi-leg trip.
///
/// Built once per planning request and immutable afterwards.
///
/// # Invariants
///
/// - Consecutive legs connect: the destination of one leg is the origin of
///   the next.
/// - `NoRoute` itineraries have no legs and zero distance.
/// - A requested trip from an airport to itself is `Complete` with no legs.
#[derive(Debug, Clone)]
pub struct Itinerary {
    origin: AirportCode,
    destination: AirportCode,
    status: ItineraryStatus,
    total_distance: u64,
    legs: Vec<Leg>,
}

impl Itinerary {
    /// Build an itinerary from the legs the builder produced.
    ///
    /// The status is derived: `Complete` when every leg booked a seat
    /// (including the zero-leg same-airport trip), `Partial` otherwise.
    pub fn from_legs(
        origin: AirportCode,
        destination: AirportCode,
        total_distance: u64,
        legs: Vec<Leg>,
    ) -> Self {
        let status = if legs.iter().all(Leg::is_fulfilled) {
            ItineraryStatus::Complete
        } else {
            ItineraryStatus::Partial
        };

        Self {
            origin,
            destination,
            status,
            total_distance,
            legs,
        }
    }

    /// Build the structured "no route" result.
    pub fn no_route(origin: AirportCode, destination: AirportCode) -> Self {
        Self {
            origin,
            destination,
            status: ItineraryStatus::NoRoute,
            total_distance: 0,
            legs: Vec::new(),
        }
    }

    /// Requested start airport.
    pub fn origin(&self) -> AirportCode {
        self.origin
    }

    /// Requested target airport.
    pub fn destination(&self) -> AirportCode {
        self.destination
    }

    /// Overall status.
    pub fn status(&self) -> ItineraryStatus {
        self.status
    }

    /// Total route distance, zero when there is no route.
    pub fn total_distance(&self) -> u64 {
        self.total_distance
    }

    /// The legs, in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Number of legs with a reserved seat.
    pub fn booked_count(&self) -> usize {
        self.legs.iter().filter(|l| l.is_fulfilled()).count()
    }
}
