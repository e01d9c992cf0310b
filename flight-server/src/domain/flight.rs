//! Flight identity types.

use std::fmt;

use super::{AirportCode, ClockTime, Price};

/// Error returned when parsing an invalid flight identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid flight id: {reason}")]
pub struct InvalidFlightId {
    reason: &'static str,
}

/// A flight identifier such as `FL123`.
///
/// Identifiers are 2 to 8 uppercase ASCII letters and digits, and must
/// start with a letter. Valid by construction.
///
/// # Examples
///
/// ```
/// use flight_server::domain::FlightId;
///
/// let id = FlightId::parse("FL123").unwrap();
/// assert_eq!(id.as_str(), "FL123");
///
/// assert!(FlightId::parse("").is_err());
/// assert!(FlightId::parse("fl123").is_err());
/// assert!(FlightId::parse("123").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightId(String);

impl FlightId {
    /// Parse a flight identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidFlightId> {
        let bytes = s.as_bytes();

        if bytes.len() < 2 || bytes.len() > 8 {
            return Err(InvalidFlightId {
                reason: "must be 2-8 characters",
            });
        }

        if !bytes[0].is_ascii_uppercase() {
            return Err(InvalidFlightId {
                reason: "must start with an uppercase letter",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() && !b.is_ascii_digit() {
                return Err(InvalidFlightId {
                    reason: "must be uppercase ASCII letters and digits",
                });
            }
        }

        Ok(FlightId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlightId({})", self.0)
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when constructing an inconsistent flight record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidFlight {
    /// Capacity must allow at least one booking
    #[error("flight capacity must be at least 1")]
    ZeroCapacity,

    /// A flight cannot fly to its own origin
    #[error("flight origin and destination must differ")]
    SameEndpoints,
}

/// The immutable identity of a scheduled flight.
///
/// A record describes one flight of a repeating daily schedule: where it
/// flies, when, at what fare and with how many seats. The record never
/// changes after catalog load; the remaining-seat count is tracked
/// separately by [`crate::inventory::SeatInventory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightRecord {
    /// Unique flight identifier.
    pub id: FlightId,
    /// Departure airport.
    pub origin: AirportCode,
    /// Arrival airport.
    pub destination: AirportCode,
    /// Scheduled departure, wall clock.
    pub departure: ClockTime,
    /// Scheduled arrival, wall clock.
    pub arrival: ClockTime,
    /// Fare price.
    pub price: Price,
    /// Total seat capacity, fixed at creation.
    pub capacity: u32,
}

impl FlightRecord {
    /// Construct a validated flight record.
    ///
    /// # Errors
    ///
    /// Rejects zero capacity and flights whose origin equals their
    /// destination. Prices, codes and times are already valid by
    /// construction of their types.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: FlightId,
        origin: AirportCode,
        destination: AirportCode,
        departure: ClockTime,
        arrival: ClockTime,
        price: Price,
        capacity: u32,
    ) -> Result<Self, InvalidFlight> {
        if capacity == 0 {
            return Err(InvalidFlight::ZeroCapacity);
        }
        if origin == destination {
            return Err(InvalidFlight::SameEndpoints);
        }

        Ok(Self {
            id,
            origin,
            destination,
            departure,
            arrival,
            price,
            capacity,
        })
    }
}
