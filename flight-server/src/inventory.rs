//! Seat inventory and the booking state machine.
//!
//! Seats-remaining state is kept apart from the immutable
//! [`FlightRecord`](crate::domain::FlightRecord): each flight gets one
//! atomic counter, and every transition is a single compare-and-swap so
//! bookings stay race-safe without any per-flight mutex. A flight moves
//! `Available -> ... -> SoldOut` one seat at a time; only an explicit
//! cancellation moves it back.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::domain::{FlightId, FlightRecord};

/// Error returned by booking operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// The flight has no seats left.
    #[error("flight {flight_id} is sold out")]
    SoldOut {
        /// The fully booked flight.
        flight_id: FlightId,
    },

    /// The flight is not registered in this inventory.
    #[error("unknown flight: {flight_id}")]
    UnknownFlight {
        /// The requested flight.
        flight_id: FlightId,
    },

    /// Cancellation requested but every seat is already free.
    #[error("flight {flight_id} has no active bookings")]
    NothingBooked {
        /// The flight with free capacity.
        flight_id: FlightId,
    },
}

/// Proof of a successful booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// The booked flight.
    pub flight_id: FlightId,
    /// Seats left after this booking.
    pub seats_remaining: u32,
}

#[derive(Debug)]
struct SeatCount {
    remaining: AtomicU32,
    capacity: u32,
}

/// Per-flight seat counters.
///
/// `book` and `cancel` are safe under arbitrary interleavings of
/// concurrent callers: the counter never goes below zero or above the
/// flight's capacity, and when one seat remains exactly one of two racing
/// bookings succeeds.
#[derive(Debug, Default)]
pub struct SeatInventory {
    /// Map mutates only on registration; `book`/`cancel` take the read
    /// side and race on the atomics.
    seats: RwLock<HashMap<FlightId, SeatCount>>,
}

impl SeatInventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flight at full capacity.
    ///
    /// Returns `false` (leaving the existing counter untouched) if the
    /// flight is already registered.
    pub fn register(&self, flight: &FlightRecord) -> bool {
        let mut seats = self.seats.write().unwrap_or_else(PoisonError::into_inner);
        if seats.contains_key(&flight.id) {
            return false;
        }
        seats.insert(
            flight.id.clone(),
            SeatCount {
                remaining: AtomicU32::new(flight.capacity),
                capacity: flight.capacity,
            },
        );
        true
    }

    /// Atomically reserve one seat.
    ///
    /// The check-and-decrement is a single compare-and-swap: the count is
    /// only reduced when it is still positive, so no interleaving of
    /// callers can drive it negative or oversell the last seat.
    pub fn book(&self, flight_id: &FlightId) -> Result<Confirmation, BookingError> {
        let seats = self.seats.read().unwrap_or_else(PoisonError::into_inner);
        let count = seats.get(flight_id).ok_or_else(|| BookingError::UnknownFlight {
            flight_id: flight_id.clone(),
        })?;

        match count
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        {
            Ok(previous) => {
                let seats_remaining = previous - 1;
                debug!(flight = %flight_id, seats_remaining, "seat booked");
                Ok(Confirmation {
                    flight_id: flight_id.clone(),
                    seats_remaining,
                })
            }
            Err(_) => Err(BookingError::SoldOut {
                flight_id: flight_id.clone(),
            }),
        }
    }

    /// Atomically release one previously booked seat.
    ///
    /// The count never exceeds the flight's capacity.
    pub fn cancel(&self, flight_id: &FlightId) -> Result<u32, BookingError> {
        let seats = self.seats.read().unwrap_or_else(PoisonError::into_inner);
        let count = seats.get(flight_id).ok_or_else(|| BookingError::UnknownFlight {
            flight_id: flight_id.clone(),
        })?;

        let capacity = count.capacity;
        match count.remaining.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
            if n < capacity { Some(n + 1) } else { None }
        }) {
            Ok(previous) => {
                let seats_remaining = previous + 1;
                debug!(flight = %flight_id, seats_remaining, "booking cancelled");
                Ok(seats_remaining)
            }
            Err(_) => Err(BookingError::NothingBooked {
                flight_id: flight_id.clone(),
            }),
        }
    }

    /// Current seats-remaining for a flight, if registered.
    pub fn seats_remaining(&self, flight_id: &FlightId) -> Option<u32> {
        let seats = self.seats.read().unwrap_or_else(PoisonError::into_inner);
        seats
            .get(flight_id)
            .map(|count| count.remaining.load(Ordering::Acquire))
    }

    /// Number of registered flights.
    pub fn flight_count(&self) -> usize {
        self.seats
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
