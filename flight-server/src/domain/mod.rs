//! Domain types for the flight itinerary planner.
//!
//! This module contains the core domain model types that represent
//! validated flight data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod airport;
mod flight;
mod itinerary;
mod price;
mod time;

pub use airport::{AirportCode, InvalidAirportCode};
pub use flight::{FlightId, FlightRecord, InvalidFlight, InvalidFlightId};
pub use itinerary::{Itinerary, ItineraryStatus, Leg, LegOutcome};
pub use price::{InvalidPrice, Price};
pub use time::{ClockTime, TimeError};
