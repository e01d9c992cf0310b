//! Route planning and itinerary assembly.
//!
//! This module answers the planning half of the problem: which airports a
//! trip passes through (`route`, Dijkstra over the network graph) and how
//! the trip gets fulfilled leg by leg against the catalog and seat
//! inventory (`builder`).

mod builder;
mod graph;
mod route;

pub use builder::{ItineraryBuilder, PlanRequest};
pub use graph::{AirportGraph, GraphError};
pub use route::{RoutePath, UnknownAirport, shortest_path};
