//! Flight itinerary planner and booking server.
//!
//! Finds, for a multi-leg trip, the flight on each leg whose fare is
//! closest to the traveler's target price, and commits seat reservations
//! against finite per-flight capacity.

pub mod catalog;
pub mod domain;
pub mod inventory;
pub mod loader;
pub mod planner;
pub mod web;
