//! Web layer for the flight itinerary planner.
//!
//! Provides HTTP endpoints for route queries, nearest-price search,
//! itinerary planning and direct seat booking. Thin glue: all validation
//! and state transitions live in the core modules.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
