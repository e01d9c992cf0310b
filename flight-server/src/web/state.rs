//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::inventory::SeatInventory;
use crate::planner::{AirportGraph, ItineraryBuilder};

/// Shared application state.
///
/// Holds the immutable network snapshot and the live catalog/inventory,
/// plus the builder wired over all three.
#[derive(Clone)]
pub struct AppState {
    /// Airport network snapshot
    pub graph: Arc<AirportGraph>,

    /// Flight catalog, price-indexed per route
    pub catalog: Arc<Catalog>,

    /// Per-flight seat counters
    pub inventory: Arc<SeatInventory>,

    /// Itinerary planner over the three snapshots above
    pub builder: Arc<ItineraryBuilder>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(graph: AirportGraph, catalog: Catalog, inventory: SeatInventory) -> Self {
        let graph = Arc::new(graph);
        let catalog = Arc::new(catalog);
        let inventory = Arc::new(inventory);
        let builder = Arc::new(ItineraryBuilder::new(
            Arc::clone(&graph),
            Arc::clone(&catalog),
            Arc::clone(&inventory),
        ));

        Self {
            graph,
            catalog,
            inventory,
            builder,
        }
    }
}
