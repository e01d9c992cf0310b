//! Flight catalog: one price-ordered index per route.
//!
//! The catalog maps an (origin, destination) route to the [`PriceIndex`]
//! of its flights. Each route's tree sits behind its own reader-writer
//! lock: nearest-price queries on a route run concurrently, inserts take
//! the tree exclusively (rebalancing is not safe to observe mid-rotation),
//! and different routes never contend with each other.

mod price_index;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::trace;

use crate::domain::{AirportCode, FlightRecord, Price};

pub use price_index::{IterByPrice, PriceIndex};

/// An (origin, destination) airport pair.
pub type Route = (AirportCode, AirportCode);

/// In-memory catalog of all scheduled flights, indexed by route and price.
///
/// Records are validated before they get here (see [`crate::loader`] and
/// [`crate::domain::FlightRecord::new`]); the catalog itself never rejects
/// an insert.
#[derive(Debug, Default)]
pub struct Catalog {
    /// The outer lock only resolves a route to its tree and is never held
    /// across a tree operation.
    routes: RwLock<HashMap<Route, Arc<RwLock<PriceIndex>>>>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a flight into its route's price index, creating the index
    /// on first use.
    pub fn add_flight(&self, flight: Arc<FlightRecord>) {
        let route = (flight.origin, flight.destination);

        let tree = {
            let mut routes = self
                .routes
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(routes.entry(route).or_default())
        };

        trace!(
            flight = %flight.id,
            origin = %flight.origin,
            destination = %flight.destination,
            price = %flight.price,
            "indexing flight"
        );

        // Tree operations do not panic, so a poisoned lock still guards a
        // consistent tree.
        tree.write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(flight);
    }

    /// Returns the flight on the route whose price is closest to `target`.
    ///
    /// `None` when the route has no flights at all. Tie-break as
    /// documented on [`PriceIndex::nearest`].
    pub fn nearest(
        &self,
        origin: AirportCode,
        destination: AirportCode,
        target: Price,
    ) -> Option<Arc<FlightRecord>> {
        let tree = self.route_tree(origin, destination)?;
        let tree = tree.read().unwrap_or_else(PoisonError::into_inner);
        tree.nearest(target)
    }

    /// All flights on a route, cheapest first. Empty for unknown routes.
    pub fn flights_by_price(
        &self,
        origin: AirportCode,
        destination: AirportCode,
    ) -> Vec<Arc<FlightRecord>> {
        let Some(tree) = self.route_tree(origin, destination) else {
            return Vec::new();
        };
        let tree = tree.read().unwrap_or_else(PoisonError::into_inner);
        tree.iter_by_price().cloned().collect()
    }

    /// Number of routes with at least one flight.
    pub fn route_count(&self) -> usize {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Total number of flights across all routes.
    pub fn flight_count(&self) -> usize {
        let routes = self.routes.read().unwrap_or_else(PoisonError::into_inner);
        routes
            .values()
            .map(|tree| tree.read().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }

    fn route_tree(
        &self,
        origin: AirportCode,
        destination: AirportCode,
    ) -> Option<Arc<RwLock<PriceIndex>>> {
        let routes = self.routes.read().unwrap_or_else(PoisonError::into_inner);
        routes.get(&(origin, destination)).map(Arc::clone)
    }
}
