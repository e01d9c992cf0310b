//! Itinerary assembly.
//!
//! The builder glues the three independent pieces together: the route
//! planner chooses the airport sequence, the catalog picks each leg's
//! nearest-price flight, and the inventory commits the seats. A leg that
//! cannot be fulfilled is recorded as such and the remaining legs are
//! still attempted; nothing but the booked flights' seat counters is
//! mutated.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::domain::{AirportCode, Itinerary, Leg, LegOutcome, Price};
use crate::inventory::{BookingError, SeatInventory};

use super::graph::AirportGraph;
use super::route::{UnknownAirport, shortest_path};

/// A single planning request.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Start airport.
    pub origin: AirportCode,
    /// Target airport.
    pub destination: AirportCode,
    /// The traveler's target fare per leg.
    pub target_price: Price,
}

/// Plans and books multi-leg itineraries against shared snapshots.
#[derive(Debug)]
pub struct ItineraryBuilder {
    graph: Arc<AirportGraph>,
    catalog: Arc<Catalog>,
    inventory: Arc<SeatInventory>,
}

impl ItineraryBuilder {
    /// Creates a builder over the given snapshots.
    pub fn new(
        graph: Arc<AirportGraph>,
        catalog: Arc<Catalog>,
        inventory: Arc<SeatInventory>,
    ) -> Self {
        Self {
            graph,
            catalog,
            inventory,
        }
    }

    /// Plan the route and book the nearest-price flight on every leg.
    ///
    /// An unreachable destination yields a zero-leg itinerary with
    /// [`NoRoute`](crate::domain::ItineraryStatus::NoRoute) status. A
    /// sold-out or flightless leg is recorded unfulfilled and planning
    /// continues with the next leg; there is deliberately no automatic
    /// retry with the next-closest price -- that is a caller policy.
    ///
    /// # Errors
    ///
    /// Fails only when an endpoint is not part of the network.
    pub fn plan(&self, request: &PlanRequest) -> Result<Itinerary, UnknownAirport> {
        let route = match shortest_path(&self.graph, request.origin, request.destination)? {
            Some(route) => route,
            None => {
                debug!(
                    origin = %request.origin,
                    destination = %request.destination,
                    "no route between airports"
                );
                return Ok(Itinerary::no_route(request.origin, request.destination));
            }
        };

        let legs: Vec<Leg> = route
            .hops()
            .map(|(from, to)| {
                let outcome = self.fulfil_leg(from, to, request.target_price);
                Leg::new(from, to, outcome)
            })
            .collect();

        let itinerary =
            Itinerary::from_legs(request.origin, request.destination, route.total_distance, legs);

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            status = %itinerary.status(),
            booked = itinerary.booked_count(),
            legs = itinerary.legs().len(),
            "itinerary planned"
        );

        Ok(itinerary)
    }

    /// Pick the nearest-price flight for one leg and try to book it.
    fn fulfil_leg(&self, from: AirportCode, to: AirportCode, target: Price) -> LegOutcome {
        let Some(flight) = self.catalog.nearest(from, to, target) else {
            debug!(origin = %from, destination = %to, "no flight on leg");
            return LegOutcome::NoFlight;
        };

        match self.inventory.book(&flight.id) {
            Ok(confirmation) => LegOutcome::Booked {
                flight,
                seats_remaining: confirmation.seats_remaining,
            },
            Err(BookingError::SoldOut { .. }) => LegOutcome::SoldOut { flight },
            Err(err) => {
                // Catalog and inventory disagree about this flight; treat
                // the leg as unfulfillable rather than failing the trip.
                warn!(flight = %flight.id, error = %err, "inventory lookup failed");
                LegOutcome::NoFlight
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, FlightId, FlightRecord, ItineraryStatus};

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn price(minor: u32) -> Price {
        Price::from_minor(minor)
    }

    fn flight(id: &str, from: &str, to: &str, minor: u32, capacity: u32) -> Arc<FlightRecord> {
        Arc::new(
            FlightRecord::new(
                FlightId::parse(id).unwrap(),
                code(from),
                code(to),
                ClockTime::parse_hhmm("08:00").unwrap(),
                ClockTime::parse_hhmm("12:00").unwrap(),
                price(minor),
                capacity,
            )
            .unwrap(),
        )
    }

    struct Fixture {
        builder: ItineraryBuilder,
        catalog: Arc<Catalog>,
        inventory: Arc<SeatInventory>,
    }

    /// JFK -ORD- LAX network where the two-hop route is shortest, with
    /// flights on both hops.
    fn fixture(flights: &[Arc<FlightRecord>]) -> Fixture {
        let mut graph = AirportGraph::new();
        graph.add_edge(code("JFK"), code("ORD"), 790).unwrap();
        graph.add_edge(code("ORD"), code("LAX"), 1750).unwrap();
        graph.add_edge(code("JFK"), code("LAX"), 9000).unwrap();
        graph.add_airport(code("HND"));

        let catalog = Arc::new(Catalog::new());
        let inventory = Arc::new(SeatInventory::new());
        for flight in flights {
            catalog.add_flight(Arc::clone(flight));
            inventory.register(flight);
        }

        Fixture {
            builder: ItineraryBuilder::new(
                Arc::new(graph),
                Arc::clone(&catalog),
                Arc::clone(&inventory),
            ),
            catalog,
            inventory,
        }
    }

    fn request(origin: &str, destination: &str, target_minor: u32) -> PlanRequest {
        PlanRequest {
            origin: code(origin),
            destination: code(destination),
            target_price: price(target_minor),
        }
    }

    #[test]
    fn books_nearest_price_on_every_leg() {
        let fixture = fixture(&[
            flight("FL1", "JFK", "ORD", 30_000, 100),
            flight("FL2", "JFK", "ORD", 45_000, 100),
            flight("FL3", "ORD", "LAX", 50_000, 100),
        ]);

        let itinerary = fixture.builder.plan(&request("JFK", "LAX", 46_000)).unwrap();

        assert_eq!(itinerary.status(), ItineraryStatus::Complete);
        assert_eq!(itinerary.total_distance(), 2540);
        assert_eq!(itinerary.legs().len(), 2);

        let booked: Vec<&str> = itinerary
            .legs()
            .iter()
            .map(|leg| leg.outcome.flight().unwrap().id.as_str())
            .collect();
        assert_eq!(booked, vec!["FL2", "FL3"]);

        // The bookings really decremented the counters
        assert_eq!(
            fixture.inventory.seats_remaining(&FlightId::parse("FL2").unwrap()),
            Some(99)
        );
        assert_eq!(
            fixture.inventory.seats_remaining(&FlightId::parse("FL3").unwrap()),
            Some(99)
        );
        // The losing candidate was not touched
        assert_eq!(
            fixture.inventory.seats_remaining(&FlightId::parse("FL1").unwrap()),
            Some(100)
        );
    }

    #[test]
    fn sold_out_leg_is_recorded_and_planning_continues() {
        let fixture = fixture(&[
            flight("FL1", "JFK", "ORD", 45_000, 1),
            flight("FL2", "ORD", "LAX", 45_000, 100),
        ]);

        // Exhaust the first hop
        let first = fixture.builder.plan(&request("JFK", "LAX", 45_000)).unwrap();
        assert_eq!(first.status(), ItineraryStatus::Complete);

        let second = fixture.builder.plan(&request("JFK", "LAX", 45_000)).unwrap();
        assert_eq!(second.status(), ItineraryStatus::Partial);
        assert_eq!(second.legs().len(), 2);

        assert!(matches!(second.legs()[0].outcome, LegOutcome::SoldOut { .. }));
        // The failed first leg did not stop the second leg from booking
        assert!(second.legs()[1].is_fulfilled());
        assert_eq!(
            fixture.inventory.seats_remaining(&FlightId::parse("FL2").unwrap()),
            Some(98)
        );
    }

    #[test]
    fn flightless_leg_is_recorded() {
        // No ORD->LAX flights at all
        let fixture = fixture(&[flight("FL1", "JFK", "ORD", 45_000, 100)]);

        let itinerary = fixture.builder.plan(&request("JFK", "LAX", 45_000)).unwrap();

        assert_eq!(itinerary.status(), ItineraryStatus::Partial);
        assert!(itinerary.legs()[0].is_fulfilled());
        assert!(matches!(itinerary.legs()[1].outcome, LegOutcome::NoFlight));
    }

    #[test]
    fn unreachable_destination_gives_no_route() {
        let fixture = fixture(&[flight("FL1", "JFK", "ORD", 45_000, 100)]);

        let itinerary = fixture.builder.plan(&request("JFK", "HND", 45_000)).unwrap();

        assert_eq!(itinerary.status(), ItineraryStatus::NoRoute);
        assert!(itinerary.legs().is_empty());

        // A failed plan must not have booked anything
        assert_eq!(
            fixture.inventory.seats_remaining(&FlightId::parse("FL1").unwrap()),
            Some(100)
        );
    }

    #[test]
    fn unknown_airport_is_an_error() {
        let fixture = fixture(&[]);
        let err = fixture.builder.plan(&request("JFK", "XXX", 45_000)).unwrap_err();
        assert_eq!(err, UnknownAirport(code("XXX")));
    }

    #[test]
    fn trip_to_self_is_trivially_complete() {
        let fixture = fixture(&[]);
        let itinerary = fixture.builder.plan(&request("JFK", "JFK", 45_000)).unwrap();

        assert_eq!(itinerary.status(), ItineraryStatus::Complete);
        assert!(itinerary.legs().is_empty());
        assert_eq!(itinerary.total_distance(), 0);
    }

    #[test]
    fn catalog_flight_missing_from_inventory_degrades_to_no_flight() {
        // Registered in the catalog but never in the inventory
        let orphan = flight("FL9", "JFK", "ORD", 45_000, 100);
        let fixture = fixture(&[]);
        fixture.catalog.add_flight(orphan);

        let itinerary = fixture.builder.plan(&request("JFK", "ORD", 45_000)).unwrap();
        assert_eq!(itinerary.status(), ItineraryStatus::Partial);
        assert!(matches!(itinerary.legs()[0].outcome, LegOutcome::NoFlight));
    }
}
