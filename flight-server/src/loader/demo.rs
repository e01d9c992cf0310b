//! Built-in demo snapshot.
//!
//! An 8-airport intercontinental network with generated flights, used
//! when no snapshot files are configured so the server runs out of the
//! box. Distances are great-circle kilometres; a zero entry in the matrix
//! means the pair has no direct connection.

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::domain::{AirportCode, ClockTime, FlightId, FlightRecord, Price};
use crate::planner::AirportGraph;

use super::catalog::CatalogSnapshot;

const DEMO_AIRPORTS: [&str; 8] = ["JFK", "LAX", "ORD", "ATL", "HND", "DXB", "FRA", "LHR"];

/// Pairwise distances, indexed like `DEMO_AIRPORTS`.
const DEMO_DISTANCES: [[u64; 8]; 8] = [
    [0, 2451, 790, 763, 6742, 6860, 3930, 3460],
    [2451, 0, 1745, 393, 5503, 8277, 5653, 5432],
    [790, 1745, 0, 606, 6623, 7190, 602, 3850],
    [763, 393, 606, 0, 6960, 7481, 5433, 4150],
    [6742, 5503, 6623, 6960, 0, 7359, 6170, 9715],
    [6860, 8277, 7190, 7481, 7359, 0, 5631, 7155],
    [3930, 5653, 602, 5433, 6170, 5631, 0, 780],
    [3460, 5432, 3850, 4150, 9715, 7155, 780, 0],
];

/// Build the demo airport network.
pub fn demo_network() -> AirportGraph {
    let mut graph = AirportGraph::new();
    let codes: Vec<AirportCode> = DEMO_AIRPORTS
        .iter()
        .map(|s| AirportCode::parse(s).expect("demo airport codes are valid"))
        .collect();

    for &code in &codes {
        graph.add_airport(code);
    }
    for (i, row) in DEMO_DISTANCES.iter().enumerate() {
        for (j, &distance) in row.iter().enumerate() {
            if i != j && distance > 0 {
                graph
                    .add_edge(codes[i], codes[j], distance)
                    .expect("demo distances are positive");
            }
        }
    }

    graph
}

/// Generate a catalog of random flights covering every connection in the
/// network.
pub fn demo_catalog(graph: &AirportGraph) -> CatalogSnapshot {
    let mut rng = rand::thread_rng();
    let snapshot = CatalogSnapshot::default();
    let mut sequence = 0u32;

    for (from_idx, &origin) in graph.airports().iter().enumerate() {
        for &(to_idx, distance) in graph.neighbors(from_idx) {
            let destination = graph.code(to_idx);

            for _ in 0..rng.gen_range(1..=3) {
                sequence += 1;
                let record = demo_flight(&mut rng, sequence, origin, destination, distance);
                let record = Arc::new(record);
                snapshot.inventory.register(&record);
                snapshot.catalog.add_flight(record);
            }
        }
    }

    info!(
        flights = snapshot.inventory.flight_count(),
        routes = snapshot.catalog.route_count(),
        "demo catalog generated"
    );

    snapshot
}

fn demo_flight(
    rng: &mut impl Rng,
    sequence: u32,
    origin: AirportCode,
    destination: AirportCode,
    distance: u64,
) -> FlightRecord {
    let departure_hour = rng.gen_range(5..22);
    let duration_hours = 1 + (distance / 900) as u32;
    let arrival_hour = (departure_hour + duration_hours) % 24;
    let minute = 15 * rng.gen_range(0..4);

    // Fares loosely track distance, with per-flight spread
    let base = (distance * 8) as u32;
    let price = Price::from_minor(base + rng.gen_range(0..=20_000));

    FlightRecord::new(
        FlightId::parse(&format!("FL{sequence:03}")).expect("demo flight ids are valid"),
        origin,
        destination,
        ClockTime::from_hm(departure_hour, minute).expect("demo times are valid"),
        ClockTime::from_hm(arrival_hour, minute).expect("demo times are valid"),
        price,
        rng.gen_range(40..=200),
    )
    .expect("demo flights are valid")
}
