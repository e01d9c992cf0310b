use std::net::SocketAddr;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use flight_server::loader::{demo_catalog, demo_network, load_catalog, load_network};
use flight_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load the network snapshot, or fall back to the built-in demo
    let graph = match std::env::var("NETWORK_PATH") {
        Ok(path) => load_network(Path::new(&path)).expect("Failed to load network file"),
        Err(_) => {
            eprintln!("NETWORK_PATH not set; using built-in demo network.");
            demo_network()
        }
    };

    // Load the catalog snapshot, or generate demo flights for the network
    let snapshot = match std::env::var("CATALOG_PATH") {
        Ok(path) => load_catalog(Path::new(&path)).expect("Failed to load catalog file"),
        Err(_) => {
            eprintln!("CATALOG_PATH not set; generating demo flights.");
            demo_catalog(&graph)
        }
    };

    println!(
        "Loaded {} airports, {} routes, {} flights",
        graph.airport_count(),
        snapshot.catalog.route_count(),
        snapshot.inventory.flight_count()
    );

    // Build app state
    let state = AppState::new(graph, snapshot.catalog, snapshot.inventory);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));
    println!("Flight Itinerary Planner listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health           - Health check");
    println!("  GET  /routes/shortest  - Shortest route between airports");
    println!("  GET  /flights/search   - Nearest-price flight on a route");
    println!("  POST /itinerary/plan   - Plan and book an itinerary");
    println!("  POST /flights/book     - Book a seat on a flight");
    println!("  POST /flights/cancel   - Cancel a booking");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
