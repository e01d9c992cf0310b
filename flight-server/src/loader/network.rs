//! Network snapshot loading.
//!
//! Parses the airport network JSON. The file declares the airports first
//! and then the directed edges between them; a connection that works both
//! ways is listed once per direction. Unreachable pairs are simply not
//! listed -- a zero distance is a data error, not a "no edge" marker.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::domain::{AirportCode, InvalidAirportCode};
use crate::planner::{AirportGraph, GraphError};

/// Error returned when a network file cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum NetworkLoadError {
    /// The file could not be read
    #[error("failed to read network file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON of the expected shape
    #[error("failed to parse network file: {0}")]
    Parse(#[from] serde_json::Error),

    /// An airport entry is not a valid code
    #[error("airport {code:?}: {source}")]
    InvalidAirport {
        /// The offending entry, verbatim
        code: String,
        /// The parse failure
        source: InvalidAirportCode,
    },

    /// An edge references an airport missing from the airports list
    #[error("edge {from}->{to} references an undeclared airport")]
    UndeclaredAirport {
        /// Edge origin, verbatim
        from: String,
        /// Edge target, verbatim
        to: String,
    },

    /// An edge violates the graph's structural rules
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// On-disk shape of the network file.
#[derive(Debug, Deserialize)]
struct NetworkFile {
    airports: Vec<String>,
    edges: Vec<EdgeSpec>,
}

#[derive(Debug, Deserialize)]
struct EdgeSpec {
    from: String,
    to: String,
    distance_km: u64,
}

/// Load and validate a network file.
pub fn load_network(path: &Path) -> Result<AirportGraph, NetworkLoadError> {
    let contents = std::fs::read_to_string(path)?;
    let graph = parse_network(&contents)?;
    info!(
        path = %path.display(),
        airports = graph.airport_count(),
        edges = graph.edge_count(),
        "network loaded"
    );
    Ok(graph)
}

/// Parse and validate network JSON.
pub fn parse_network(json: &str) -> Result<AirportGraph, NetworkLoadError> {
    let file: NetworkFile = serde_json::from_str(json)?;

    let mut graph = AirportGraph::new();
    let mut declared = HashSet::new();

    for entry in &file.airports {
        let code = parse_code(entry)?;
        declared.insert(code);
        graph.add_airport(code);
    }

    for edge in &file.edges {
        let from = parse_code(&edge.from)?;
        let to = parse_code(&edge.to)?;
        if !declared.contains(&from) || !declared.contains(&to) {
            return Err(NetworkLoadError::UndeclaredAirport {
                from: edge.from.clone(),
                to: edge.to.clone(),
            });
        }
        graph.add_edge(from, to, edge.distance_km)?;
    }

    Ok(graph)
}

fn parse_code(entry: &str) -> Result<AirportCode, NetworkLoadError> {
    AirportCode::parse(entry).map_err(|source| NetworkLoadError::InvalidAirport {
        code: entry.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::shortest_path;
    use std::io::Write;

    const VALID: &str = r#"{
        "airports": ["JFK", "LAX", "ORD", "HND"],
        "edges": [
            {"from": "JFK", "to": "LAX", "distance_km": 2475},
            {"from": "LAX", "to": "JFK", "distance_km": 2475},
            {"from": "JFK", "to": "ORD", "distance_km": 790},
            {"from": "ORD", "to": "LAX", "distance_km": 1750}
        ]
    }"#;

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    #[test]
    fn parse_valid_network() {
        let graph = parse_network(VALID).unwrap();

        assert_eq!(graph.airport_count(), 4);
        assert_eq!(graph.edge_count(), 4);

        let path = shortest_path(&graph, code("JFK"), code("LAX"))
            .unwrap()
            .unwrap();
        assert_eq!(path.total_distance, 2475);
    }

    #[test]
    fn declared_but_unconnected_airport_is_isolated() {
        let graph = parse_network(VALID).unwrap();
        assert!(graph.contains(code("HND")));
        assert!(shortest_path(&graph, code("JFK"), code("HND"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn reject_malformed_json() {
        assert!(matches!(
            parse_network("[]").unwrap_err(),
            NetworkLoadError::Parse(_)
        ));
        // Negative distances do not fit u64
        let json = r#"{"airports": ["JFK", "LAX"],
            "edges": [{"from": "JFK", "to": "LAX", "distance_km": -1}]}"#;
        assert!(matches!(
            parse_network(json).unwrap_err(),
            NetworkLoadError::Parse(_)
        ));
    }

    #[test]
    fn reject_invalid_airport_code() {
        let json = r#"{"airports": ["JFK", "lax"], "edges": []}"#;
        let err = parse_network(json).unwrap_err();
        assert!(matches!(err, NetworkLoadError::InvalidAirport { code, .. } if code == "lax"));
    }

    #[test]
    fn reject_undeclared_endpoint() {
        let json = r#"{"airports": ["JFK"],
            "edges": [{"from": "JFK", "to": "LAX", "distance_km": 2475}]}"#;
        let err = parse_network(json).unwrap_err();
        assert!(matches!(err, NetworkLoadError::UndeclaredAirport { .. }));
    }

    #[test]
    fn reject_zero_distance() {
        let json = r#"{"airports": ["JFK", "LAX"],
            "edges": [{"from": "JFK", "to": "LAX", "distance_km": 0}]}"#;
        let err = parse_network(json).unwrap_err();
        assert!(matches!(
            err,
            NetworkLoadError::Graph(GraphError::ZeroDistance { .. })
        ));
    }

    #[test]
    fn reject_self_loop() {
        let json = r#"{"airports": ["JFK"],
            "edges": [{"from": "JFK", "to": "JFK", "distance_km": 5}]}"#;
        let err = parse_network(json).unwrap_err();
        assert!(matches!(err, NetworkLoadError::Graph(GraphError::SelfLoop(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        let graph = load_network(file.path()).unwrap();
        assert_eq!(graph.airport_count(), 4);
    }
}
