//! Shortest-path route planning over the airport network.
//!
//! Classic Dijkstra with a binary heap: non-negative distances, a settled
//! set, and predecessor links for path reconstruction. Pure and reentrant
//! over the immutable graph snapshot.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::domain::AirportCode;

use super::graph::AirportGraph;

/// Error returned when a queried airport is not in the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown airport: {0}")]
pub struct UnknownAirport(pub AirportCode);

/// A minimum-distance path through the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
    /// Airport sequence from origin to destination inclusive.
    pub airports: Vec<AirportCode>,
    /// Sum of the edge distances along the path.
    pub total_distance: u64,
}

impl RoutePath {
    /// Consecutive (origin, destination) pairs along the path.
    ///
    /// Empty for a single-airport path.
    pub fn hops(&self) -> impl Iterator<Item = (AirportCode, AirportCode)> + '_ {
        self.airports.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Compute the minimum-distance path between two airports.
///
/// Returns `Ok(None)` when the destination is unreachable -- the caller
/// decides whether that is fatal. When several frontier airports share the
/// minimum tentative distance the lowest graph index wins, making the
/// chosen path deterministic.
///
/// # Errors
///
/// Fails only when either endpoint is not part of the network.
pub fn shortest_path(
    graph: &AirportGraph,
    origin: AirportCode,
    destination: AirportCode,
) -> Result<Option<RoutePath>, UnknownAirport> {
    let start = graph.index_of(origin).ok_or(UnknownAirport(origin))?;
    let target = graph
        .index_of(destination)
        .ok_or(UnknownAirport(destination))?;

    if start == target {
        return Ok(Some(RoutePath {
            airports: vec![origin],
            total_distance: 0,
        }));
    }

    let n = graph.airport_count();
    let mut distance = vec![u64::MAX; n];
    let mut predecessor = vec![usize::MAX; n];
    let mut settled = vec![false; n];

    // Reverse orders the heap as a min-heap on (distance, index); the
    // index component is the deterministic tie-break.
    let mut frontier = BinaryHeap::new();
    distance[start] = 0;
    frontier.push(Reverse((0u64, start)));

    while let Some(Reverse((dist, current))) = frontier.pop() {
        if settled[current] {
            continue; // stale heap entry
        }
        settled[current] = true;

        if current == target {
            break;
        }

        for &(neighbor, weight) in graph.neighbors(current) {
            if settled[neighbor] {
                continue;
            }
            let candidate = dist + weight;
            if candidate < distance[neighbor] {
                distance[neighbor] = candidate;
                predecessor[neighbor] = current;
                frontier.push(Reverse((candidate, neighbor)));
            }
        }
    }

    if distance[target] == u64::MAX {
        debug!(origin = %origin, destination = %destination, "no path");
        return Ok(None);
    }

    // Walk predecessor links back from the target, then reverse.
    let mut indices = vec![target];
    let mut current = target;
    while current != start {
        current = predecessor[current];
        indices.push(current);
    }
    indices.reverse();

    let path = RoutePath {
        airports: indices.into_iter().map(|idx| graph.code(idx)).collect(),
        total_distance: distance[target],
    };

    debug!(
        origin = %origin,
        destination = %destination,
        distance = path.total_distance,
        hops = path.airports.len() - 1,
        "route found"
    );

    Ok(Some(path))
}
