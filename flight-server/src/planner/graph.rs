//! The airport network graph.
//!
//! A fixed, directed, weighted adjacency structure. Airport codes are
//! interned to dense indices at construction; the adjacency list stores
//! `(neighbor, distance)` pairs. An absent entry means unreachable --
//! there is no zero-or-negative "no edge" marker inside the structure,
//! that convention is rejected at the boundary.

use crate::domain::AirportCode;

/// Error returned when building an invalid graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Edge weight of zero between distinct airports.
    ///
    /// Absent edges are simply not listed; a zero distance is always a
    /// data error.
    #[error("edge {from}->{to} has zero distance")]
    ZeroDistance {
        /// Edge origin.
        from: AirportCode,
        /// Edge target.
        to: AirportCode,
    },

    /// An airport connected to itself.
    #[error("self-loop on {0}")]
    SelfLoop(AirportCode),
}

/// A directed, weighted airport network.
///
/// Immutable once built and shared by value or `Arc`; route planning
/// reads it without locking.
#[derive(Debug, Default, Clone)]
pub struct AirportGraph {
    codes: Vec<AirportCode>,
    adjacency: Vec<Vec<(usize, u64)>>,
}

impl AirportGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an airport, returning its dense index.
    ///
    /// Idempotent: adding a known code returns the existing index.
    pub fn add_airport(&mut self, code: AirportCode) -> usize {
        if let Some(idx) = self.index_of(code) {
            return idx;
        }
        self.codes.push(code);
        self.adjacency.push(Vec::new());
        self.codes.len() - 1
    }

    /// Add a directed edge with the given distance.
    ///
    /// Unknown endpoints are interned automatically. Rejects self-loops
    /// and zero distances; for a two-way connection add both directions.
    pub fn add_edge(
        &mut self,
        from: AirportCode,
        to: AirportCode,
        distance: u64,
    ) -> Result<(), GraphError> {
        if from == to {
            return Err(GraphError::SelfLoop(from));
        }
        if distance == 0 {
            return Err(GraphError::ZeroDistance { from, to });
        }

        let from_idx = self.add_airport(from);
        let to_idx = self.add_airport(to);
        self.adjacency[from_idx].push((to_idx, distance));
        Ok(())
    }

    /// Number of airports.
    pub fn airport_count(&self) -> usize {
        self.codes.len()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// The airports, in insertion (index) order.
    pub fn airports(&self) -> &[AirportCode] {
        &self.codes
    }

    /// Dense index of an airport code, if present.
    pub fn index_of(&self, code: AirportCode) -> Option<usize> {
        self.codes.iter().position(|&c| c == code)
    }

    /// Returns true if the airport is part of the network.
    pub fn contains(&self, code: AirportCode) -> bool {
        self.index_of(code).is_some()
    }

    /// Airport code at a dense index.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds; indices come from this graph.
    pub fn code(&self, idx: usize) -> AirportCode {
        self.codes[idx]
    }

    /// Outgoing edges of the airport at `idx` as `(neighbor, distance)`.
    pub fn neighbors(&self, idx: usize) -> &[(usize, u64)] {
        &self.adjacency[idx]
    }
}
