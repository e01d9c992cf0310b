//! Boundary loaders for the core's input snapshots.
//!
//! The core operates on validated, in-memory snapshots; this module is
//! where outside data earns its way in. Both loaders reject anything the
//! core's invariants would not allow (zero capacities, zero or negative
//! distances, malformed codes), so nothing downstream has to re-check.

mod catalog;
mod demo;
mod network;

pub use catalog::{CatalogLoadError, CatalogSnapshot, load_catalog, parse_catalog};
pub use demo::{demo_catalog, demo_network};
pub use network::{NetworkLoadError, load_network, parse_network};
