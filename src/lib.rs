//! OpenGraph
//!
//! An in-memory directed, labeled, attributed multigraph with deduplicated
//! mutation, path and connectivity queries, advisory validation, and a
//! bidirectional codec for the BloodHound OpenGraph ingestion JSON schema.
//!
//! The store offers two mutation paths: a checked one that enforces the
//! referential and uniqueness invariants, and an unchecked one for bulk
//! loading that defers those checks to a later
//! [`validate`](graph::validate::validate) pass.
//!
//! # Example
//!
//! ```rust
//! use opengraph::codec;
//! use opengraph::graph::{Edge, GraphStore, Node};
//!
//! let mut store = GraphStore::with_source_kind("Base");
//!
//! store.add_node(Node::new("123", ["Person"]).unwrap());
//! store.add_node(Node::new("234", ["Person"]).unwrap());
//! store.add_edge(Edge::new("123", "234", "Knows").unwrap());
//!
//! let json = codec::export_json(&store, true).unwrap();
//! assert!(json.contains("\"source_kind\": \"Base\""));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod codec;
pub mod graph;

// Re-export main types for convenience
pub use algo::{connected_components, find_paths};
pub use codec::{CodecError, CodecResult, GraphDocument};
pub use graph::{
    validate, Edge, EdgeKey, GraphError, GraphResult, GraphStore, Node, Properties,
    PropertyError, PropertyValue,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
