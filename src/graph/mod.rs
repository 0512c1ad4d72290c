//! Core graph model
//!
//! This module implements the attributed multigraph:
//! - Nodes with multiple kinds and properties
//! - Directed edges with a kind and properties
//! - In-memory storage with a hashed edge-identity index
//! - Advisory validation for stores built through the unchecked path

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod validate;

// Re-export main types
pub use edge::{Edge, EdgeKey};
pub use node::Node;
pub use property::{Properties, PropertyError, PropertyValue};
pub use store::{GraphError, GraphResult, GraphStore};
pub use validate::validate;
