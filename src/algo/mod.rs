//! Graph algorithms
//!
//! Read-only traversals over a [`GraphStore`](crate::graph::GraphStore):
//! simple-path enumeration and undirected connected components.

pub mod components;
pub mod paths;

pub use components::connected_components;
pub use paths::find_paths;
