//! In-memory graph storage
//!
//! The store owns the node table and the edge collection and enforces the
//! referential and uniqueness invariants on the checked mutation path. The
//! unchecked path skips those checks for bulk loading; stores populated that
//! way must be passed through [`validate`](super::validate::validate) before
//! queries that assume well-formedness.

use super::edge::{Edge, EdgeKey};
use super::node::Node;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use thiserror::Error;

/// Errors raised when constructing graph elements
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node ID cannot be empty")]
    EmptyNodeId,

    #[error("edge start node ID cannot be empty")]
    EmptyEdgeStart,

    #[error("edge end node ID cannot be empty")]
    EmptyEdgeEnd,

    #[error("edge kind cannot be empty")]
    EmptyEdgeKind,
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory directed multigraph
///
/// - `nodes`: id-keyed, insertion-ordered node table
/// - `edges`: edge list in insertion order
/// - `edge_index`: hashed `(start, end, kind)` identity set, kept in
///   lockstep with `edges` so duplicate detection is O(1) instead of a
///   linear scan
/// - `source_kind`: kind stamped onto every node added through the checked
///   path that does not already carry it
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
    edge_index: FxHashSet<EdgeKey>,
    source_kind: Option<String>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty graph store with a source kind
    pub fn with_source_kind(source_kind: impl Into<String>) -> Self {
        GraphStore {
            source_kind: Some(source_kind.into()),
            ..Self::default()
        }
    }

    /// The source kind stamped onto checked node insertions, if any
    pub fn source_kind(&self) -> Option<&str> {
        self.source_kind.as_deref()
    }

    /// Replace the source kind
    pub fn set_source_kind(&mut self, source_kind: Option<String>) {
        self.source_kind = source_kind;
    }

    // Checked mutation path

    /// Add a node, rejecting duplicate ids
    ///
    /// If a source kind is set and absent from the node's kinds it is
    /// appended before insertion. Returns false if a node with the same id
    /// already exists; the store is left unchanged in that case.
    pub fn add_node(&mut self, mut node: Node) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }

        if let Some(kind) = &self.source_kind {
            node.add_kind(kind.clone());
        }

        self.nodes.insert(node.id.clone(), node);
        true
    }

    /// Add a list of nodes; true only if every one of them was added
    ///
    /// Applies [`add_node`](Self::add_node) item by item. Partial effects
    /// are visible on failure; nothing is rolled back.
    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = Node>) -> bool {
        let mut all_added = true;
        for node in nodes {
            all_added &= self.add_node(node);
        }
        all_added
    }

    /// Add an edge, rejecting missing endpoints and duplicate identities
    ///
    /// Returns false if either endpoint id is absent from the node table or
    /// an edge with the same `(start, end, kind)` triple is already stored.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if !self.nodes.contains_key(&edge.start) || !self.nodes.contains_key(&edge.end) {
            return false;
        }

        let key = edge.key();
        if self.edge_index.contains(&key) {
            return false;
        }

        self.edge_index.insert(key);
        self.edges.push(edge);
        true
    }

    /// Add a list of edges; true only if every one of them was added
    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = Edge>) -> bool {
        let mut all_added = true;
        for edge in edges {
            all_added &= self.add_edge(edge);
        }
        all_added
    }

    /// Remove a node and every edge referencing it; false if absent
    pub fn remove_node_by_id(&mut self, id: &str) -> bool {
        if self.nodes.shift_remove(id).is_none() {
            return false;
        }

        let edge_index = &mut self.edge_index;
        self.edges.retain(|edge| {
            let touches = edge.start == id || edge.end == id;
            if touches {
                edge_index.remove(&edge.key());
            }
            !touches
        });

        true
    }

    /// Remove a node by value; false if absent
    pub fn remove_node(&mut self, node: &Node) -> bool {
        self.remove_node_by_id(&node.id)
    }

    /// Remove a list of nodes; true only if every one of them was removed
    pub fn remove_nodes<'a>(&mut self, nodes: impl IntoIterator<Item = &'a Node>) -> bool {
        let mut all_removed = true;
        for node in nodes {
            all_removed &= self.remove_node(node);
        }
        all_removed
    }

    // Unchecked mutation path
    //
    // These entry points skip the referential and uniqueness checks; a
    // store populated through them can hold duplicate edge identities and
    // edges whose endpoints are missing from the node table.

    /// Insert a node unconditionally, overwriting any node with the same id
    pub fn add_node_unchecked(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Insert a list of nodes unconditionally
    pub fn add_nodes_unchecked(&mut self, nodes: impl IntoIterator<Item = Node>) {
        for node in nodes {
            self.add_node_unchecked(node);
        }
    }

    /// Insert an edge without endpoint or duplicate checks
    ///
    /// The identity triple is still recorded so that later checked inserts
    /// observe edges loaded this way.
    pub fn add_edge_unchecked(&mut self, edge: Edge) {
        self.edge_index.insert(edge.key());
        self.edges.push(edge);
    }

    /// Insert a list of edges without checks
    pub fn add_edges_unchecked(&mut self, edges: impl IntoIterator<Item = Edge>) {
        for edge in edges {
            self.add_edge_unchecked(edge);
        }
    }

    // Queries

    /// Get a node by id
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable node by id
    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes carrying a specific kind
    pub fn get_nodes_by_kind(&self, kind: &str) -> Vec<&Node> {
        self.nodes.values().filter(|n| n.has_kind(kind)).collect()
    }

    /// All edges of a specific kind
    pub fn get_edges_by_kind(&self, kind: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.kind == kind).collect()
    }

    /// All edges starting from a specific node, in insertion order
    pub fn get_outgoing_edges(&self, id: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.start == id).collect()
    }

    /// All edges ending at a specific node, in insertion order
    pub fn get_incoming_edges(&self, id: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.end == id).collect()
    }

    /// Iterate nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes with no incoming or outgoing edge
    pub fn isolated_nodes(&self) -> Vec<&Node> {
        let mut touched: FxHashSet<&str> = FxHashSet::default();
        for edge in &self.edges {
            touched.insert(edge.start.as_str());
            touched.insert(edge.end.as_str());
        }

        self.nodes
            .values()
            .filter(|node| !touched.contains(node.id.as_str()))
            .collect()
    }

    /// Get number of isolated nodes
    pub fn isolated_node_count(&self) -> usize {
        self.isolated_nodes().len()
    }

    /// Edges whose start or end is missing from the node table
    ///
    /// Reachable only through the unchecked insertion path; the checked
    /// path refuses such edges up front.
    pub fn isolated_edges(&self) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| !self.nodes.contains_key(&e.start) || !self.nodes.contains_key(&e.end))
            .collect()
    }

    /// Get number of isolated edges
    pub fn isolated_edge_count(&self) -> usize {
        self.isolated_edges().len()
    }

    /// Total number of nodes and edges
    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    /// Check if the store holds no nodes and no edges
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Drop all nodes and edges; the source kind is retained
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.edge_index.clear();
    }
}
