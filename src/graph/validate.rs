//! Advisory validation of a graph store
//!
//! Detects the states only reachable through the unchecked mutation path:
//! edges referencing missing nodes, plus the (legal but usually unintended)
//! presence of isolated nodes.

use super::store::GraphStore;

/// Scan the store and describe every problem found
///
/// Produces one entry per edge with a missing start node, one per edge with
/// a missing end node, and a single aggregated entry listing all isolated
/// node ids. The scan is read-only and never fails; an empty result means
/// no problems were found.
pub fn validate(store: &GraphStore) -> Vec<String> {
    let mut problems = Vec::new();

    for edge in store.edges() {
        if !store.has_node(&edge.start) {
            problems.push(format!(
                "Edge {} references non-existent start node: {}",
                edge.kind, edge.start
            ));
        }
        if !store.has_node(&edge.end) {
            problems.push(format!(
                "Edge {} references non-existent end node: {}",
                edge.kind, edge.end
            ));
        }
    }

    let isolated: Vec<&str> = store.isolated_nodes().iter().map(|n| n.id.as_str()).collect();
    if !isolated.is_empty() {
        problems.push(format!(
            "Found {} isolated nodes: {:?}",
            isolated.len(),
            isolated
        ));
    }

    problems
}
