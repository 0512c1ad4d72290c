//! Connected components
//!
//! Treats edges as undirected for reachability: both outgoing and incoming
//! edges of a node contribute neighbors.

use crate::graph::GraphStore;
use rustc_hash::FxHashSet;
use std::collections::HashSet;

/// Compute the connected components of the store
///
/// Iterative depth-first traversal from each unvisited node; every
/// traversal yields one component as a set of node ids. The returned
/// components partition the node set: their union is the full node set and
/// they are pairwise disjoint. A node with no incident edge forms a
/// singleton component. Component order follows node insertion order of
/// each component's first discovered member.
pub fn connected_components(store: &GraphStore) -> Vec<HashSet<String>> {
    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut components = Vec::new();

    for node in store.nodes() {
        if visited.contains(node.id.as_str()) {
            continue;
        }

        let mut component = HashSet::new();
        let mut stack = vec![node.id.clone()];

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }

            for edge in store.get_outgoing_edges(&current) {
                if store.has_node(&edge.end) && !visited.contains(edge.end.as_str()) {
                    stack.push(edge.end.clone());
                }
            }
            for edge in store.get_incoming_edges(&current) {
                if store.has_node(&edge.start) && !visited.contains(edge.start.as_str()) {
                    stack.push(edge.start.clone());
                }
            }

            component.insert(current);
        }

        components.push(component);
    }

    components
}
