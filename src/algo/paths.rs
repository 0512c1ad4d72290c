//! Simple-path enumeration
//!
//! Enumerates every simple directed path between two nodes up to a depth
//! bound. Worst-case cost is exponential in dense graphs; `max_depth` is
//! the only bound. Callers that need a single shortest path should not use
//! this.

use crate::graph::GraphStore;
use std::collections::VecDeque;

/// Enumerate all simple directed paths from `start_id` to `end_id`
///
/// - Paths contain at most `max_depth` edges and never repeat a node.
/// - Cycle prevention is per path: a node used by one path may still be
///   used by a different path, so alternate routes through a shared
///   intermediate are all found.
/// - Output follows discovery order: shorter paths first, ties broken by
///   edge insertion order at each node.
/// - A missing endpoint yields an empty result; `start_id == end_id`
///   yields the single trivial path, whatever the depth bound.
pub fn find_paths(
    store: &GraphStore,
    start_id: &str,
    end_id: &str,
    max_depth: usize,
) -> Vec<Vec<String>> {
    if !store.has_node(start_id) || !store.has_node(end_id) {
        return Vec::new();
    }

    if start_id == end_id {
        return vec![vec![start_id.to_string()]];
    }

    let mut paths = Vec::new();
    let mut queue: VecDeque<Vec<String>> = VecDeque::new();
    queue.push_back(vec![start_id.to_string()]);

    while let Some(path) = queue.pop_front() {
        // edges taken so far; a full-depth path is emitted, not expanded
        if path.len() - 1 >= max_depth {
            continue;
        }

        let Some(current) = path.last().cloned() else {
            continue;
        };

        for edge in store.get_outgoing_edges(&current) {
            let next = edge.end.as_str();
            if path.iter().any(|visited| visited == next) {
                continue;
            }

            let mut extended = path.clone();
            extended.push(next.to_string());
            if next == end_id {
                paths.push(extended);
            } else {
                queue.push_back(extended);
            }
        }
    }

    paths
}
