//! Ingest-schema JSON codec
//!
//! Serializes a [`GraphStore`] to the external ingestion document shape and
//! populates a store back from it. Import is tolerant: individually
//! malformed node and edge records are skipped, three historical edge
//! encodings are accepted, and only a missing top-level `graph` key aborts
//! the whole import. Import merges into the existing store and inserts
//! through the unchecked path; run
//! [`validate`](crate::graph::validate::validate) afterwards when
//! invariant-checked results are required.

use crate::graph::{Edge, GraphStore, Node, Properties};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Codec errors
#[derive(Error, Debug)]
pub enum CodecError {
    /// The document has no top-level `graph` key; nothing was imported
    #[error("document is missing the top-level \"graph\" key")]
    MissingGraphKey,

    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Serializable view of a store in the external document shape
#[derive(Debug, Serialize)]
pub struct GraphDocument<'a> {
    graph: GraphBody<'a>,

    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata<'a>>,
}

#[derive(Debug, Serialize)]
struct GraphBody<'a> {
    nodes: Vec<NodeWire<'a>>,
    edges: Vec<EdgeWire<'a>>,
}

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    source_kind: &'a str,
}

#[derive(Debug, Serialize)]
struct NodeWire<'a> {
    id: &'a str,
    kinds: Vec<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a Properties>,
}

#[derive(Debug, Serialize)]
struct EdgeWire<'a> {
    kind: &'a str,
    start: EndpointRef<'a>,
    end: EndpointRef<'a>,

    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a Properties>,
}

#[derive(Debug, Serialize)]
struct EndpointRef<'a> {
    value: &'a str,
    match_by: &'static str,
}

fn non_empty(properties: &Properties) -> Option<&Properties> {
    if properties.is_empty() {
        None
    } else {
        Some(properties)
    }
}

/// Build the serializable document view of a store
///
/// `metadata.source_kind` is present only when `include_metadata` is
/// requested and the store carries a source kind.
pub fn to_document(store: &GraphStore, include_metadata: bool) -> GraphDocument<'_> {
    let nodes = store
        .nodes()
        .map(|node| NodeWire {
            id: &node.id,
            kinds: node.kinds.iter().map(String::as_str).collect(),
            properties: non_empty(&node.properties),
        })
        .collect();

    let edges = store
        .edges()
        .map(|edge| EdgeWire {
            kind: &edge.kind,
            start: EndpointRef {
                value: &edge.start,
                match_by: "id",
            },
            end: EndpointRef {
                value: &edge.end,
                match_by: "id",
            },
            properties: non_empty(&edge.properties),
        })
        .collect();

    let metadata = match store.source_kind() {
        Some(source_kind) if include_metadata => Some(Metadata { source_kind }),
        _ => None,
    };

    GraphDocument {
        graph: GraphBody { nodes, edges },
        metadata,
    }
}

/// Export the store as a pretty-printed JSON document
pub fn export_json(store: &GraphStore, include_metadata: bool) -> CodecResult<String> {
    Ok(serde_json::to_string_pretty(&to_document(
        store,
        include_metadata,
    ))?)
}

/// Export the store to a JSON file
pub fn export_to_file(
    store: &GraphStore,
    path: impl AsRef<Path>,
    include_metadata: bool,
) -> CodecResult<()> {
    let path = path.as_ref();
    let json = export_json(store, include_metadata)?;
    fs::write(path, json)?;
    info!(
        "Exported {} nodes and {} edges to {}",
        store.node_count(),
        store.edge_count(),
        path.display()
    );
    Ok(())
}

/// Import a parsed document into the store
///
/// Merges into existing content; callers wanting a clean import must call
/// [`GraphStore::clear`] first. Node entries without a usable `id` and edge
/// entries matching none of the recognized shapes are skipped. The store's
/// source kind is overwritten from `metadata.source_kind` when present and
/// left untouched otherwise. Fails only when the top-level `graph` key is
/// absent, in which case nothing is imported.
pub fn import_value(store: &mut GraphStore, document: &JsonValue) -> CodecResult<()> {
    let graph = document.get("graph").ok_or(CodecError::MissingGraphKey)?;

    let mut skipped_nodes = 0usize;
    if let Some(entries) = graph.get("nodes").and_then(JsonValue::as_array) {
        for entry in entries {
            match Node::from_value(entry) {
                Some(node) => store.add_node_unchecked(node),
                None => skipped_nodes += 1,
            }
        }
    }

    let mut skipped_edges = 0usize;
    if let Some(entries) = graph.get("edges").and_then(JsonValue::as_array) {
        for entry in entries {
            match Edge::from_value(entry) {
                Some(edge) => store.add_edge_unchecked(edge),
                None => skipped_edges += 1,
            }
        }
    }

    if skipped_nodes > 0 {
        debug!("Skipped {} malformed node records", skipped_nodes);
    }
    if skipped_edges > 0 {
        debug!("Skipped {} malformed edge records", skipped_edges);
    }

    if let Some(source_kind) = document
        .get("metadata")
        .and_then(|metadata| metadata.get("source_kind"))
        .and_then(JsonValue::as_str)
    {
        store.set_source_kind(Some(source_kind.to_string()));
    }

    Ok(())
}

/// Import a JSON string into the store
pub fn import_json(store: &mut GraphStore, json: &str) -> CodecResult<()> {
    let document: JsonValue = serde_json::from_str(json)?;
    import_value(store, &document)
}

/// Import a JSON file into the store
pub fn import_file(store: &mut GraphStore, path: impl AsRef<Path>) -> CodecResult<()> {
    let path = path.as_ref();
    info!("Loading graph from {}", path.display());
    let data = fs::read_to_string(path)?;
    import_json(store, &data)?;
    info!(
        "Loaded graph: {} nodes, {} edges",
        store.node_count(),
        store.edge_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_store() -> GraphStore {
        let mut store = GraphStore::with_source_kind("Base");
        store.add_node(Node::new("123", ["Person"]).unwrap());
        store.add_node(Node::new("234", ["Person"]).unwrap());
        let mut edge = Edge::new("123", "234", "Knows").unwrap();
        edge.set_property("since", 2020i64);
        store.add_edge(edge);
        store
    }

    #[test]
    fn test_export_shape() {
        let mut store = GraphStore::with_source_kind("Base");
        let mut node = Node::new("123", ["Person"]).unwrap();
        node.set_property("name", "BOB");
        store.add_node(node);
        store.add_node(Node::new("234", ["Person"]).unwrap());
        store.add_edge(Edge::new("123", "234", "Knows").unwrap());

        let value = serde_json::to_value(to_document(&store, true)).unwrap();
        assert_eq!(
            value,
            json!({
                "graph": {
                    "nodes": [
                        {
                            "id": "123",
                            "kinds": ["Person", "Base"],
                            "properties": {"name": "BOB"}
                        },
                        {"id": "234", "kinds": ["Person", "Base"]}
                    ],
                    "edges": [
                        {
                            "kind": "Knows",
                            "start": {"value": "123", "match_by": "id"},
                            "end": {"value": "234", "match_by": "id"}
                        }
                    ]
                },
                "metadata": {"source_kind": "Base"}
            })
        );
    }

    #[test]
    fn test_export_metadata_rules() {
        let store = sample_store();

        // metadata present: requested and source kind set
        let with = serde_json::to_value(to_document(&store, true)).unwrap();
        assert!(with.get("metadata").is_some());

        // metadata suppressed on request
        let without = serde_json::to_value(to_document(&store, false)).unwrap();
        assert!(without.get("metadata").is_none());

        // metadata suppressed when there is no source kind
        let mut bare = GraphStore::new();
        bare.add_node(Node::new("x", ["Person"]).unwrap());
        let value = serde_json::to_value(to_document(&bare, true)).unwrap();
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_import_all_edge_encodings() {
        let document = json!({
            "graph": {
                "nodes": [
                    {"id": "a", "kinds": ["User"]},
                    {"id": "b", "kinds": ["User"]}
                ],
                "edges": [
                    {
                        "kind": "Knows",
                        "start": {"value": "a", "match_by": "id"},
                        "end": {"value": "b", "match_by": "id"}
                    },
                    {"kind": "Owns", "source": "a", "target": "b"},
                    {"kind": "MemberOf", "start_node_id": "a", "end_node_id": "b"}
                ]
            }
        });

        let mut store = GraphStore::new();
        import_value(&mut store, &document).unwrap();
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 3);
        assert_eq!(store.get_edges_by_kind("Owns").len(), 1);
    }

    #[test]
    fn test_import_skips_malformed_records() {
        let document = json!({
            "graph": {
                "nodes": [
                    {"id": "good", "kinds": ["User"]},
                    {"invalid_key": "invalid_value"},
                    {"id": "", "kinds": ["User"]}
                ],
                "edges": [
                    {"kind": "Knows", "source": "good", "target": "other"},
                    {"invalid_key": "invalid_value"},
                    {"source": "good", "target": "other"}
                ]
            }
        });

        let mut store = GraphStore::new();
        import_value(&mut store, &document).unwrap();
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_import_missing_graph_key_fails() {
        let mut store = GraphStore::new();

        let result = import_value(&mut store, &json!({"metadata": {"source_kind": "T"}}));
        assert!(matches!(result, Err(CodecError::MissingGraphKey)));
        assert_eq!(store.node_count(), 0);
        assert_eq!(store.edge_count(), 0);
        // the aborted import never reached the metadata either
        assert_eq!(store.source_kind(), None);
    }

    #[test]
    fn test_import_edges_only_yields_dangling_edges() {
        let document = json!({
            "graph": {
                "edges": [{"source": "X", "target": "Y", "kind": "OWNS"}]
            }
        });

        let mut store = GraphStore::new();
        import_value(&mut store, &document).unwrap();
        assert_eq!(store.node_count(), 0);
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.isolated_edge_count(), 1);
    }

    #[test]
    fn test_import_merges_into_existing_store() {
        let mut store = GraphStore::new();
        store.add_node(Node::new("existing", ["User"]).unwrap());

        let document = json!({
            "graph": {"nodes": [{"id": "imported", "kinds": ["User"]}]}
        });
        import_value(&mut store, &document).unwrap();

        assert_eq!(store.node_count(), 2);
        assert!(store.has_node("existing"));
        assert!(store.has_node("imported"));
    }

    #[test]
    fn test_import_source_kind_handling() {
        let mut store = GraphStore::with_source_kind("Old");

        // no metadata: source kind left as-is
        import_value(&mut store, &json!({"graph": {"nodes": []}})).unwrap();
        assert_eq!(store.source_kind(), Some("Old"));

        // metadata present: overwritten
        import_value(
            &mut store,
            &json!({"graph": {"nodes": []}, "metadata": {"source_kind": "New"}}),
        )
        .unwrap();
        assert_eq!(store.source_kind(), Some("New"));
    }

    #[test]
    fn test_import_json_rejects_invalid_json() {
        let mut store = GraphStore::new();
        let result = import_json(&mut store, "{\"invalid\": json}");
        assert!(matches!(result, Err(CodecError::Json(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let store = sample_store();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        export_to_file(&store, &path, true).unwrap();

        let mut restored = GraphStore::new();
        restored.clear();
        import_file(&mut restored, &path).unwrap();

        assert_eq!(restored.node_count(), store.node_count());
        assert_eq!(restored.edge_count(), store.edge_count());
        assert_eq!(restored.source_kind(), Some("Base"));
        assert_eq!(
            restored
                .edges()
                .next()
                .unwrap()
                .get_property("since")
                .unwrap()
                .as_integer(),
            Some(2020)
        );
    }

    #[test]
    fn test_import_file_missing_path_fails() {
        let mut store = GraphStore::new();
        let result = import_file(&mut store, "/nonexistent/graph.json");
        assert!(matches!(result, Err(CodecError::Io(_))));
    }
}
