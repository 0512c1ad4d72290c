//! Edge implementation for the in-memory graph
//!
//! Edges are directed and one-way; no implicit reverse edge exists. Identity
//! for deduplication is the `(start, end, kind)` triple, properties excluded.

use super::property::{Properties, PropertyValue};
use super::store::{GraphError, GraphResult};
use serde_json::Value as JsonValue;

/// A directed edge in the graph
#[derive(Debug, Clone)]
pub struct Edge {
    /// ID of the source node (edge goes FROM this node)
    pub start: String,

    /// ID of the destination node (edge goes TO this node)
    pub end: String,

    /// Relationship kind (e.g., "Knows", "AdminTo")
    pub kind: String,

    /// Properties associated with this edge
    pub properties: Properties,
}

/// Identity of an edge: the `(start, end, kind)` triple
///
/// Two edges with the same key are the same edge for deduplication purposes
/// regardless of their properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub start: String,
    pub end: String,
    pub kind: String,
}

impl Edge {
    /// Create a new directed edge with no properties
    ///
    /// Fails with a [`GraphError`] if any of the three fields is empty.
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        kind: impl Into<String>,
    ) -> GraphResult<Self> {
        Self::with_properties(start, end, kind, Properties::new())
    }

    /// Create a new directed edge with properties
    pub fn with_properties(
        start: impl Into<String>,
        end: impl Into<String>,
        kind: impl Into<String>,
        properties: Properties,
    ) -> GraphResult<Self> {
        let start = start.into();
        let end = end.into();
        let kind = kind.into();

        if start.is_empty() {
            return Err(GraphError::EmptyEdgeStart);
        }
        if end.is_empty() {
            return Err(GraphError::EmptyEdgeEnd);
        }
        if kind.is_empty() {
            return Err(GraphError::EmptyEdgeKind);
        }

        Ok(Edge {
            start,
            end,
            kind,
            properties,
        })
    }

    /// The identity triple of this edge
    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            start: self.start.clone(),
            end: self.end.clone(),
            kind: self.kind.clone(),
        }
    }

    /// Check if this edge goes FROM a specific node
    pub fn starts_from(&self, id: &str) -> bool {
        self.start == id
    }

    /// Check if this edge goes TO a specific node
    pub fn ends_at(&self, id: &str) -> bool {
        self.end == id
    }

    /// Check if this edge connects two specific nodes, in either direction
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    /// Set a property value
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.properties.insert(key, value)
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Remove a property
    pub fn remove_property(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.remove(key)
    }

    /// Check if property exists
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Get number of properties
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Parse an edge from an ingest-schema JSON entry
    ///
    /// Three historical encodings of the endpoints are accepted, tried in
    /// order:
    ///
    /// 1. `{"start": {"value": id}, "end": {"value": id}}`
    /// 2. `{"source": id, "target": id}`
    /// 3. `{"start_node_id": id, "end_node_id": id}`
    ///
    /// Returns `None` for entries missing `kind`, matching none of the
    /// endpoint forms, carrying empty endpoint values, or carrying
    /// properties that violate the schema's value rules.
    pub fn from_value(value: &JsonValue) -> Option<Edge> {
        let entry = value.as_object()?;
        let kind = entry.get("kind")?.as_str()?;

        let (start, end) = if let (Some(start), Some(end)) = (entry.get("start"), entry.get("end"))
        {
            (start.get("value")?.as_str()?, end.get("value")?.as_str()?)
        } else if let (Some(source), Some(target)) = (entry.get("source"), entry.get("target")) {
            (source.as_str()?, target.as_str()?)
        } else if let (Some(start), Some(end)) =
            (entry.get("start_node_id"), entry.get("end_node_id"))
        {
            (start.as_str()?, end.as_str()?)
        } else {
            return None;
        };

        let properties = match entry.get("properties") {
            None | Some(JsonValue::Null) => Properties::new(),
            Some(JsonValue::Object(map)) => Properties::try_from_json_map(map).ok()?,
            Some(_) => return None,
        };

        Edge::with_properties(start, end, kind, properties).ok()
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.kind == other.kind
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        self.kind.hash(state);
    }
}
