//! Node implementation for the in-memory graph
//!
//! Nodes carry a unique string identifier, an insertion-ordered set of kind
//! labels, and a property bag.

use super::property::{Properties, PropertyValue};
use super::store::{GraphError, GraphResult};
use indexmap::IndexSet;
use serde_json::Value as JsonValue;

/// A node in the graph
///
/// Identity is the `id` alone; two nodes with the same id compare equal
/// regardless of kinds or properties.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for this node
    pub id: String,

    /// Kind labels, insertion order preserved, duplicates collapsed
    pub kinds: IndexSet<String>,

    /// Properties associated with this node
    pub properties: Properties,
}

impl Node {
    /// Create a new node with the given kinds and no properties
    ///
    /// Fails with [`GraphError::EmptyNodeId`] if `id` is empty.
    pub fn new<I, S>(id: impl Into<String>, kinds: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_properties(id, kinds, Properties::new())
    }

    /// Create a new node with kinds and properties
    pub fn with_properties<I, S>(
        id: impl Into<String>,
        kinds: I,
        properties: Properties,
    ) -> GraphResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        if id.is_empty() {
            return Err(GraphError::EmptyNodeId);
        }

        Ok(Node {
            id,
            kinds: kinds.into_iter().map(Into::into).collect(),
            properties,
        })
    }

    /// Add a kind to this node; returns false if it was already present
    pub fn add_kind(&mut self, kind: impl Into<String>) -> bool {
        self.kinds.insert(kind.into())
    }

    /// Remove a kind, preserving the order of the remaining kinds
    pub fn remove_kind(&mut self, kind: &str) -> bool {
        self.kinds.shift_remove(kind)
    }

    /// Check if node has a specific kind
    pub fn has_kind(&self, kind: &str) -> bool {
        self.kinds.contains(kind)
    }

    /// Get number of kinds
    pub fn kind_count(&self) -> usize {
        self.kinds.len()
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

    /// Parse a node from an ingest-schema JSON entry
    ///
    /// Returns `None` for entries that cannot be represented: a missing,
    /// empty, or non-string `id`, a non-array `kinds` field, non-string
    /// kinds, or properties that violate the schema's value rules. Callers
    /// skip such entries rather than aborting the import.
    pub fn from_value(value: &JsonValue) -> Option<Node> {
        let entry = value.as_object()?;
        let id = entry.get("id")?.as_str()?;

        let mut kinds: Vec<&str> = Vec::new();
        match entry.get("kinds") {
            None | Some(JsonValue::Null) => {}
            Some(JsonValue::Array(items)) => {
                for item in items {
                    kinds.push(item.as_str()?);
                }
            }
            Some(_) => return None,
        }

        let properties = match entry.get("properties") {
            None | Some(JsonValue::Null) => Properties::new(),
            Some(JsonValue::Object(map)) => Properties::try_from_json_map(map).ok()?,
            Some(_) => return None,
        };

        Node::with_properties(id, kinds, properties).ok()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_node() {
        let node = Node::new("user-1", ["Person"]).unwrap();
        assert_eq!(node.id, "user-1");
        assert_eq!(node.kind_count(), 1);
        assert!(node.has_kind("Person"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = Node::new("", ["Person"]);
        assert_eq!(result.unwrap_err(), GraphError::EmptyNodeId);
    }

    #[test]
    fn test_kinds_deduplicated_in_order() {
        let node = Node::new("n", ["Person", "Admin", "Person"]).unwrap();
        let kinds: Vec<&str> = node.kinds.iter().map(String::as_str).collect();
        assert_eq!(kinds, vec!["Person", "Admin"]);
    }

    #[test]
    fn test_add_remove_kinds() {
        let mut node = Node::new("n", ["Person"]).unwrap();

        assert!(node.add_kind("Employee"));
        assert!(!node.add_kind("Employee"));
        assert_eq!(node.kind_count(), 2);

        assert!(node.remove_kind("Person"));
        assert!(!node.remove_kind("Person"));
        assert!(node.has_kind("Employee"));
    }

    #[test]
    fn test_node_properties() {
        let mut node = Node::new("n", ["Person"]).unwrap();

        node.set_property("name", "Alice");
        node.set_property("age", 30i64);
        node.set_property("active", true);

        assert_eq!(node.get_property("name").unwrap().as_str(), Some("Alice"));
        assert_eq!(node.get_property("age").unwrap().as_integer(), Some(30));
        assert_eq!(node.property_count(), 3);

        let removed = node.remove_property("age");
        assert!(removed.is_some());
        assert!(!node.has_property("age"));
    }

    #[test]
    fn test_node_equality_by_id() {
        let node1 = Node::new("same", ["Person"]).unwrap();
        let node2 = Node::new("same", ["Computer"]).unwrap();
        let node3 = Node::new("other", ["Person"]).unwrap();

        assert_eq!(node1, node2);
        assert_ne!(node1, node3);
    }

    #[test]
    fn test_from_value() {
        let node = Node::from_value(&json!({
            "id": "user-1",
            "kinds": ["Person", "Base"],
            "properties": {"name": "alice"}
        }))
        .unwrap();

        assert_eq!(node.id, "user-1");
        assert!(node.has_kind("Base"));
        assert_eq!(node.get_property("name").unwrap().as_str(), Some("alice"));
    }

    #[test]
    fn test_from_value_missing_id_skipped() {
        assert!(Node::from_value(&json!({"kinds": ["Person"]})).is_none());
        assert!(Node::from_value(&json!({"id": ""})).is_none());
        assert!(Node::from_value(&json!({"id": 42})).is_none());
        assert!(Node::from_value(&json!("not an object")).is_none());
    }

    #[test]
    fn test_from_value_bad_properties_skipped() {
        let result = Node::from_value(&json!({
            "id": "n",
            "kinds": ["Person"],
            "properties": {"nested": {"deep": 1}}
        }));
        assert!(result.is_none());
    }

    #[test]
    fn test_from_value_defaults() {
        let node = Node::from_value(&json!({"id": "bare"})).unwrap();
        assert_eq!(node.kind_count(), 0);
        assert_eq!(node.property_count(), 0);
    }
}
