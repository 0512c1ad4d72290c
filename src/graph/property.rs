//! Property value types for graph nodes and edges
//!
//! The ingest schema only allows primitive property values and homogeneous
//! arrays of primitives; nested objects are rejected at conversion time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error;

/// Errors produced when converting arbitrary JSON into property values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("property values must be primitives or arrays of primitives, got an object")]
    ObjectValue,

    #[error("array properties may only contain primitive values")]
    NonPrimitiveArrayItem,

    #[error("array properties must be homogeneous, found {first} and {other}")]
    MixedArray {
        first: &'static str,
        other: &'static str,
    },

    #[error("number is out of the representable range")]
    NumberOutOfRange,
}

/// A single property value
///
/// Serializes untagged, so values appear in JSON as plain scalars and
/// arrays rather than enum wrappers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Get string value if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get array value if this is an array
    pub fn as_array(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Null => "Null",
            PropertyValue::Boolean(_) => "Boolean",
            PropertyValue::Integer(_) => "Integer",
            PropertyValue::Float(_) => "Float",
            PropertyValue::String(_) => "String",
            PropertyValue::Array(_) => "Array",
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::String(s) => write!(f, "\"{}\"", s),
            PropertyValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

// Convenience conversions
impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(items: Vec<PropertyValue>) -> Self {
        PropertyValue::Array(items)
    }
}

impl TryFrom<&JsonValue> for PropertyValue {
    type Error = PropertyError;

    fn try_from(value: &JsonValue) -> Result<Self, PropertyError> {
        match value {
            JsonValue::Null => Ok(PropertyValue::Null),
            JsonValue::Bool(b) => Ok(PropertyValue::Boolean(*b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(PropertyValue::Integer(i))
                } else {
                    n.as_f64()
                        .map(PropertyValue::Float)
                        .ok_or(PropertyError::NumberOutOfRange)
                }
            }
            JsonValue::String(s) => Ok(PropertyValue::String(s.clone())),
            JsonValue::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                let mut first: Option<&'static str> = None;
                for item in items {
                    let converted = PropertyValue::try_from(item)?;
                    if matches!(converted, PropertyValue::Array(_) | PropertyValue::Null) {
                        return Err(PropertyError::NonPrimitiveArrayItem);
                    }
                    let name = converted.type_name();
                    match first {
                        None => first = Some(name),
                        Some(f) if f != name => {
                            return Err(PropertyError::MixedArray {
                                first: f,
                                other: name,
                            })
                        }
                        Some(_) => {}
                    }
                    out.push(converted);
                }
                Ok(PropertyValue::Array(out))
            }
            JsonValue::Object(_) => Err(PropertyError::ObjectValue),
        }
    }
}

/// Insertion-ordered property bag for nodes and edges
///
/// Backed by an [`IndexMap`] so that enumeration and serialization preserve
/// the order in which properties were set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    entries: IndexMap<String, PropertyValue>,
}

impl Properties {
    /// Create an empty property bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property value
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// Set a property value, returning the previous value if any
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a property, preserving the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.entries.shift_remove(key)
    }

    /// Check if a property exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Enumerate properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Property keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Get number of properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the bag is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all properties
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Build a bag from a JSON object, rejecting unsupported value shapes
    pub fn try_from_json_map(
        map: &serde_json::Map<String, JsonValue>,
    ) -> Result<Self, PropertyError> {
        let mut properties = Properties::new();
        for (key, value) in map {
            properties.insert(key.clone(), PropertyValue::try_from(value)?);
        }
        Ok(properties)
    }
}

impl FromIterator<(String, PropertyValue)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Properties {
            entries: iter.into_iter().collect(),
        }
    }
}
