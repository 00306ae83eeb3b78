//! Property value types for graph nodes and edges
//!
//! A property is either a single scalar or an ordered sequence of scalars.
//! Records keep insertion order so merged output is deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single property value
///
/// Supports:
/// - String
/// - Integer (i64)
/// - Float (f64)
/// - Boolean
/// - Null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Get string value if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::String(_) => "String",
            Scalar::Integer(_) => "Integer",
            Scalar::Float(_) => "Float",
            Scalar::Boolean(_) => "Boolean",
            Scalar::Null => "Null",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{}", s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(fl) => write!(f, "{}", fl),
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Null => write!(f, "null"),
        }
    }
}

/// Property value: a scalar or an ordered sequence of scalars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
}

impl PropertyValue {
    /// Check if value is a sequence
    pub fn is_sequence(&self) -> bool {
        matches!(self, PropertyValue::Sequence(_))
    }

    /// Get the scalar if this is not a sequence
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            PropertyValue::Scalar(s) => Some(s),
            PropertyValue::Sequence(_) => None,
        }
    }

    /// Get string value if this is a string scalar
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Get the sequence if this is one
    pub fn as_sequence(&self) -> Option<&[Scalar]> {
        match self {
            PropertyValue::Sequence(values) => Some(values),
            PropertyValue::Scalar(_) => None,
        }
    }

    /// View the value as a slice of scalars; a scalar is a one-element slice
    pub fn scalars(&self) -> &[Scalar] {
        match self {
            PropertyValue::Scalar(s) => std::slice::from_ref(s),
            PropertyValue::Sequence(values) => values,
        }
    }

    /// String form of every scalar, for set-membership tests
    pub fn string_values(&self) -> Vec<String> {
        self.scalars()
            .iter()
            .filter(|s| !s.is_null())
            .map(|s| s.to_string())
            .collect()
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Scalar(s) => s.type_name(),
            PropertyValue::Sequence(_) => "Sequence",
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Scalar(s) => write!(f, "{}", s),
            PropertyValue::Sequence(values) => {
                write!(f, "[")?;
                for (i, val) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
        }
    }
}

// Convenience conversions
impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Scalar::Integer(i as i64)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

impl From<Scalar> for PropertyValue {
    fn from(s: Scalar) -> Self {
        PropertyValue::Scalar(s)
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Scalar(Scalar::String(s))
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Scalar(Scalar::Integer(i))
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Scalar(Scalar::Integer(i as i64))
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Scalar(Scalar::Float(f))
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Scalar(Scalar::Boolean(b))
    }
}

impl From<Vec<Scalar>> for PropertyValue {
    fn from(values: Vec<Scalar>) -> Self {
        PropertyValue::Sequence(values)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(values: Vec<&str>) -> Self {
        PropertyValue::Sequence(values.into_iter().map(Scalar::from).collect())
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        PropertyValue::Sequence(values.into_iter().map(Scalar::from).collect())
    }
}

/// Property record for nodes and edges, in insertion order
pub type PropertyMap = IndexMap<String, PropertyValue>;

/// Local part of a possibly namespaced property name (`biolink:category` -> `category`)
pub fn local_name(key: &str) -> &str {
    key.rsplit_once(':').map(|(_, local)| local).unwrap_or(key)
}

/// Look up a slot by exact name, falling back to its bare or `biolink:` form
pub fn find_slot<'a>(props: &'a PropertyMap, slot: &str) -> Option<(&'a str, &'a PropertyValue)> {
    if let Some((key, value)) = props.get_key_value(slot) {
        return Some((key.as_str(), value));
    }
    let local = local_name(slot);
    let alternate = if local == slot {
        format!("biolink:{}", slot)
    } else {
        local.to_string()
    };
    props
        .get_key_value(alternate.as_str())
        .map(|(key, value)| (key.as_str(), value))
}
