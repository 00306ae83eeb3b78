//! Edge implementation for the property graph

use super::property::{find_slot, PropertyMap, PropertyValue};
use super::types::EdgeKey;
use serde::{Deserialize, Serialize};

/// A directed edge in the knowledge graph
///
/// Edges have:
/// - A subject node (the edge goes FROM this node)
/// - An object node
/// - A key distinguishing parallel edges
/// - Properties (predicate, relation, provenance, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Subject node CURIE
    pub subject: String,

    /// Object node CURIE
    pub object: String,

    /// Discriminator among edges joining the same pair of nodes
    pub key: String,

    /// Properties associated with this edge
    pub properties: PropertyMap,
}

impl Edge {
    /// Create a new directed edge with properties
    pub fn new(
        subject: impl Into<String>,
        object: impl Into<String>,
        key: impl Into<String>,
        properties: PropertyMap,
    ) -> Self {
        Edge {
            subject: subject.into(),
            object: object.into(),
            key: key.into(),
            properties,
        }
    }

    /// Key under which this edge is stored
    pub fn edge_key(&self) -> EdgeKey {
        EdgeKey::new(self.subject.clone(), self.object.clone(), self.key.clone())
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Predicate of this edge, read from `predicate` or `biolink:predicate`
    pub fn predicate(&self) -> Option<&str> {
        find_slot(&self.properties, "predicate").and_then(|(_, value)| value.as_str())
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject && self.object == other.object && self.key == other.key
    }
}

impl Eq for Edge {}
