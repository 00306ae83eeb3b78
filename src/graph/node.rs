//! Node implementation for the property graph

use super::property::{find_slot, PropertyMap};
use serde::{Deserialize, Serialize};

/// A node in the knowledge graph
///
/// Nodes have:
/// - A CURIE identifier
/// - An ordered property record (category, name, xrefs, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// CURIE identifying this node
    pub id: String,

    /// Properties associated with this node
    pub properties: PropertyMap,
}

impl Node {
    /// Create a new node without properties
    pub fn new(id: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Categories of this node, read from `category` or `biolink:category`
    pub fn categories(&self) -> Vec<String> {
        find_slot(&self.properties, "category")
            .map(|(_, value)| value.string_values())
            .unwrap_or_default()
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
