//! In-memory graph storage implementation
//!
//! Nodes are keyed by CURIE and edges by `(subject, object, key)`. Both maps
//! keep insertion order so every pass over the graph is deterministic.

use super::edge::Edge;
use super::node::Node;
use super::property::{find_slot, PropertyMap};
use super::types::EdgeKey;
use crate::identifiers::generate_edge_key;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(String),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeKey),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// Uses hash maps for O(1) lookup performance:
/// - nodes: CURIE -> Node
/// - edges: EdgeKey -> Edge
/// - outgoing: CURIE -> EdgeKeys (adjacency list for outgoing edges)
/// - incoming: CURIE -> EdgeKeys (adjacency list for incoming edges)
#[derive(Debug, Default, Clone)]
pub struct GraphStore {
    /// Optional graph name, used in reports
    pub name: Option<String>,

    /// Node storage
    nodes: IndexMap<String, Node>,

    /// Edge storage
    edges: IndexMap<EdgeKey, Edge>,

    /// Outgoing edges for each node (adjacency list)
    outgoing: HashMap<String, IndexSet<EdgeKey>>,

    /// Incoming edges for each node (adjacency list)
    incoming: HashMap<String, IndexSet<EdgeKey>>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty, named graph store
    pub fn with_name(name: impl Into<String>) -> Self {
        GraphStore {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Add a node, or update the properties of an existing one.
    ///
    /// Incoming properties overwrite existing values key by key; use
    /// [`crate::merge::prepare_data_dict`] first when values should accumulate.
    pub fn add_node(&mut self, id: impl Into<String>, properties: PropertyMap) -> &mut Node {
        let id = id.into();
        let node = self
            .nodes
            .entry(id.clone())
            .or_insert_with(|| Node::new(id));
        node.properties.extend(properties);
        node
    }

    /// Add a directed edge; missing endpoint nodes are created without properties.
    ///
    /// When `key` is `None` the key is derived from the subject, predicate and object.
    /// Adding an edge under an existing key updates its properties.
    pub fn add_edge(
        &mut self,
        subject: impl Into<String>,
        object: impl Into<String>,
        key: Option<&str>,
        properties: PropertyMap,
    ) -> EdgeKey {
        let subject = subject.into();
        let object = object.into();

        if !self.nodes.contains_key(&subject) {
            self.add_node(subject.clone(), PropertyMap::new());
        }
        if !self.nodes.contains_key(&object) {
            self.add_node(object.clone(), PropertyMap::new());
        }

        let key = match key {
            Some(k) => k.to_string(),
            None => {
                let predicate = find_slot(&properties, "predicate")
                    .and_then(|(_, value)| value.as_str())
                    .unwrap_or_default();
                generate_edge_key(&subject, predicate, &object)
            }
        };
        let edge_key = EdgeKey::new(subject.clone(), object.clone(), key.clone());

        match self.edges.get_mut(&edge_key) {
            Some(existing) => existing.properties.extend(properties),
            None => {
                self.outgoing
                    .entry(subject.clone())
                    .or_default()
                    .insert(edge_key.clone());
                self.incoming
                    .entry(object.clone())
                    .or_default()
                    .insert(edge_key.clone());
                self.edges
                    .insert(edge_key.clone(), Edge::new(subject, object, key, properties));
            }
        }

        edge_key
    }

    /// Get a node by CURIE
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable node by CURIE
    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get an edge by key
    pub fn get_edge(&self, key: &EdgeKey) -> Option<&Edge> {
        self.edges.get(key)
    }

    /// Get a mutable edge by key
    pub fn get_edge_mut(&mut self, key: &EdgeKey) -> Option<&mut Edge> {
        self.edges.get_mut(key)
    }

    /// Check if an edge exists
    pub fn has_edge(&self, key: &EdgeKey) -> bool {
        self.edges.contains_key(key)
    }

    /// Replace the properties of a node
    pub fn set_node_properties(&mut self, id: &str, properties: PropertyMap) -> GraphResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        node.properties = properties;
        Ok(())
    }

    /// Replace the properties of an edge
    pub fn set_edge_properties(&mut self, key: &EdgeKey, properties: PropertyMap) -> GraphResult<()> {
        let edge = self
            .edges
            .get_mut(key)
            .ok_or_else(|| GraphError::EdgeNotFound(key.clone()))?;
        edge.properties = properties;
        Ok(())
    }

    /// Remove a node together with every edge incident to it
    pub fn remove_node(&mut self, id: &str) -> GraphResult<Node> {
        let node = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;

        // Remove all connected edges
        let outgoing = self.outgoing.remove(id).unwrap_or_default();
        let incoming = self.incoming.remove(id).unwrap_or_default();
        let mut dropped = 0;
        for key in outgoing.iter().chain(incoming.iter()) {
            if self.remove_edge(key).is_ok() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            debug!("Removed {} edges incident to node {}", dropped, id);
        }

        Ok(node)
    }

    /// Remove an edge
    pub fn remove_edge(&mut self, key: &EdgeKey) -> GraphResult<Edge> {
        let edge = self
            .edges
            .shift_remove(key)
            .ok_or_else(|| GraphError::EdgeNotFound(key.clone()))?;

        if let Some(keys) = self.outgoing.get_mut(&edge.subject) {
            keys.shift_remove(key);
        }
        if let Some(keys) = self.incoming.get_mut(&edge.object) {
            keys.shift_remove(key);
        }

        Ok(edge)
    }

    /// Iterate over all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate over all edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&EdgeKey, &Edge)> {
        self.edges.iter()
    }

    /// Iterate mutably over all edges
    pub fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> {
        self.edges.values_mut()
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check whether the graph holds neither nodes nor edges
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Clear all data
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.outgoing.clear();
        self.incoming.clear();
    }
}
