//! Core type definitions for the graph store

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key identifying an edge: its endpoints plus a discriminator,
/// so that several edges may join the same pair of nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeKey {
    pub subject: String,
    pub object: String,
    pub key: String,
}

impl EdgeKey {
    pub fn new(subject: impl Into<String>, object: impl Into<String>, key: impl Into<String>) -> Self {
        EdgeKey {
            subject: subject.into(),
            object: object.into(),
            key: key.into(),
        }
    }

    /// Check if this edge touches a node at either end
    pub fn touches(&self, node_id: &str) -> bool {
        self.subject == node_id || self.object == node_id
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})-[{}]->({})", self.subject, self.key, self.object)
    }
}
