//! In-memory property graph used by the filtering and identifier passes
//!
//! This module implements the knowledge graph data model with:
//! - Nodes keyed by CURIE, carrying an ordered property record
//! - Directed edges keyed by (subject, object, key), multiple edges per node pair
//! - Property values tagged as scalar or sequence

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::Node;
pub use property::{find_slot, local_name, PropertyMap, PropertyValue, Scalar};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::EdgeKey;
