//! KGX utilities
//!
//! Helpers for a knowledge-graph exchange toolkit: identifier contraction
//! and expansion, case conversion, schema lookups, property-record merging,
//! graph filtering, and a small sink/source pipeline around an in-memory
//! property graph.
//!
//! # Modules
//!
//! - `curie`: CURIE/IRI contraction and expansion against prefix maps
//! - `case`: CamelCase, snake_case and sentence case conversion
//! - `schema`: schema toolkit and `biolink:` element lookups
//! - `cache`: bounded LRU cache
//! - `merge`: merging of repeated node/edge records
//! - `filter`: removal of nodes and edges by property value
//! - `graph`: in-memory property graph
//! - `transformer`, `sink`, `source`: record pipeline
//! - `services`: lazily built shared services
//! - `config`, `logging`: ambient setup
//!
//! ## Example Usage
//!
//! ```rust
//! use kgx::filter::{apply_node_filters, FilterMap, FilterValue};
//! use kgx::graph::{GraphStore, PropertyMap, PropertyValue};
//!
//! let mut graph = GraphStore::new();
//! let mut gene = PropertyMap::new();
//! gene.insert("biolink:category".into(), PropertyValue::from(vec!["biolink:Gene"]));
//! graph.add_node("HGNC:11603", gene);
//!
//! let mut disease = PropertyMap::new();
//! disease.insert("biolink:category".into(), PropertyValue::from(vec!["biolink:Disease"]));
//! graph.add_node("MONDO:0005148", disease);
//!
//! let mut filters = FilterMap::new();
//! filters.insert("biolink:category".into(), FilterValue::from(["biolink:Gene"]));
//! assert_eq!(apply_node_filters(&mut graph, &filters), 1);
//! assert!(graph.has_node("HGNC:11603"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod case;
pub mod config;
pub mod curie;
pub mod filter;
pub mod graph;
pub mod identifiers;
pub mod logging;
pub mod merge;
pub mod schema;
pub mod services;
pub mod sink;
pub mod source;
pub mod transformer;

// Re-export main types for convenience
pub use cache::{BoundedCache, CacheError, CacheResult, DEFAULT_CACHE_SIZE};

pub use case::{
    camelcase_to_sentencecase, sentencecase_to_camelcase, sentencecase_to_snakecase,
    snakecase_to_sentencecase,
};

pub use config::{ConfigError, ConfigResult, KgxConfig};

pub use curie::{contract, expand, is_curie, is_iri, CurieError, CurieResult, PrefixManager, PrefixMap};

pub use filter::{
    apply_edge_filters, apply_filters, apply_node_filters, FilterError, FilterMap, FilterSet,
    FilterSummary, FilterValue,
};

pub use graph::{Edge, EdgeKey, GraphError, GraphResult, GraphStore, Node, PropertyMap, PropertyValue, Scalar};

pub use identifiers::{generate_edge_identifiers, generate_edge_key, generate_uuid};

pub use merge::{prepare_data_dict, MultivaluedTable, PropertyMerger};

pub use schema::{
    get_biolink_ancestors, get_biolink_descendants, get_biolink_element, get_biolink_mapping,
    get_biolink_property_types, ModelToolkit, SchemaError, SchemaResult, SchemaToolkit,
};

pub use services::KgxContext;

pub use sink::{CsvSink, DebugSink, GraphSink, ProgressSink, Sink, SinkError, SinkResult};

pub use source::{GraphSource, Source};

pub use transformer::{TransformError, TransformResult, Transformer, DEFAULT_NODE_CATEGORY};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
