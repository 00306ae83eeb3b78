//! Graph transformer: a graph plus the filters that shape it
//!
//! Records enter through [`Transformer::add_node_record`] and
//! [`Transformer::add_edge_record`], which validate them and merge repeated
//! entities with [`prepare_data_dict`].

use crate::config::KgxConfig;
use crate::filter::{apply_filters, FilterError, FilterSet, FilterSummary, FilterValue};
use crate::graph::{find_slot, EdgeKey, GraphError, GraphStore, PropertyMap, PropertyValue};
use crate::identifiers::generate_edge_key;
use crate::merge::prepare_data_dict;
use thiserror::Error;
use tracing::{debug, info};

/// Category assigned to nodes that arrive without one
pub const DEFAULT_NODE_CATEGORY: &str = "biolink:NamedThing";

/// Transformation errors
#[derive(Error, Debug)]
pub enum TransformError {
    /// A record lacks a required property
    #[error("{entity} does not have '{property}' property")]
    MissingProperty {
        entity: &'static str,
        property: &'static str,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

pub type TransformResult<T> = Result<T, TransformError>;

/// Value of a required slot as a string
fn required(record: &PropertyMap, entity: &'static str, property: &'static str) -> TransformResult<String> {
    find_slot(record, property)
        .and_then(|(_, value)| value.as_scalar())
        .filter(|scalar| !scalar.is_null())
        .map(|scalar| scalar.to_string())
        .ok_or(TransformError::MissingProperty { entity, property })
}

#[derive(Debug, Clone)]
pub struct Transformer {
    pub graph: GraphStore,
    pub filters: FilterSet,
    pub graph_metadata: PropertyMap,
    default_node_category: String,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer {
    pub fn new() -> Self {
        Self::with_graph(GraphStore::new())
    }

    pub fn with_graph(graph: GraphStore) -> Self {
        Self {
            graph,
            filters: FilterSet::new(),
            graph_metadata: PropertyMap::new(),
            default_node_category: DEFAULT_NODE_CATEGORY.to_string(),
        }
    }

    pub fn from_config(config: &KgxConfig) -> Self {
        let mut transformer = Self::new();
        transformer.default_node_category = config.default_node_category.clone();
        transformer
    }

    pub fn default_node_category(&self) -> &str {
        &self.default_node_category
    }

    /// Set a node filter. A `category` filter must be a set and also
    /// restricts both edge endpoints.
    pub fn set_node_filter(&mut self, key: &str, value: impl Into<FilterValue>) -> TransformResult<()> {
        Ok(self.filters.set_node_filter(key, value)?)
    }

    /// Set an edge filter. Endpoint category filters must be sets and also
    /// restrict nodes by `category`.
    pub fn set_edge_filter(&mut self, key: &str, value: impl Into<FilterValue>) -> TransformResult<()> {
        Ok(self.filters.set_edge_filter(key, value)?)
    }

    /// Check a node record for required properties, applying defaults
    pub fn validate_node(&self, mut node: PropertyMap) -> TransformResult<PropertyMap> {
        if node.is_empty() {
            debug!("Empty node encountered");
            return Ok(node);
        }
        required(&node, "node", "id")?;
        if find_slot(&node, "name").is_none() {
            debug!("node does not have 'name' property: {:?}", node);
        }
        if find_slot(&node, "category").is_none() {
            debug!(
                "node does not have 'category' property, using {} as default",
                self.default_node_category
            );
            node.insert(
                "category".to_string(),
                PropertyValue::Sequence(vec![self.default_node_category.as_str().into()]),
            );
        }
        Ok(node)
    }

    /// Check an edge record for `subject`, `predicate` and `object`
    pub fn validate_edge(edge: PropertyMap) -> TransformResult<PropertyMap> {
        for property in ["subject", "predicate", "object"] {
            required(&edge, "edge", property)?;
        }
        Ok(edge)
    }

    /// Validate a node record and merge it into the graph.
    ///
    /// Returns the node id, or `None` for an empty record.
    pub fn add_node_record(&mut self, record: PropertyMap) -> TransformResult<Option<String>> {
        let record = self.validate_node(record)?;
        if record.is_empty() {
            return Ok(None);
        }
        let id = required(&record, "node", "id")?;
        match self.graph.get_node(&id) {
            Some(existing) => {
                let merged = prepare_data_dict(&existing.properties, &record, true);
                self.graph.set_node_properties(&id, merged)?;
            }
            None => {
                self.graph.add_node(id.clone(), record);
            }
        }
        Ok(Some(id))
    }

    /// Validate an edge record and merge it into the graph
    pub fn add_edge_record(&mut self, record: PropertyMap) -> TransformResult<EdgeKey> {
        let record = Self::validate_edge(record)?;
        let subject = required(&record, "edge", "subject")?;
        let predicate = required(&record, "edge", "predicate")?;
        let object = required(&record, "edge", "object")?;

        let key = EdgeKey::new(
            subject.clone(),
            object.clone(),
            generate_edge_key(&subject, &predicate, &object),
        );
        match self.graph.get_edge(&key) {
            Some(existing) => {
                let merged = prepare_data_dict(&existing.properties, &record, true);
                self.graph.set_edge_properties(&key, merged)?;
                Ok(key)
            }
            None => Ok(self.graph.add_edge(subject, object, Some(&key.key), record)),
        }
    }

    /// Apply the node filters, then the edge filters, to the graph
    pub fn apply_filters(&mut self) -> FilterSummary {
        apply_filters(
            &mut self.graph,
            &self.filters.node_filters,
            &self.filters.edge_filters,
        )
    }

    /// Log node and edge totals
    pub fn report(&self) {
        let name = self.graph.name.as_deref().unwrap_or("graph");
        info!("Total nodes in {}: {}", name, self.graph.node_count());
        info!("Total edges in {}: {}", name, self.graph.edge_count());
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0 && self.graph.edge_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, PropertyValue)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_validate_node_defaults_category() {
        let transformer = Transformer::new();
        let node = transformer
            .validate_node(record(&[("id", "HGNC:11603".into())]))
            .unwrap();
        assert_eq!(node["category"], PropertyValue::from(vec![DEFAULT_NODE_CATEGORY]));

        let node = transformer
            .validate_node(record(&[
                ("biolink:id", "HGNC:11603".into()),
                ("biolink:category", vec!["biolink:Gene"].into()),
            ]))
            .unwrap();
        assert!(!node.contains_key("category"));
    }

    #[test]
    fn test_validate_node_errors() {
        let transformer = Transformer::new();
        assert!(transformer.validate_node(PropertyMap::new()).unwrap().is_empty());
        assert!(matches!(
            transformer.validate_node(record(&[("name", "TBX4".into())])),
            Err(TransformError::MissingProperty {
                entity: "node",
                property: "id"
            })
        ));
    }

    #[test]
    fn test_validate_edge() {
        let edge = record(&[
            ("subject", "HGNC:1".into()),
            ("predicate", "biolink:related_to".into()),
        ]);
        assert!(matches!(
            Transformer::validate_edge(edge),
            Err(TransformError::MissingProperty {
                entity: "edge",
                property: "object"
            })
        ));
    }

    #[test]
    fn test_add_records_merge() {
        let mut transformer = Transformer::new();
        assert!(transformer.is_empty());

        transformer
            .add_node_record(record(&[
                ("id", "HGNC:1".into()),
                ("category", vec!["biolink:Gene"].into()),
                ("provided_by", "source-a".into()),
            ]))
            .unwrap();
        let id = transformer
            .add_node_record(record(&[
                ("id", "HGNC:1".into()),
                ("category", vec!["biolink:NamedThing"].into()),
                ("provided_by", "source-b".into()),
            ]))
            .unwrap();
        assert_eq!(id.as_deref(), Some("HGNC:1"));

        let node = transformer.graph.get_node("HGNC:1").unwrap();
        assert_eq!(
            node.properties["category"],
            PropertyValue::from(vec!["biolink:Gene", "biolink:NamedThing"])
        );
        assert_eq!(
            node.properties["provided_by"],
            PropertyValue::from(vec!["source-a", "source-b"])
        );
        assert_eq!(transformer.add_node_record(PropertyMap::new()).unwrap(), None);

        let edge = record(&[
            ("subject", "HGNC:1".into()),
            ("predicate", "biolink:interacts_with".into()),
            ("object", "HGNC:2".into()),
            ("publications", vec!["PMID:1"].into()),
        ]);
        let key = transformer.add_edge_record(edge.clone()).unwrap();
        let mut again = edge;
        again.insert("publications".into(), vec!["PMID:2"].into());
        assert_eq!(transformer.add_edge_record(again).unwrap(), key);

        assert_eq!(key.key, "HGNC:1-biolink:interacts_with-HGNC:2");
        assert_eq!(transformer.graph.edge_count(), 1);
        assert_eq!(transformer.graph.node_count(), 2);
        assert_eq!(
            transformer.graph.get_edge(&key).unwrap().properties["publications"],
            PropertyValue::from(vec!["PMID:1", "PMID:2"])
        );
        assert!(!transformer.is_empty());
    }

    #[test]
    fn test_filters_through_transformer() {
        let mut transformer = Transformer::from_config(&KgxConfig {
            default_node_category: "biolink:Gene".to_string(),
            ..KgxConfig::default()
        });
        transformer
            .add_node_record(record(&[("id", "HGNC:1".into())]))
            .unwrap();
        transformer
            .add_node_record(record(&[
                ("id", "MONDO:1".into()),
                ("category", vec!["biolink:Disease"].into()),
            ]))
            .unwrap();

        assert!(matches!(
            transformer.set_node_filter("category", "biolink:Gene"),
            Err(TransformError::Filter(FilterError::ExpectedSet(_)))
        ));
        transformer.set_node_filter("category", ["biolink:Gene"]).unwrap();

        let summary = transformer.apply_filters();
        assert_eq!(summary.nodes_removed, 1);
        assert!(transformer.graph.has_node("HGNC:1"));
        transformer.report();
    }
}
