//! Graph filtering by node and edge property values
//!
//! A filter maps a property name to the values it may take. A node or edge
//! passes when, for every filter, its value(s) share at least one value with
//! the allowed set. Filters with an empty allowed set are ignored.

use crate::graph::{find_slot, Edge, EdgeKey, GraphStore, Node};
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;
use tracing::debug;

/// Node filter key mirrored into the endpoint-category edge filters
pub const CATEGORY: &str = "category";
pub const SUBJECT_CATEGORY: &str = "subject_category";
pub const OBJECT_CATEGORY: &str = "object_category";

/// Filter errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Filter requires a set of values
    #[error("'{0}' filter should have a set of values")]
    ExpectedSet(String),
}

pub type FilterResult<T> = Result<T, FilterError>;

/// Allowed value(s) for one filter key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Single(String),
    Set(IndexSet<String>),
}

impl FilterValue {
    pub fn is_set(&self) -> bool {
        matches!(self, FilterValue::Set(_))
    }

    /// Allowed values as a set
    pub fn values(&self) -> IndexSet<String> {
        match self {
            FilterValue::Single(value) => IndexSet::from([value.clone()]),
            FilterValue::Set(values) => values.clone(),
        }
    }

    pub fn allows(&self, value: &str) -> bool {
        match self {
            FilterValue::Single(single) => single == value,
            FilterValue::Set(values) => values.contains(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Single(_) => false,
            FilterValue::Set(values) => values.is_empty(),
        }
    }

    /// Add the values of `other`; a single value becomes a set when extended
    pub fn extend(&mut self, other: &FilterValue) {
        let mut values = self.values();
        values.extend(other.values());
        *self = FilterValue::Set(values);
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Single(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Single(value)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for FilterValue {
    fn from(values: [S; N]) -> Self {
        FilterValue::Set(values.into_iter().map(Into::into).collect())
    }
}

impl From<IndexSet<String>> for FilterValue {
    fn from(values: IndexSet<String>) -> Self {
        FilterValue::Set(values)
    }
}

/// Filter key -> allowed values
pub type FilterMap = IndexMap<String, FilterValue>;

fn insert_or_extend(filters: &mut FilterMap, key: &str, value: &FilterValue) {
    match filters.get_mut(key) {
        Some(existing) => existing.extend(value),
        None => {
            filters.insert(key.to_string(), value.clone());
        }
    }
}

/// Node and edge filters kept consistent with each other.
///
/// A `category` node filter also restricts edge endpoints, and endpoint
/// category edge filters also restrict nodes, so the filtered subgraph
/// never has dangling edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub node_filters: FilterMap,
    pub edge_filters: FilterMap,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_node_filter(&mut self, key: &str, value: impl Into<FilterValue>) -> FilterResult<()> {
        let value = value.into();
        if key == CATEGORY {
            if !value.is_set() {
                return Err(FilterError::ExpectedSet(key.to_string()));
            }
            insert_or_extend(&mut self.edge_filters, SUBJECT_CATEGORY, &value);
            insert_or_extend(&mut self.edge_filters, OBJECT_CATEGORY, &value);
        }
        insert_or_extend(&mut self.node_filters, key, &value);
        Ok(())
    }

    pub fn set_edge_filter(&mut self, key: &str, value: impl Into<FilterValue>) -> FilterResult<()> {
        let value = value.into();
        if key == SUBJECT_CATEGORY || key == OBJECT_CATEGORY {
            if !value.is_set() {
                return Err(FilterError::ExpectedSet(key.to_string()));
            }
            insert_or_extend(&mut self.node_filters, CATEGORY, &value);
        }
        insert_or_extend(&mut self.edge_filters, key, &value);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.node_filters.is_empty() && self.edge_filters.is_empty()
    }
}

fn intersects(filter: &FilterValue, values: &[String]) -> bool {
    values.iter().any(|value| filter.allows(value))
}

/// Whether a node passes every node filter
pub fn node_matches(node: &Node, filters: &FilterMap) -> bool {
    filters
        .iter()
        .filter(|(_, allowed)| !allowed.is_empty())
        .all(|(key, allowed)| {
            let values = find_slot(&node.properties, key)
                .map(|(_, value)| value.string_values())
                .unwrap_or_default();
            intersects(allowed, &values)
        })
}

/// Whether an edge passes every edge filter.
///
/// Endpoint category filters are checked against the endpoint nodes in `graph`.
pub fn edge_matches(graph: &GraphStore, edge: &Edge, filters: &FilterMap) -> bool {
    filters
        .iter()
        .filter(|(_, allowed)| !allowed.is_empty())
        .all(|(key, allowed)| {
            let values = match key.as_str() {
                SUBJECT_CATEGORY => graph
                    .get_node(&edge.subject)
                    .map(Node::categories)
                    .unwrap_or_default(),
                OBJECT_CATEGORY => graph
                    .get_node(&edge.object)
                    .map(Node::categories)
                    .unwrap_or_default(),
                _ => find_slot(&edge.properties, key)
                    .map(|(_, value)| value.string_values())
                    .unwrap_or_default(),
            };
            intersects(allowed, &values)
        })
}

/// Remove nodes failing any node filter, with their edges. Returns how many were removed.
pub fn apply_node_filters(graph: &mut GraphStore, node_filters: &FilterMap) -> usize {
    if node_filters.is_empty() {
        return 0;
    }
    let failing: Vec<String> = graph
        .nodes()
        .filter(|node| !node_matches(node, node_filters))
        .map(|node| node.id.clone())
        .collect();

    let removed = failing
        .iter()
        .filter(|id| graph.remove_node(id).is_ok())
        .count();
    debug!("Node filters removed {} nodes", removed);
    removed
}

/// Remove edges failing any edge filter. Returns how many were removed.
pub fn apply_edge_filters(graph: &mut GraphStore, edge_filters: &FilterMap) -> usize {
    if edge_filters.is_empty() {
        return 0;
    }
    let view: &GraphStore = graph;
    let failing: Vec<EdgeKey> = view
        .edges()
        .filter(|(_, edge)| !edge_matches(view, edge, edge_filters))
        .map(|(key, _)| key.clone())
        .collect();

    let removed = failing
        .iter()
        .filter(|key| graph.remove_edge(key).is_ok())
        .count();
    debug!("Edge filters removed {} edges", removed);
    removed
}

/// Counts from a filtering pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub nodes_removed: usize,
    pub edges_removed: usize,
}

/// Apply node filters, then edge filters
pub fn apply_filters(
    graph: &mut GraphStore,
    node_filters: &FilterMap,
    edge_filters: &FilterMap,
) -> FilterSummary {
    let nodes_removed = apply_node_filters(graph, node_filters);
    let edges_removed = apply_edge_filters(graph, edge_filters);
    FilterSummary {
        nodes_removed,
        edges_removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{PropertyMap, PropertyValue};

    fn props(pairs: &[(&str, PropertyValue)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn sample_graph() -> GraphStore {
        let mut graph = GraphStore::new();
        graph.add_node("HGNC:1", props(&[("biolink:category", vec!["biolink:Gene"].into())]));
        graph.add_node("MONDO:1", props(&[("biolink:category", vec!["biolink:Disease"].into())]));
        graph.add_node("HGNC:2", props(&[("category", "biolink:Gene".into())]));
        graph.add_edge(
            "HGNC:1",
            "MONDO:1",
            None,
            props(&[("predicate", "biolink:related_to".into())]),
        );
        graph.add_edge(
            "HGNC:1",
            "HGNC:2",
            None,
            props(&[("predicate", "biolink:interacts_with".into())]),
        );
        graph
    }

    #[test]
    fn test_node_filter_removes_non_matching() {
        let mut graph = sample_graph();
        let mut filters = FilterMap::new();
        filters.insert("biolink:category".into(), FilterValue::from(["biolink:Gene"]));

        assert_eq!(apply_node_filters(&mut graph, &filters), 1);
        assert!(!graph.has_node("MONDO:1"));
        assert!(graph.has_node("HGNC:2"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_missing_property_fails_filter() {
        let mut graph = sample_graph();
        graph.add_node("X:1", PropertyMap::new());
        let mut filters = FilterMap::new();
        filters.insert("category".into(), FilterValue::from(["biolink:Gene", "biolink:Disease"]));

        assert_eq!(apply_node_filters(&mut graph, &filters), 1);
        assert!(!graph.has_node("X:1"));
    }

    #[test]
    fn test_empty_filter_ignored() {
        let mut graph = sample_graph();
        let mut filters = FilterMap::new();
        filters.insert("category".into(), FilterValue::Set(IndexSet::new()));
        assert_eq!(apply_node_filters(&mut graph, &filters), 0);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_edge_filters() {
        let mut graph = sample_graph();
        let mut filters = FilterMap::new();
        filters.insert("biolink:predicate".into(), "biolink:interacts_with".into());
        assert_eq!(apply_edge_filters(&mut graph, &filters), 1);
        assert_eq!(graph.edge_count(), 1);

        let mut graph = sample_graph();
        let mut filters = FilterMap::new();
        filters.insert(OBJECT_CATEGORY.into(), FilterValue::from(["biolink:Disease"]));
        assert_eq!(apply_edge_filters(&mut graph, &filters), 1);
        let (key, _) = graph.edges().next().unwrap();
        assert_eq!(key.object, "MONDO:1");
    }

    #[test]
    fn test_apply_filters() {
        let mut graph = sample_graph();
        let mut filter_set = FilterSet::new();
        filter_set.set_node_filter(CATEGORY, ["biolink:Gene"]).unwrap();
        filter_set
            .set_edge_filter("predicate", "biolink:interacts_with")
            .unwrap();

        let summary = apply_filters(&mut graph, &filter_set.node_filters, &filter_set.edge_filters);
        assert_eq!(
            summary,
            FilterSummary {
                nodes_removed: 1,
                edges_removed: 0,
            }
        );
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_filter_set_mirroring() {
        let mut filters = FilterSet::new();
        filters.set_node_filter(CATEGORY, ["biolink:Gene"]).unwrap();
        assert_eq!(filters.edge_filters[SUBJECT_CATEGORY], FilterValue::from(["biolink:Gene"]));
        assert_eq!(filters.edge_filters[OBJECT_CATEGORY], FilterValue::from(["biolink:Gene"]));

        filters
            .set_edge_filter(SUBJECT_CATEGORY, ["biolink:Disease"])
            .unwrap();
        assert_eq!(
            filters.node_filters[CATEGORY],
            FilterValue::from(["biolink:Gene", "biolink:Disease"])
        );
        assert_eq!(
            filters.edge_filters[SUBJECT_CATEGORY],
            FilterValue::from(["biolink:Gene", "biolink:Disease"])
        );
        assert_eq!(filters.edge_filters[OBJECT_CATEGORY], FilterValue::from(["biolink:Gene"]));
    }

    #[test]
    fn test_category_requires_set() {
        let mut filters = FilterSet::new();
        assert_eq!(
            filters.set_node_filter(CATEGORY, "biolink:Gene"),
            Err(FilterError::ExpectedSet(CATEGORY.to_string()))
        );
        assert_eq!(
            filters.set_edge_filter(OBJECT_CATEGORY, "biolink:Gene"),
            Err(FilterError::ExpectedSet(OBJECT_CATEGORY.to_string()))
        );
        assert!(filters.is_empty());

        filters.set_node_filter("provided_by", "source-a").unwrap();
        filters.set_node_filter("provided_by", "source-b").unwrap();
        assert_eq!(filters.node_filters["provided_by"], FilterValue::from(["source-a", "source-b"]));
    }
}
