//! Record sources

use crate::filter::{edge_matches, FilterMap, FilterValue};
use crate::graph::GraphStore;
use crate::sink::{Sink, SinkResult};
use std::collections::HashSet;
use tracing::{debug, info};

/// Producer of a stream of nodes and edges
pub trait Source {
    /// Restrict what is loaded, e.g. by `predicate`, `subject_category`,
    /// `object_category` or `provided_by`
    fn set_filter(&mut self, key: &str, value: FilterValue);

    /// Number of nodes, when known up front
    fn node_count(&self) -> Option<usize> {
        None
    }

    /// Number of edges, when known up front
    fn edge_count(&self) -> Option<usize> {
        None
    }

    fn report(&self) {
        let show = |count: Option<usize>| count.map_or_else(|| "uncounted".to_string(), |c| c.to_string());
        info!("|Nodes|={}", show(self.node_count()));
        info!("|Edges|={}", show(self.edge_count()));
    }

    /// Stream every record that passes the filter into `sink`, then finish it
    fn load(&mut self, sink: &mut dyn Sink) -> SinkResult<()>;
}

/// Streams an in-memory graph.
///
/// Each edge that passes the filter is preceded by its endpoint nodes, each
/// node sent once. Without a filter, nodes that touch no edge follow at the end.
#[derive(Debug)]
pub struct GraphSource<'a> {
    graph: &'a GraphStore,
    filter: FilterMap,
}

impl<'a> GraphSource<'a> {
    pub fn new(graph: &'a GraphStore) -> Self {
        Self {
            graph,
            filter: FilterMap::new(),
        }
    }

    pub fn filter(&self) -> &FilterMap {
        &self.filter
    }
}

impl Source for GraphSource<'_> {
    fn set_filter(&mut self, key: &str, value: FilterValue) {
        self.filter.insert(key.to_string(), value);
    }

    fn node_count(&self) -> Option<usize> {
        Some(self.graph.node_count())
    }

    fn edge_count(&self) -> Option<usize> {
        Some(self.graph.edge_count())
    }

    fn load(&mut self, sink: &mut dyn Sink) -> SinkResult<()> {
        let graph = self.graph;
        let mut emitted: HashSet<&str> = HashSet::new();
        let mut edges = 0;

        for (_, edge) in graph.edges() {
            if !edge_matches(graph, edge, &self.filter) {
                continue;
            }
            for endpoint in [edge.subject.as_str(), edge.object.as_str()] {
                if emitted.insert(endpoint) {
                    if let Some(node) = graph.get_node(endpoint) {
                        sink.add_node(endpoint, &node.properties)?;
                    }
                }
            }
            sink.add_edge(&edge.subject, &edge.object, &edge.properties)?;
            edges += 1;
        }

        if self.filter.is_empty() {
            for node in graph.nodes() {
                if emitted.insert(node.id.as_str()) {
                    sink.add_node(&node.id, &node.properties)?;
                }
            }
        }

        debug!("Loaded {} nodes and {} edges", emitted.len(), edges);
        sink.finish()
    }
}
