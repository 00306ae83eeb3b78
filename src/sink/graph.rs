use super::{Sink, SinkResult};
use crate::graph::{find_slot, EdgeKey, GraphStore, PropertyMap};
use crate::identifiers::generate_edge_key;
use crate::merge::prepare_data_dict;

/// Collects records into an in-memory graph, merging repeats
#[derive(Debug, Clone, Default)]
pub struct GraphSink {
    graph: GraphStore,
}

impl GraphSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_graph(graph: GraphStore) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn into_graph(self) -> GraphStore {
        self.graph
    }
}

impl Sink for GraphSink {
    fn add_node(&mut self, node_id: &str, attributes: &PropertyMap) -> SinkResult<()> {
        let merged = self
            .graph
            .get_node(node_id)
            .map(|existing| prepare_data_dict(&existing.properties, attributes, true));
        match merged {
            Some(properties) => {
                if let Some(node) = self.graph.get_node_mut(node_id) {
                    node.properties = properties;
                }
            }
            None => {
                self.graph.add_node(node_id, attributes.clone());
            }
        }
        Ok(())
    }

    fn add_edge(&mut self, subject_id: &str, object_id: &str, attributes: &PropertyMap) -> SinkResult<()> {
        let predicate = find_slot(attributes, "predicate")
            .and_then(|(_, value)| value.as_str())
            .unwrap_or_default();
        let key = EdgeKey::new(subject_id, object_id, generate_edge_key(subject_id, predicate, object_id));
        let merged = self
            .graph
            .get_edge(&key)
            .map(|existing| prepare_data_dict(&existing.properties, attributes, true));
        match merged {
            Some(properties) => {
                if let Some(edge) = self.graph.get_edge_mut(&key) {
                    edge.properties = properties;
                }
            }
            None => {
                self.graph
                    .add_edge(subject_id, object_id, Some(&key.key), attributes.clone());
            }
        }
        Ok(())
    }
}
