//! Identifier synthesis for edges

use crate::graph::{find_slot, GraphStore};
use tracing::debug;
use uuid::Uuid;

/// Generate an edge key from subject, edge label and object
pub fn generate_edge_key(s: &str, edge_label: &str, o: &str) -> String {
    format!("{}-{}-{}", s, edge_label, o)
}

/// Generate a random `urn:uuid:` identifier
pub fn generate_uuid() -> String {
    format!("urn:uuid:{}", Uuid::new_v4())
}

/// Assign a fresh identifier to every edge lacking an `id` (or `biolink:id`).
///
/// Returns the number of edges that received one.
pub fn generate_edge_identifiers(graph: &mut GraphStore) -> usize {
    let mut assigned = 0;
    for edge in graph.edges_mut() {
        let has_id = find_slot(&edge.properties, "id")
            .map(|(_, value)| !value.string_values().is_empty())
            .unwrap_or(false);
        if !has_id {
            edge.set_property("id", generate_uuid());
            assigned += 1;
        }
    }
    debug!("Assigned identifiers to {} edges", assigned);
    assigned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeKey, PropertyMap};

    #[test]
    fn test_generate_edge_key() {
        assert_eq!(
            generate_edge_key("HGNC:11603", "biolink:related_to", "MONDO:0005002"),
            "HGNC:11603-biolink:related_to-MONDO:0005002"
        );
    }

    #[test]
    fn test_generate_uuid() {
        let a = generate_uuid();
        let b = generate_uuid();
        assert!(a.starts_with("urn:uuid:"));
        assert_eq!(a.len(), "urn:uuid:".len() + 36);
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_edge_identifiers() {
        let mut graph = GraphStore::new();
        let mut with_id = PropertyMap::new();
        with_id.insert("biolink:id".to_string(), "E:1".into());
        graph.add_edge("A:1", "B:1", Some("k1"), with_id);
        graph.add_edge("A:1", "C:1", Some("k2"), PropertyMap::new());

        assert_eq!(generate_edge_identifiers(&mut graph), 1);

        let kept = graph.get_edge(&EdgeKey::new("A:1", "B:1", "k1")).unwrap();
        assert!(!kept.properties.contains_key("id"));
        let filled = graph.get_edge(&EdgeKey::new("A:1", "C:1", "k2")).unwrap();
        assert!(filled.properties["id"].as_str().unwrap().starts_with("urn:uuid:"));

        // Second pass is a no-op
        assert_eq!(generate_edge_identifiers(&mut graph), 0);
    }
}
