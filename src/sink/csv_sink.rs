use super::{Sink, SinkError, SinkResult};
use crate::graph::PropertyMap;
use csv::Writer;
use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

const NODE_HEADER: [&str; 1] = [":ID"];
const EDGE_HEADER: [&str; 3] = [":ID", ":START", ":END"];

/// Writes node and edge identifiers as bulk-import CSV.
///
/// Nodes go to `<prefix>.node.<ext>` and edges to `<prefix>.edge.<ext>`.
/// Edges get sequential ids starting at 0. Attributes are not written.
pub struct CsvSink {
    node_writer: Writer<File>,
    edge_writer: Writer<File>,
    node_path: PathBuf,
    edge_path: PathBuf,
    edge_count: usize,
}

fn output_path(prefix: &Path, name: &str, extension: &str) -> PathBuf {
    let mut path = OsString::from(prefix.as_os_str());
    path.push(format!(".{}.{}", name, extension));
    PathBuf::from(path)
}

fn open_writer(path: &Path, header: &[&str]) -> SinkResult<Writer<File>> {
    let file = File::create(path).map_err(|source| SinkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(header)?;
    Ok(writer)
}

impl CsvSink {
    /// Create both output files and write their headers
    pub fn new(prefix: impl AsRef<Path>, extension: &str) -> SinkResult<Self> {
        let prefix = prefix.as_ref();
        let node_path = output_path(prefix, "node", extension);
        let edge_path = output_path(prefix, "edge", extension);
        let node_writer = open_writer(&node_path, &NODE_HEADER)?;
        let edge_writer = open_writer(&edge_path, &EDGE_HEADER)?;
        debug!("Writing {} and {}", node_path.display(), edge_path.display());
        Ok(Self {
            node_writer,
            edge_writer,
            node_path,
            edge_path,
            edge_count: 0,
        })
    }

    pub fn node_path(&self) -> &Path {
        &self.node_path
    }

    pub fn edge_path(&self) -> &Path {
        &self.edge_path
    }
}

impl Sink for CsvSink {
    fn add_node(&mut self, node_id: &str, _attributes: &PropertyMap) -> SinkResult<()> {
        self.node_writer.write_record([node_id])?;
        Ok(())
    }

    fn add_edge(&mut self, subject_id: &str, object_id: &str, _attributes: &PropertyMap) -> SinkResult<()> {
        let id = self.edge_count.to_string();
        self.edge_writer.write_record([id.as_str(), subject_id, object_id])?;
        self.edge_count += 1;
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        self.node_writer.flush().map_err(|source| SinkError::Io {
            path: self.node_path.clone(),
            source,
        })?;
        self.edge_writer.flush().map_err(|source| SinkError::Io {
            path: self.edge_path.clone(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_nodes_and_edges() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path().join("graph"), "csv").unwrap();
        let attrs = PropertyMap::new();
        sink.add_node("HGNC:1", &attrs).unwrap();
        sink.add_node("HGNC:2", &attrs).unwrap();
        sink.add_edge("HGNC:1", "HGNC:2", &attrs).unwrap();
        sink.add_edge("HGNC:2", "HGNC:1", &attrs).unwrap();
        sink.finish().unwrap();

        assert_eq!(sink.node_path(), dir.path().join("graph.node.csv"));
        let nodes = std::fs::read_to_string(sink.node_path()).unwrap();
        assert_eq!(nodes, ":ID\nHGNC:1\nHGNC:2\n");
        let edges = std::fs::read_to_string(sink.edge_path()).unwrap();
        assert_eq!(edges, ":ID,:START,:END\n0,HGNC:1,HGNC:2\n1,HGNC:2,HGNC:1\n");
    }

    #[test]
    fn test_custom_extension() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::new(dir.path().join("out"), "tsv").unwrap();
        assert!(sink.edge_path().ends_with("out.edge.tsv"));
    }

    #[test]
    fn test_unwritable_prefix() {
        assert!(matches!(
            CsvSink::new("/nonexistent/dir/graph", "csv"),
            Err(SinkError::Io { .. })
        ));
    }
}
