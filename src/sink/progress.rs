use super::{Sink, SinkResult};
use crate::config::KgxConfig;
use crate::graph::PropertyMap;
use tracing::info;

/// Records between progress log lines
pub const DEFAULT_LOG_THRESHOLD: usize = 1000;

/// Wraps another sink and logs how many records went through it
#[derive(Debug)]
pub struct ProgressSink<S> {
    sink: S,
    log_threshold: usize,
    node_count: usize,
    edge_count: usize,
}

impl<S: Sink> ProgressSink<S> {
    pub fn new(sink: S) -> Self {
        Self::with_threshold(sink, DEFAULT_LOG_THRESHOLD)
    }

    /// Threshold taken from `progress_threshold`
    pub fn from_config(sink: S, config: &KgxConfig) -> Self {
        Self::with_threshold(sink, config.progress_threshold)
    }

    /// A threshold of zero disables logging
    pub fn with_threshold(sink: S, log_threshold: usize) -> Self {
        Self {
            sink,
            log_threshold,
            node_count: 0,
            edge_count: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    fn at_threshold(&self, count: usize) -> bool {
        self.log_threshold > 0 && count % self.log_threshold == 0
    }
}

impl<S: Sink> Sink for ProgressSink<S> {
    fn add_node(&mut self, node_id: &str, attributes: &PropertyMap) -> SinkResult<()> {
        self.sink.add_node(node_id, attributes)?;
        self.node_count += 1;
        if self.at_threshold(self.node_count) {
            info!("NODEs added: {}", self.node_count);
        }
        Ok(())
    }

    fn add_edge(&mut self, subject_id: &str, object_id: &str, attributes: &PropertyMap) -> SinkResult<()> {
        self.sink.add_edge(subject_id, object_id, attributes)?;
        self.edge_count += 1;
        if self.at_threshold(self.edge_count) {
            info!("EDGEs added: {}", self.edge_count);
        }
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        info!("Finished: {} nodes, {} edges", self.node_count, self.edge_count);
        self.sink.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{DebugSink, SinkError};

    #[test]
    fn test_counts_forwarded_records() {
        let mut sink = ProgressSink::with_threshold(DebugSink::default(), 2);
        let attrs = PropertyMap::new();
        for i in 0..5 {
            sink.add_node(&format!("N:{}", i), &attrs).unwrap();
        }
        sink.add_edge("N:0", "N:1", &attrs).unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.node_count(), 5);
        assert_eq!(sink.edge_count(), 1);
    }

    #[test]
    fn test_threshold_from_config() {
        let config = KgxConfig::from_yaml_str("progress_threshold: 3\n").unwrap();
        let sink = ProgressSink::from_config(DebugSink::default(), &config);
        assert_eq!(sink.log_threshold, 3);
        assert!(sink.at_threshold(6));
        assert!(!sink.at_threshold(4));

        let sink = ProgressSink::from_config(DebugSink::default(), &KgxConfig::default());
        assert_eq!(sink.log_threshold, DEFAULT_LOG_THRESHOLD);
    }

    #[test]
    fn test_inner_failure_not_counted() {
        let mut sink = ProgressSink::new(DebugSink::new(Some(1)));
        assert!(matches!(
            sink.add_node("N:1", &PropertyMap::new()),
            Err(SinkError::LimitExceeded)
        ));
        assert_eq!(sink.node_count(), 0);
        assert_eq!(sink.into_inner().limit, Some(0));
    }
}
