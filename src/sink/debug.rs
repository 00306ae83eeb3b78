use super::{Sink, SinkError, SinkResult};
use crate::graph::PropertyMap;
use tracing::debug;

/// Sink that discards records, failing once a record limit is used up.
///
/// The limit counts down on every record; the record that brings it to
/// zero fails with [`SinkError::LimitExceeded`].
#[derive(Debug, Clone, Default)]
pub struct DebugSink {
    pub limit: Option<usize>,
}

impl DebugSink {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    fn count(&mut self) -> SinkResult<()> {
        if let Some(remaining) = self.limit.as_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                return Err(SinkError::LimitExceeded);
            }
        }
        Ok(())
    }
}

impl Sink for DebugSink {
    fn add_node(&mut self, node_id: &str, attributes: &PropertyMap) -> SinkResult<()> {
        debug!("NODE: {} {:?}", node_id, attributes);
        self.count()
    }

    fn add_edge(&mut self, subject_id: &str, object_id: &str, attributes: &PropertyMap) -> SinkResult<()> {
        debug!("EDGE: {} -> {} {:?}", subject_id, object_id, attributes);
        self.count()
    }
}
