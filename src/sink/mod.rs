//! Record sinks
//!
//! A sink receives nodes and edges one at a time from a source. Sinks can be
//! stacked: [`ProgressSink`] wraps any other sink.

mod csv_sink;
mod debug;
mod graph;
mod progress;

pub use self::csv_sink::CsvSink;
pub use self::debug::DebugSink;
pub use self::graph::GraphSink;
pub use self::progress::{ProgressSink, DEFAULT_LOG_THRESHOLD};

use crate::graph::PropertyMap;
use std::path::PathBuf;
use thiserror::Error;

/// Sink errors
#[derive(Error, Debug)]
pub enum SinkError {
    /// A record limit was reached
    #[error("limit exceeded")]
    LimitExceeded,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type SinkResult<T> = Result<T, SinkError>;

/// Destination for a stream of nodes and edges
pub trait Sink {
    fn add_node(&mut self, node_id: &str, attributes: &PropertyMap) -> SinkResult<()>;

    fn add_edge(&mut self, subject_id: &str, object_id: &str, attributes: &PropertyMap) -> SinkResult<()>;

    /// Flush and release resources; called once after the last record
    fn finish(&mut self) -> SinkResult<()> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn add_node(&mut self, node_id: &str, attributes: &PropertyMap) -> SinkResult<()> {
        (**self).add_node(node_id, attributes)
    }

    fn add_edge(&mut self, subject_id: &str, object_id: &str, attributes: &PropertyMap) -> SinkResult<()> {
        (**self).add_edge(subject_id, object_id, attributes)
    }

    fn finish(&mut self) -> SinkResult<()> {
        (**self).finish()
    }
}
