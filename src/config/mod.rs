//! Toolkit configuration
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```yaml
//! cache_size: 10000
//! schema: models/biolink.yaml
//! prefix_contexts:
//!   - contexts/local.jsonld
//! default_node_category: biolink:NamedThing
//! progress_threshold: 1000
//! log_level: info
//! ```

use crate::cache::DEFAULT_CACHE_SIZE;
use crate::sink::DEFAULT_LOG_THRESHOLD;
use crate::transformer::DEFAULT_NODE_CATEGORY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KgxConfig {
    /// Capacity of the shared cache
    pub cache_size: usize,
    /// Schema model file; the embedded model when unset
    pub schema: Option<PathBuf>,
    /// JSON-LD contexts consulted before the built-in ones
    pub prefix_contexts: Vec<PathBuf>,
    /// Category given to nodes that arrive without one
    pub default_node_category: String,
    /// Records between progress log lines
    pub progress_threshold: usize,
    pub log_level: String,
}

impl Default for KgxConfig {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
            schema: None,
            prefix_contexts: Vec::new(),
            default_node_category: DEFAULT_NODE_CATEGORY.to_string(),
            progress_threshold: DEFAULT_LOG_THRESHOLD,
            log_level: "info".to_string(),
        }
    }
}

impl KgxConfig {
    pub fn from_yaml_str(document: &str) -> ConfigResult<Self> {
        if document.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(document)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KgxConfig::from_yaml_str("").unwrap();
        assert_eq!(config, KgxConfig::default());
        assert_eq!(config.cache_size, 10_000);
        assert_eq!(config.default_node_category, "biolink:NamedThing");
        assert_eq!(config.progress_threshold, 1000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_document() {
        let config = KgxConfig::from_yaml_str("cache_size: 50\nprefix_contexts: [a.jsonld]\n").unwrap();
        assert_eq!(config.cache_size, 50);
        assert_eq!(config.prefix_contexts, vec![PathBuf::from("a.jsonld")]);
        assert!(config.schema.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            KgxConfig::from_yaml_str("cache_size: lots"),
            Err(ConfigError::Yaml(_))
        ));
        assert!(matches!(
            KgxConfig::from_file("/nonexistent/kgx.yaml"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kgx.yaml");
        std::fs::write(&path, "log_level: debug\nprogress_threshold: 10\n").unwrap();
        let config = KgxConfig::from_file(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.progress_threshold, 10);
    }
}
