//! Prefix maps for compact IRI notation
//!
//! A prefix map is an ordered table of prefix -> namespace IRI. Order is
//! significant: it breaks ties when several prefixes contract the same IRI.

use indexmap::IndexMap;
use std::path::PathBuf;
use thiserror::Error;

/// Prefix and context errors
#[derive(Error, Debug)]
pub enum CurieError {
    /// Unknown built-in context
    #[error("Unknown JSON-LD context: {0}")]
    UnknownContext(String),

    /// Document is not a usable JSON-LD context
    #[error("Invalid JSON-LD context: {0}")]
    InvalidContext(String),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Context file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CurieResult<T> = Result<T, CurieError>;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Ordered prefix → IRI table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMap {
    prefixes: IndexMap<String, String>,
}

impl PrefixMap {
    /// Create an empty prefix map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prefix, replacing any previous mapping for it
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Expand `prefix:local` against this map
    pub fn expand(&self, curie: &str) -> Option<String> {
        let (prefix, local) = curie.split_once(':')?;
        self.get_iri(prefix).map(|iri| format!("{}{}", iri, local))
    }

    /// Every CURIE this map can contract `iri` to, in prefix order
    pub fn contractions(&self, iri: &str) -> Vec<String> {
        self.prefixes
            .iter()
            .filter(|(_, namespace_iri)| !namespace_iri.is_empty())
            .filter_map(|(prefix, namespace_iri)| {
                iri.strip_prefix(namespace_iri.as_str())
                    .filter(|local| !local.is_empty())
                    .map(|local| format!("{}:{}", prefix, local))
            })
            .collect()
    }

    /// Get all registered prefixes
    pub fn namespaces(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }

    /// Iterate over (prefix, IRI) pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, i)| (p.as_str(), i.as_str()))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl<P: Into<String>, I: Into<String>> FromIterator<(P, I)> for PrefixMap {
    fn from_iter<T: IntoIterator<Item = (P, I)>>(iter: T) -> Self {
        let mut map = PrefixMap::new();
        for (prefix, iri) in iter {
            map.add_prefix(prefix, iri);
        }
        map
    }
}
