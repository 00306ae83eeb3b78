//! CURIE / IRI handling
//!
//! Contraction and expansion against prefix maps, with fallback to the
//! built-in `monarch_context` and `obo_context`. A miss is not an error:
//! the input string comes back unchanged.
//!
//! # Example
//!
//! ```rust
//! use kgx::curie::{contract, expand};
//!
//! let curie = contract("http://purl.obolibrary.org/obo/GO_0008150", None, true);
//! assert_eq!(curie, "GO:0008150");
//! assert_eq!(expand(&curie, None, true), "http://purl.obolibrary.org/obo/GO_0008150");
//! ```

mod context;
mod namespace;

pub use context::{default_prefix_maps, get_jsonld_context, DEFAULT_CONTEXTS};
pub use namespace::{CurieError, CurieResult, Namespace, PrefixMap};

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::debug;

static CURIE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^ <()>:]*:[^/ :]+$").unwrap());

/// Check whether a string looks like a CURIE (`prefix:local_id`)
pub fn is_curie(s: &str) -> bool {
    CURIE_RE.is_match(s)
}

/// Check whether a string looks like an IRI (starts with `http` or `https`)
pub fn is_iri(s: &str) -> bool {
    s.starts_with("http")
}

/// Shortest contraction over a list of maps; ties keep map order, then prefix order
fn contract_with(uri: &str, maps: &[PrefixMap]) -> Option<String> {
    maps.iter()
        .flat_map(|map| map.contractions(uri))
        .min_by_key(|curie| curie.len())
}

fn expand_with(curie: &str, maps: &[PrefixMap]) -> Option<String> {
    maps.iter().find_map(|map| map.expand(curie))
}

/// Contract a URI to a CURIE.
///
/// Uses `prefix_maps` when given; on a miss, and if `fallback` is set, retries
/// against the default maps. Without `prefix_maps` the defaults are used directly.
/// Returns the URI unchanged when no mapping applies.
pub fn contract(uri: &str, prefix_maps: Option<&[PrefixMap]>, fallback: bool) -> String {
    let found = match prefix_maps {
        Some(maps) if !maps.is_empty() => contract_with(uri, maps).or_else(|| {
            if fallback {
                contract_with(uri, default_prefix_maps())
            } else {
                None
            }
        }),
        _ => contract_with(uri, default_prefix_maps()),
    };
    found.unwrap_or_else(|| {
        debug!("No prefix mapping contracts {}", uri);
        uri.to_string()
    })
}

/// Expand a CURIE to a URI.
///
/// Mirror of [`contract`]. Strings that already are IRIs, and CURIEs whose
/// prefix is unknown everywhere, come back unchanged.
pub fn expand(curie: &str, prefix_maps: Option<&[PrefixMap]>, fallback: bool) -> String {
    if is_iri(curie) {
        return curie.to_string();
    }
    let found = match prefix_maps {
        Some(maps) if !maps.is_empty() => expand_with(curie, maps).or_else(|| {
            if fallback {
                expand_with(curie, default_prefix_maps())
            } else {
                None
            }
        }),
        _ => expand_with(curie, default_prefix_maps()),
    };
    found.unwrap_or_else(|| {
        debug!("No prefix mapping expands {}", curie);
        curie.to_string()
    })
}

/// Caller-owned prefix maps with contraction/expansion against them
#[derive(Debug, Clone)]
pub struct PrefixManager {
    maps: Vec<PrefixMap>,
    fallback: bool,
}

impl PrefixManager {
    /// Manager with no custom maps; every lookup goes to the defaults
    pub fn new() -> Self {
        Self {
            maps: Vec::new(),
            fallback: true,
        }
    }

    /// Manager over caller-supplied maps
    pub fn with_maps(maps: Vec<PrefixMap>, fallback: bool) -> Self {
        Self { maps, fallback }
    }

    /// Build a manager from JSON-LD context files, in order
    pub fn from_context_files<P: AsRef<Path>>(paths: &[P], fallback: bool) -> CurieResult<Self> {
        let maps = paths
            .iter()
            .map(PrefixMap::from_jsonld_file)
            .collect::<CurieResult<Vec<_>>>()?;
        Ok(Self::with_maps(maps, fallback))
    }

    /// Add a prefix to the first custom map, creating it if needed
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        if self.maps.is_empty() {
            self.maps.push(PrefixMap::new());
        }
        self.maps[0].add_prefix(prefix, iri);
    }

    /// The custom maps, without the defaults
    pub fn maps(&self) -> &[PrefixMap] {
        &self.maps
    }

    pub fn contract(&self, uri: &str) -> String {
        contract(uri, Some(self.maps.as_slice()), self.fallback)
    }

    pub fn expand(&self, curie: &str) -> String {
        expand(curie, Some(self.maps.as_slice()), self.fallback)
    }
}

impl Default for PrefixManager {
    fn default() -> Self {
        Self::new()
    }
}
