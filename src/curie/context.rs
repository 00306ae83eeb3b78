//! JSON-LD context loading
//!
//! Only the `@context` object is read. Values may be plain IRIs or
//! `{"@id": IRI}` term definitions; keywords (`@vocab`, `@base`, ...) are skipped.

use super::namespace::{CurieError, CurieResult, PrefixMap};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

const MONARCH_CONTEXT: &str = include_str!("contexts/monarch_context.jsonld");
const OBO_CONTEXT: &str = include_str!("contexts/obo_context.jsonld");

/// Names of the built-in contexts, in fallback order
pub const DEFAULT_CONTEXTS: [&str; 2] = ["monarch_context", "obo_context"];

static DEFAULT_PREFIX_MAPS: Lazy<Vec<PrefixMap>> = Lazy::new(|| {
    DEFAULT_CONTEXTS
        .iter()
        .filter_map(|name| match get_jsonld_context(name) {
            Ok(map) => Some(map),
            Err(e) => {
                warn!("Skipping built-in context {}: {}", name, e);
                None
            }
        })
        .collect()
});

impl PrefixMap {
    /// Parse the `@context` of a JSON-LD document
    pub fn from_jsonld_str(document: &str) -> CurieResult<Self> {
        let value: Value = serde_json::from_str(document)?;
        let context = value
            .get("@context")
            .and_then(Value::as_object)
            .ok_or_else(|| CurieError::InvalidContext("missing @context object".to_string()))?;

        let mut map = PrefixMap::new();
        for (term, definition) in context {
            if term.starts_with('@') {
                continue;
            }
            let iri = match definition {
                Value::String(iri) => Some(iri.as_str()),
                Value::Object(obj) => obj.get("@id").and_then(Value::as_str),
                _ => None,
            };
            match iri {
                Some(iri) => map.add_prefix(term.as_str(), iri),
                None => debug!("Ignoring context term without an IRI: {}", term),
            }
        }
        Ok(map)
    }

    /// Read and parse a JSON-LD context file
    pub fn from_jsonld_file(path: impl AsRef<Path>) -> CurieResult<Self> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| CurieError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_jsonld_str(&document)
    }
}

/// Load one of the built-in JSON-LD contexts by name
pub fn get_jsonld_context(name: &str) -> CurieResult<PrefixMap> {
    match name {
        "monarch_context" => PrefixMap::from_jsonld_str(MONARCH_CONTEXT),
        "obo_context" => PrefixMap::from_jsonld_str(OBO_CONTEXT),
        other => Err(CurieError::UnknownContext(other.to_string())),
    }
}

/// The built-in contexts, parsed once
pub fn default_prefix_maps() -> &'static [PrefixMap] {
    &DEFAULT_PREFIX_MAPS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_contexts() {
        let monarch = get_jsonld_context("monarch_context").unwrap();
        assert_eq!(monarch.get_iri("biolink"), Some("https://w3id.org/biolink/vocab/"));
        assert!(monarch.get_iri("@vocab").is_none());

        let obo = get_jsonld_context("obo_context").unwrap();
        assert_eq!(
            obo.get_iri("oboInOwl"),
            Some("http://www.geneontology.org/formats/oboInOwl#")
        );

        assert_eq!(default_prefix_maps().len(), 2);
    }

    #[test]
    fn test_unknown_context() {
        assert!(matches!(
            get_jsonld_context("no_such_context"),
            Err(CurieError::UnknownContext(_))
        ));
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            PrefixMap::from_jsonld_str(r#"{"prefixes": {}}"#),
            Err(CurieError::InvalidContext(_))
        ));
        assert!(matches!(
            PrefixMap::from_jsonld_str("not json"),
            Err(CurieError::Json(_))
        ));
    }

    #[test]
    fn test_context_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"@context": {{"ex": "http://example.org/", "n": 3, "t": {{"@id": "http://t.org/"}}}}}}"#
        )
        .unwrap();

        let map = PrefixMap::from_jsonld_file(file.path()).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_iri("t"), Some("http://t.org/"));

        assert!(matches!(
            PrefixMap::from_jsonld_file("/nonexistent/context.jsonld"),
            Err(CurieError::Io { .. })
        ));
    }
}
