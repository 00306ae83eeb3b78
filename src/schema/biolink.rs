//! CURIE-aware lookups over a schema toolkit

use super::toolkit::{Element, ElementKind, SchemaToolkit};
use crate::case::{
    camelcase_to_sentencecase, sentencecase_to_camelcase, sentencecase_to_snakecase,
    snakecase_to_sentencecase,
};
use indexmap::IndexMap;
use tracing::debug;

pub const BIOLINK_PREFIX: &str = "biolink";

/// Range type assumed for slots that declare none
pub const DEFAULT_PROPERTY_TYPE: &str = "xsd:string";

/// Range type for slots whose range is a class
const CLASS_RANGE_TYPE: &str = "xsd:anyURI";

const NODE_PROPERTY_ROOT: &str = "node property";
const EDGE_PROPERTY_ROOT: &str = "association slot";

/// Format an element as a `biolink:` CURIE.
///
/// Classes become `biolink:CamelCase`; slots and types become `biolink:snake_case`.
pub fn format_element(element: &Element) -> String {
    let local = match element.kind {
        ElementKind::Class => sentencecase_to_camelcase(&element.name),
        ElementKind::Slot | ElementKind::Type => sentencecase_to_snakecase(&element.name),
    };
    format!("{}:{}", BIOLINK_PREFIX, local)
}

/// Look up an element, trying in order:
/// the name as given, the name without its `biolink:` prefix, and the
/// sentence-case form of a CamelCase or snake_case name.
pub fn get_biolink_element(toolkit: &dyn SchemaToolkit, name: &str) -> Option<Element> {
    if let Some(element) = toolkit.get_element(name) {
        return Some(element);
    }
    let local = name
        .strip_prefix(BIOLINK_PREFIX)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(name);
    if local != name {
        if let Some(element) = toolkit.get_element(local) {
            return Some(element);
        }
    }
    let sentence = if local.contains('_') {
        snakecase_to_sentencecase(local)
    } else {
        camelcase_to_sentencecase(local)
    };
    let found = toolkit.get_element(&sentence);
    if found.is_none() {
        debug!("No schema element for {}", name);
    }
    found
}

/// Map a category to a schema element: as given, then from snake_case
pub fn get_biolink_mapping(toolkit: &dyn SchemaToolkit, category: &str) -> Option<Element> {
    toolkit
        .get_element(category)
        .or_else(|| toolkit.get_element(&snakecase_to_sentencecase(category)))
}

fn format_names(toolkit: &dyn SchemaToolkit, names: Vec<String>) -> Vec<String> {
    names
        .iter()
        .filter_map(|name| toolkit.get_element(name))
        .map(|element| format_element(&element))
        .collect()
}

/// Ancestors of an element (itself included) as `biolink:` CURIEs
pub fn get_biolink_ancestors(toolkit: &dyn SchemaToolkit, name: &str) -> Vec<String> {
    match get_biolink_element(toolkit, name) {
        Some(element) => format_names(toolkit, toolkit.get_ancestors(&element.name)),
        None => Vec::new(),
    }
}

/// Descendants of an element (itself included) as `biolink:` CURIEs
pub fn get_biolink_descendants(toolkit: &dyn SchemaToolkit, name: &str) -> Vec<String> {
    match get_biolink_element(toolkit, name) {
        Some(element) => format_names(toolkit, toolkit.get_descendants(&element.name)),
        None => Vec::new(),
    }
}

/// Resolve a slot range to a datatype URI
fn range_type(toolkit: &dyn SchemaToolkit, range: Option<&str>) -> String {
    let Some(range) = range else {
        return DEFAULT_PROPERTY_TYPE.to_string();
    };
    match toolkit.get_element(range) {
        Some(element) if element.kind == ElementKind::Class => CLASS_RANGE_TYPE.to_string(),
        Some(element) if element.kind == ElementKind::Type => toolkit
            .get_ancestors(&element.name)
            .iter()
            .filter_map(|name| toolkit.get_element(name))
            .find_map(|ty| ty.uri)
            .unwrap_or_else(|| DEFAULT_PROPERTY_TYPE.to_string()),
        _ => DEFAULT_PROPERTY_TYPE.to_string(),
    }
}

/// Every slot CURIE mapped to the datatype of its range
pub fn get_biolink_property_types(toolkit: &dyn SchemaToolkit) -> IndexMap<String, String> {
    toolkit
        .slot_names()
        .into_iter()
        .filter_map(|slot| toolkit.get_element(&slot))
        .map(|element| {
            let range = toolkit.slot_range(&element.name);
            (format_element(&element), range_type(toolkit, range.as_deref()))
        })
        .collect()
}

fn properties_under(toolkit: &dyn SchemaToolkit, root: &str) -> Vec<String> {
    let descendants = toolkit.get_descendants(root);
    format_names(toolkit, descendants.into_iter().skip(1).collect())
}

/// Slots that describe nodes
pub fn get_biolink_node_properties(toolkit: &dyn SchemaToolkit) -> Vec<String> {
    properties_under(toolkit, NODE_PROPERTY_ROOT)
}

/// Slots that describe edges
pub fn get_biolink_edge_properties(toolkit: &dyn SchemaToolkit) -> Vec<String> {
    properties_under(toolkit, EDGE_PROPERTY_ROOT)
}
