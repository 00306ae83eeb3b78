//! Schema service
//!
//! [`SchemaToolkit`] is the seam: the rest of the crate only asks it for
//! elements and their inheritance. [`ModelToolkit`] implements it over a YAML
//! model; a compact Biolink core model ships embedded. The `get_biolink_*`
//! helpers layer CURIE-aware lookup on top of any toolkit.

mod biolink;
mod toolkit;

pub use biolink::{
    format_element, get_biolink_ancestors, get_biolink_descendants, get_biolink_edge_properties,
    get_biolink_element, get_biolink_mapping, get_biolink_node_properties,
    get_biolink_property_types, BIOLINK_PREFIX, DEFAULT_PROPERTY_TYPE,
};
pub use toolkit::{Element, ElementKind, ModelToolkit, SchemaError, SchemaResult, SchemaToolkit};
