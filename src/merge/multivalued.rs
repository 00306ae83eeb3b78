//! Which properties hold more than one value

use crate::schema::{format_element, SchemaToolkit};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::warn;

use super::is_core_property;

/// Multivalued slots of the core Biolink model
const MULTIVALUED_SLOTS: &[&str] = &[
    "category",
    "synonym",
    "xref",
    "provided_by",
    "has_gene",
    "publications",
    "has_evidence",
    "qualifiers",
];

/// Single-valued slots of the core Biolink model
const SINGLE_VALUED_SLOTS: &[&str] = &[
    "id",
    "iri",
    "name",
    "description",
    "symbol",
    "subject",
    "predicate",
    "object",
    "relation",
    "negated",
];

static DEFAULT_TABLE: Lazy<MultivaluedTable> = Lazy::new(MultivaluedTable::builtin);

/// Property name -> multivalued flag.
///
/// Names are matched exactly, so a table usually carries both the bare
/// and the `biolink:` form of each slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultivaluedTable {
    entries: IndexMap<String, bool>,
}

impl MultivaluedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table of the core Biolink slots, bare and prefixed
    pub fn builtin() -> Self {
        let mut table = Self::new();
        let slots = MULTIVALUED_SLOTS
            .iter()
            .map(|s| (s, true))
            .chain(SINGLE_VALUED_SLOTS.iter().map(|s| (s, false)));
        for (slot, multivalued) in slots {
            table.insert(*slot, multivalued);
            table.insert(format!("biolink:{}", slot), multivalued);
        }
        table
    }

    /// Table derived from every slot a schema toolkit knows
    pub fn from_toolkit(toolkit: &dyn SchemaToolkit) -> Self {
        let mut table = Self::new();
        for slot in toolkit.slot_names() {
            let Some(element) = toolkit.get_element(&slot) else {
                continue;
            };
            let curie = format_element(&element);
            let bare = curie
                .split_once(':')
                .map(|(_, local)| local.to_string())
                .unwrap_or_else(|| curie.clone());
            table.insert(bare, element.multivalued);
            table.insert(curie, element.multivalued);
        }
        table
    }

    /// Shared default table
    pub fn default_table() -> &'static MultivaluedTable {
        &DEFAULT_TABLE
    }

    /// Declare a property. Core identity properties are always single-valued.
    pub fn insert(&mut self, name: impl Into<String>, multivalued: bool) {
        let name = name.into();
        let multivalued = if multivalued && is_core_property(&name) {
            warn!("Core property {} cannot be multivalued", name);
            false
        } else {
            multivalued
        };
        self.entries.insert(name, multivalued);
    }

    /// `Some(flag)` for declared properties, `None` otherwise
    pub fn lookup(&self, name: &str) -> Option<bool> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
