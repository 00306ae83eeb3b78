//! Merging of property records seen more than once
//!
//! When the same node or edge arrives from several sources, its records are
//! combined key by key. Multivalued properties accumulate without duplicates;
//! single-valued ones are kept, replaced or accumulated depending on
//! `preserve`. Core identity properties (`id`, `subject`, `predicate`,
//! `object`, `relation`) never change once set.
//!
//! # Example
//!
//! ```rust
//! use kgx::graph::{PropertyMap, PropertyValue};
//! use kgx::merge::prepare_data_dict;
//!
//! let mut d1 = PropertyMap::new();
//! d1.insert("biolink:category".into(), PropertyValue::from(vec!["biolink:Gene"]));
//! let mut d2 = PropertyMap::new();
//! d2.insert("biolink:category".into(), PropertyValue::from(vec!["biolink:NamedThing"]));
//!
//! let merged = prepare_data_dict(&d1, &d2, true);
//! assert_eq!(
//!     merged["biolink:category"],
//!     PropertyValue::from(vec!["biolink:Gene", "biolink:NamedThing"])
//! );
//! ```

mod multivalued;

pub use multivalued::MultivaluedTable;

use crate::graph::{local_name, PropertyMap, PropertyValue, Scalar};
use tracing::debug;

/// Properties that identify a node or edge
pub const CORE_PROPERTIES: [&str; 5] = ["id", "subject", "predicate", "object", "relation"];

/// Whether a property name, bare or namespaced, is a core identity property
pub fn is_core_property(name: &str) -> bool {
    CORE_PROPERTIES.contains(&local_name(name))
}

/// Merge `d2` into a copy of `d1` using the default multivalued table
pub fn prepare_data_dict(d1: &PropertyMap, d2: &PropertyMap, preserve: bool) -> PropertyMap {
    PropertyMerger::default().merge(d1, d2, preserve)
}

/// Existing value(s) followed by incoming values not already present
fn accumulate(existing: &PropertyValue, incoming: &PropertyValue) -> PropertyValue {
    let mut values: Vec<Scalar> = Vec::with_capacity(existing.scalars().len() + incoming.scalars().len());
    for value in existing.scalars().iter().chain(incoming.scalars()) {
        if !values.contains(value) {
            values.push(value.clone());
        }
    }
    PropertyValue::Sequence(values)
}

/// Record merger over a multivalued table
#[derive(Debug, Clone, Copy)]
pub struct PropertyMerger<'a> {
    table: &'a MultivaluedTable,
}

impl Default for PropertyMerger<'static> {
    fn default() -> Self {
        Self::new(MultivaluedTable::default_table())
    }
}

impl<'a> PropertyMerger<'a> {
    pub fn new(table: &'a MultivaluedTable) -> Self {
        Self { table }
    }

    /// Merge two records into a new one; neither input is modified.
    ///
    /// Keys of `d1` come first in their original order, followed by keys
    /// that only `d2` has, in `d2`'s order.
    pub fn merge(&self, d1: &PropertyMap, d2: &PropertyMap, preserve: bool) -> PropertyMap {
        let mut merged = d1.clone();
        for (key, incoming) in d2 {
            let value = match merged.get(key) {
                None if self.table.lookup(key) == Some(true) => {
                    accumulate(&PropertyValue::Sequence(Vec::new()), incoming)
                }
                None => incoming.clone(),
                Some(existing) => self.merge_value(key, existing, incoming, preserve),
            };
            merged.insert(key.clone(), value);
        }
        merged
    }

    fn merge_value(
        &self,
        key: &str,
        existing: &PropertyValue,
        incoming: &PropertyValue,
        preserve: bool,
    ) -> PropertyValue {
        match self.table.lookup(key) {
            Some(true) => accumulate(existing, incoming),
            _ if existing == incoming => existing.clone(),
            _ if is_core_property(key) => {
                debug!(
                    "Not overwriting core property {}: keeping {}, discarding {}",
                    key, existing, incoming
                );
                existing.clone()
            }
            // undeclared properties accumulate unless told not to
            Some(false) | None if preserve => accumulate(existing, incoming),
            Some(false) | None => incoming.clone(),
        }
    }
}
