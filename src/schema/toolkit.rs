//! In-memory schema toolkit backed by a YAML model definition

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const BUILTIN_MODEL: &str = include_str!("biolink_model.yaml");

/// Schema errors
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Malformed YAML
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Model file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Model references an element it does not define
    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Kind of schema element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Class,
    Slot,
    Type,
}

/// A class, slot or type of the model
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Name as written in the model, in sentence case
    pub name: String,
    pub kind: ElementKind,
    /// Parent (`is_a` for classes and slots, `typeof` for types)
    pub is_a: Option<String>,
    pub mixins: Vec<String>,
    pub multivalued: bool,
    pub range: Option<String>,
    /// Datatype URI, for types
    pub uri: Option<String>,
    pub description: Option<String>,
}

/// Lookups a schema service provides
pub trait SchemaToolkit: Send + Sync + fmt::Debug {
    /// Element by exact (case-insensitive) name
    fn get_element(&self, name: &str) -> Option<Element>;

    /// The element and everything it inherits from, nearest first
    fn get_ancestors(&self, name: &str) -> Vec<String>;

    /// The element and everything inheriting from it, nearest first
    fn get_descendants(&self, name: &str) -> Vec<String>;

    /// Names of every slot, in model order
    fn slot_names(&self) -> Vec<String>;

    /// Whether a slot is multivalued; `None` for unknown slots
    fn is_multivalued(&self, slot: &str) -> Option<bool> {
        self.get_element(slot)
            .filter(|e| e.kind == ElementKind::Slot)
            .map(|e| e.multivalued)
    }

    /// Range of a slot, inherited along `is_a` when not declared
    fn slot_range(&self, slot: &str) -> Option<String> {
        self.get_ancestors(slot)
            .iter()
            .filter_map(|name| self.get_element(name))
            .find_map(|e| e.range)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModelDefinition {
    name: String,
    default_prefix: Option<String>,
    classes: IndexMap<String, ClassDefinition>,
    slots: IndexMap<String, SlotDefinition>,
    types: IndexMap<String, TypeDefinition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClassDefinition {
    is_a: Option<String>,
    mixins: Vec<String>,
    mixin: bool,
    description: Option<String>,
    slots: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SlotDefinition {
    is_a: Option<String>,
    mixins: Vec<String>,
    multivalued: bool,
    range: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TypeDefinition {
    #[serde(rename = "typeof")]
    type_of: Option<String>,
    uri: Option<String>,
    description: Option<String>,
}

/// Schema toolkit over a model held in memory
#[derive(Debug)]
pub struct ModelToolkit {
    name: String,
    default_prefix: Option<String>,
    /// Lowercased name -> element
    elements: IndexMap<String, Element>,
    /// Lowercased name -> direct children (by `is_a` or mixin)
    children: HashMap<String, Vec<String>>,
}

impl ModelToolkit {
    /// Toolkit over the embedded core model
    pub fn builtin() -> SchemaResult<Self> {
        Self::from_yaml_str(BUILTIN_MODEL)
    }

    /// Load from a schema file, or the embedded model when none is given
    pub fn load(schema: Option<&Path>) -> SchemaResult<Self> {
        match schema {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    /// Read a model definition from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&document)
    }

    /// Parse a model definition
    pub fn from_yaml_str(document: &str) -> SchemaResult<Self> {
        let model: ModelDefinition = serde_yaml::from_str(document)?;

        let mut elements = IndexMap::new();
        for (name, class) in model.classes {
            let description = class.description;
            debug!("Class {} declares {} slots (mixin: {})", name, class.slots.len(), class.mixin);
            elements.insert(
                name.to_lowercase(),
                Element {
                    name,
                    kind: ElementKind::Class,
                    is_a: class.is_a,
                    mixins: class.mixins,
                    multivalued: false,
                    range: None,
                    uri: None,
                    description,
                },
            );
        }
        for (name, slot) in model.slots {
            elements.insert(
                name.to_lowercase(),
                Element {
                    name,
                    kind: ElementKind::Slot,
                    is_a: slot.is_a,
                    mixins: slot.mixins,
                    multivalued: slot.multivalued,
                    range: slot.range,
                    uri: None,
                    description: slot.description,
                },
            );
        }
        for (name, ty) in model.types {
            elements.insert(
                name.to_lowercase(),
                Element {
                    name,
                    kind: ElementKind::Type,
                    is_a: ty.type_of,
                    mixins: Vec::new(),
                    multivalued: false,
                    range: None,
                    uri: ty.uri,
                    description: ty.description,
                },
            );
        }

        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        for (key, element) in &elements {
            for parent in element.is_a.iter().chain(element.mixins.iter()) {
                let parent_key = parent.to_lowercase();
                match elements.get(&parent_key) {
                    Some(p) if p.kind == element.kind => {}
                    Some(_) => {
                        return Err(SchemaError::InvalidModel(format!(
                            "{} inherits from {} of a different kind",
                            element.name, parent
                        )))
                    }
                    None => {
                        return Err(SchemaError::InvalidModel(format!(
                            "{} inherits from undefined element {}",
                            element.name, parent
                        )))
                    }
                }
                children.entry(parent_key).or_default().push(key.clone());
            }
        }

        info!("Loaded schema {} with {} elements", model.name, elements.len());
        Ok(Self {
            name: model.name,
            default_prefix: model.default_prefix,
            elements,
            children,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_prefix(&self) -> Option<&str> {
        self.default_prefix.as_deref()
    }

    /// Breadth-first walk from `name` along `next`, reflexive, without repeats
    fn walk<F>(&self, name: &str, next: F) -> Vec<String>
    where
        F: Fn(&str) -> Vec<String>,
    {
        let start = name.to_lowercase();
        if !self.elements.contains_key(&start) {
            return Vec::new();
        }
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([start]);
        let mut out = Vec::new();
        while let Some(key) = queue.pop_front() {
            if !seen.insert(key.clone()) {
                continue;
            }
            if let Some(element) = self.elements.get(&key) {
                out.push(element.name.clone());
                queue.extend(next(&key));
            }
        }
        out
    }
}

impl SchemaToolkit for ModelToolkit {
    fn get_element(&self, name: &str) -> Option<Element> {
        self.elements.get(&name.to_lowercase()).cloned()
    }

    fn get_ancestors(&self, name: &str) -> Vec<String> {
        self.walk(name, |key| {
            self.elements
                .get(key)
                .map(|e| {
                    e.is_a
                        .iter()
                        .chain(e.mixins.iter())
                        .map(|p| p.to_lowercase())
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    fn get_descendants(&self, name: &str) -> Vec<String> {
        self.walk(name, |key| self.children.get(key).cloned().unwrap_or_default())
    }

    fn slot_names(&self) -> Vec<String> {
        self.elements
            .values()
            .filter(|e| e.kind == ElementKind::Slot)
            .map(|e| e.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_model_loads() {
        let tk = ModelToolkit::builtin().unwrap();
        assert_eq!(tk.name(), "biolink-model-core");
        assert_eq!(tk.default_prefix(), Some("biolink"));

        let gene = tk.get_element("gene").unwrap();
        assert_eq!(gene.kind, ElementKind::Class);
        assert_eq!(gene.is_a.as_deref(), Some("genomic entity"));
        assert_eq!(tk.get_element("Gene").unwrap().name, "gene");
        assert!(tk.get_element("no such thing").is_none());
    }

    #[test]
    fn test_ancestors() {
        let tk = ModelToolkit::builtin().unwrap();
        assert_eq!(
            tk.get_ancestors("gene"),
            vec![
                "gene",
                "genomic entity",
                "gene or gene product",
                "molecular entity",
                "biological entity",
                "named thing",
            ]
        );
        assert!(tk.get_ancestors("unknown").is_empty());
    }

    #[test]
    fn test_descendants() {
        let tk = ModelToolkit::builtin().unwrap();
        let descendants = tk.get_descendants("disease or phenotypic feature");
        assert_eq!(
            descendants,
            vec!["disease or phenotypic feature", "disease", "phenotypic feature"]
        );
        let mixin_children = tk.get_descendants("gene or gene product");
        assert!(mixin_children.contains(&"gene".to_string()));
        assert!(mixin_children.contains(&"protein".to_string()));
    }

    #[test]
    fn test_slots() {
        let tk = ModelToolkit::builtin().unwrap();
        assert_eq!(tk.is_multivalued("category"), Some(true));
        assert_eq!(tk.is_multivalued("name"), Some(false));
        assert_eq!(tk.is_multivalued("gene"), None);
        assert_eq!(tk.slot_range("interacts with").as_deref(), Some("named thing"));
        assert_eq!(tk.slot_range("node property"), None);
        assert!(tk.slot_names().contains(&"provided by".to_string()));
    }

    #[test]
    fn test_invalid_model() {
        let doc = "name: broken\nclasses:\n  gene:\n    is_a: missing\n";
        assert!(matches!(
            ModelToolkit::from_yaml_str(doc),
            Err(SchemaError::InvalidModel(_))
        ));

        let doc = "name: broken\nclasses:\n  thing: {}\nslots:\n  id:\n    is_a: thing\n";
        assert!(matches!(
            ModelToolkit::from_yaml_str(doc),
            Err(SchemaError::InvalidModel(_))
        ));

        assert!(matches!(
            ModelToolkit::from_yaml_str("classes: [1, 2"),
            Err(SchemaError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.yaml");
        std::fs::write(&path, "name: tiny\nclasses:\n  thing: {}\n  widget:\n    is_a: thing\n").unwrap();

        let tk = ModelToolkit::load(Some(&path)).unwrap();
        assert_eq!(tk.name(), "tiny");
        assert_eq!(tk.get_ancestors("widget"), vec!["widget", "thing"]);

        assert!(matches!(
            ModelToolkit::load(Some(&dir.path().join("missing.yaml"))),
            Err(SchemaError::Io { .. })
        ));
    }
}
