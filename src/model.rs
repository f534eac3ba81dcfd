#![forbid(unsafe_code)]

//! In-memory building model and its JSON loader
//!
//! The orchestrator treats the model as an opaque collaborator: it only needs the
//! schema guard and `by_type` lookup. Checkers additionally traverse entities, their
//! identity and naming attributes, and attached property sets with named properties
//! and nominal values. Native IFC STEP parsing is out of scope; models are loaded
//! from their serialized JSON form.

use crate::error::ModelError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A nominal property value
///
/// Untagged: JSON `true`, `3`, `2.5` and `"F60"` all deserialize to the right variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl PropertyValue {
    /// Numeric view of the value, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Real(v) => Some(*v),
            PropertyValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Text view of the value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A named property with a nominal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

/// A named group of properties attached to an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySet {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// One model entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable identity (`GlobalId` in IFC terms)
    pub global_id: String,
    /// Concrete entity type name, e.g. `IfcDoor`
    #[serde(rename = "type")]
    pub ifc_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub property_sets: Vec<PropertySet>,
}

impl Entity {
    /// Display name, falling back to the entity identity
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{} #{}", self.ifc_type, self.global_id),
        }
    }

    /// First property whose name matches the pattern, searching all property sets
    pub fn find_property(&self, name_pattern: &Regex) -> Option<&Property> {
        self.property_sets
            .iter()
            .flat_map(|set| set.properties.iter())
            .find(|prop| name_pattern.is_match(&prop.name))
    }

    /// First matching property restricted to property sets whose name matches
    pub fn find_property_in_set(
        &self,
        set_pattern: &Regex,
        name_pattern: &Regex,
    ) -> Option<&Property> {
        self.property_sets
            .iter()
            .filter(|set| set_pattern.is_match(&set.name))
            .flat_map(|set| set.properties.iter())
            .find(|prop| name_pattern.is_match(&prop.name))
    }

    /// Numeric value of the first property matching the pattern
    pub fn real_property(&self, name_pattern: &Regex) -> Option<f64> {
        self.find_property(name_pattern)
            .and_then(|prop| prop.value.as_f64())
    }
}

/// Serialized form of a model file
#[derive(Debug, Deserialize)]
struct ModelFile {
    schema: String,
    #[serde(default)]
    project: Option<String>,
    #[serde(default)]
    entities: Vec<Entity>,
}

/// An in-memory building model
#[derive(Debug, Clone)]
pub struct IfcModel {
    schema: String,
    project: Option<String>,
    entities: Vec<Entity>,
    by_type: BTreeMap<String, Vec<usize>>,
}

impl IfcModel {
    /// Creates an empty model with the given schema identifier
    pub fn new(schema: impl Into<String>) -> Self {
        IfcModel {
            schema: schema.into(),
            project: None,
            entities: Vec::new(),
            by_type: BTreeMap::new(),
        }
    }

    /// Loads a model from its JSON file representation
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ModelError::Io {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let file: ModelFile = serde_json::from_str(&content).map_err(|e| ModelError::Parse {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut model = IfcModel::new(file.schema);
        model.project = file.project;
        for entity in file.entities {
            model.add_entity(entity);
        }
        Ok(model)
    }

    /// Adds an entity, keeping the type index current
    pub fn add_entity(&mut self, entity: Entity) {
        let index = self.entities.len();
        self.by_type
            .entry(entity.ifc_type.clone())
            .or_default()
            .push(index);
        self.entities.push(entity);
    }

    /// Declared schema identifier, e.g. `IFC4`
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Project name, when the model declares one
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Whether the declared schema is one this tool understands
    ///
    /// This is the runtime remainder of the handle-type guard: every `IfcModel` is
    /// structurally a model, but only IFC-family schemas are accepted for a run.
    pub fn is_supported_schema(&self) -> bool {
        self.schema.starts_with("IFC")
    }

    /// All entities of the given concrete type, in model order
    pub fn by_type(&self, type_name: &str) -> Vec<&Entity> {
        self.by_type
            .get(type_name)
            .map(|indices| indices.iter().map(|&i| &self.entities[i]).collect())
            .unwrap_or_default()
    }

    /// Total entity count
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
