//! Test utilities for ifcheck integration tests
#![allow(dead_code)]

use ifcheck::model::{Entity, IfcModel, Property, PropertySet, PropertyValue};

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Entity with a single real-valued property in one property set
pub fn entity_with_property(
    global_id: &str,
    ifc_type: &str,
    set_name: &str,
    property_name: &str,
    value: f64,
) -> Entity {
    Entity {
        global_id: global_id.to_string(),
        ifc_type: ifc_type.to_string(),
        name: Some(format!("{} {}", ifc_type, global_id)),
        long_name: None,
        property_sets: vec![PropertySet {
            name: set_name.to_string(),
            properties: vec![Property {
                name: property_name.to_string(),
                value: PropertyValue::Real(value),
            }],
        }],
    }
}

/// Entity with no properties at all
pub fn bare_entity(global_id: &str, ifc_type: &str) -> Entity {
    Entity {
        global_id: global_id.to_string(),
        ifc_type: ifc_type.to_string(),
        name: Some(format!("{} {}", ifc_type, global_id)),
        long_name: None,
        property_sets: vec![],
    }
}

/// A small building with one passing and one failing door
pub fn two_door_model() -> IfcModel {
    let mut model = IfcModel::new("IFC4");
    model.add_entity(entity_with_property(
        "d1",
        "IfcDoor",
        "Pset_DoorCommon",
        "OverallWidth",
        0.9,
    ));
    model.add_entity(entity_with_property(
        "d2",
        "IfcDoor",
        "Pset_DoorCommon",
        "OverallWidth",
        0.7,
    ));
    model
}

/// JSON text for a model file with one door of the given width
pub fn door_model_json(schema: &str, width: f64) -> String {
    format!(
        r#"{{
  "schema": "{schema}",
  "project": "Test Project",
  "entities": [
    {{
      "global_id": "d1",
      "type": "IfcDoor",
      "name": "Main Entrance",
      "property_sets": [
        {{
          "name": "Pset_DoorCommon",
          "properties": [{{"name": "OverallWidth", "value": {width}}}]
        }}
      ]
    }}
  ]
}}"#
    )
}
