//! User-supplied entity and relation schemas.
//!
//! Both schemas arrive as JSON objects of string -> array-of-string. The
//! entity schema maps a type name to its expected attribute names; the
//! relation schema maps a relation name to an ordered signature of tokens,
//! each either an entity type name or an attribute name.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{Error, Result};

/// Entity type name -> ordered attribute names.
#[derive(Debug, Clone, Default)]
pub struct EntitySchema {
    attributes: HashMap<String, Vec<String>>,
}

impl EntitySchema {
    pub fn new(attributes: HashMap<String, Vec<String>>) -> Self {
        Self { attributes }
    }

    /// Parse from a JSON object. Non-object payloads and non-string-array
    /// values are configuration errors.
    pub fn from_value(value: Value) -> Result<Self> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(Error::Config(format!(
                    "entity schema must be a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };
        let mut attributes = HashMap::new();
        for (name, tokens) in object {
            attributes.insert(name.clone(), string_array(&name, tokens)?);
        }
        Ok(Self { attributes })
    }

    /// Whether `token` names an entity type. The relation resolver uses this
    /// to partition signature tokens into object types and attribute tags.
    pub fn contains_type(&self, token: &str) -> bool {
        self.attributes.contains_key(token)
    }

    pub fn attribute_names(&self, kind: &str) -> Option<&[String]> {
        self.attributes.get(kind).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// One relation definition: name plus ordered signature tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationSpec {
    pub name: String,
    pub signature: Vec<String>,
}

/// Ordered collection of relation definitions. Entry order follows the JSON
/// file so repeated runs emit relations in the same order.
#[derive(Debug, Clone, Default)]
pub struct RelationSchema {
    specs: Vec<RelationSpec>,
}

impl RelationSchema {
    pub fn new(specs: Vec<RelationSpec>) -> Self {
        Self { specs }
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(Error::Config(format!(
                    "relation schema must be a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };
        let mut specs = Vec::with_capacity(object.len());
        for (name, tokens) in object {
            let signature = string_array(&name, tokens)?;
            specs.push(RelationSpec { name, signature });
        }
        Ok(Self { specs })
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelationSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

fn string_array(name: &str, value: Value) -> Result<Vec<String>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(Error::Config(format!(
                "schema entry {:?} must be an array of strings, got {}",
                name,
                json_kind(&other)
            )))
        }
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            other => Err(Error::Config(format!(
                "schema entry {:?} contains a non-string token: {}",
                name,
                json_kind(&other)
            ))),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_schema_from_value() {
        let schema = EntitySchema::from_value(json!({
            "Person": ["name", "age", "position"],
            "Company": ["name"],
        }))
        .unwrap();
        assert!(schema.contains_type("Person"));
        assert!(!schema.contains_type("age"));
        assert_eq!(
            schema.attribute_names("Person").unwrap(),
            &["name", "age", "position"]
        );
    }

    #[test]
    fn test_entity_schema_rejects_non_object() {
        let err = EntitySchema::from_value(json!(["Person"])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_entity_schema_rejects_non_array_entry() {
        let err = EntitySchema::from_value(json!({"Person": "name"})).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_relation_schema_preserves_order() {
        let schema = RelationSchema::from_value(json!({
            "works_at": ["Person", "Company"],
            "has_age": ["Person", "age"],
            "located_in": ["Company", "Location"],
        }))
        .unwrap();
        let names: Vec<&str> = schema.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["works_at", "has_age", "located_in"]);
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn test_relation_schema_rejects_non_string_token() {
        let err = RelationSchema::from_value(json!({"works_at": ["Person", 3]})).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
