//! Entity and relation records produced by the extraction pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sentinel used as `source_sentence` for entities synthesized from other
/// entities rather than matched in document text.
pub const DERIVED_SENTINEL: &str = "derived";

/// A single extracted entity.
///
/// `attributes` holds the user-facing attribute map in insertion order;
/// `metadata` holds resolver-only hints (cached company name, project list,
/// location info) that never leave the pipeline as attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: Map<String, Value>,
    pub source_sentence: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl EntityRecord {
    pub fn new(id: String, kind: impl Into<String>, source_sentence: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            attributes: Map::new(),
            source_sentence: source_sentence.into(),
            metadata: Map::new(),
        }
    }

    /// Canonical name of this entity: the `name` attribute, then `title`
    /// (Position records), then the raw source sentence.
    pub fn canonical_name(&self) -> &str {
        self.attr_str("name")
            .or_else(|| self.attr_str("title"))
            .unwrap_or(&self.source_sentence)
    }

    /// String attribute lookup.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// String metadata lookup.
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// Cached company hint: resolver metadata first, attributes second.
    pub fn company_hint(&self) -> Option<&str> {
        self.meta_str("company").or_else(|| self.attr_str("company"))
    }

    pub fn is_derived(&self) -> bool {
        self.source_sentence == DERIVED_SENTINEL
    }
}

/// A single resolved relation between entities.
///
/// `object_id` is `None` for attribute-only relations whose signature names
/// no second entity type. `metadata` carries attribute values pulled from
/// the subject per the relation signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub subject_id: String,
    pub object_id: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}
