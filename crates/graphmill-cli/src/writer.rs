//! Output envelopes and shape validation.
//!
//! Each component (entities, relations) is written as one JSON envelope:
//! `{component, metadata{engine, component, generated_at, document_count,
//! source_documents}, results}`. Validation re-parses the typed envelope
//! and checks the invariants serde alone cannot express.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use graphmill_core::{EntityRecord, Error, RelationRecord, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const COMPONENT_ENTITIES: &str = "entities";
pub const COMPONENT_RELATIONS: &str = "relations";

#[derive(Debug, Serialize, Deserialize)]
pub struct OutputMetadata {
    pub engine: String,
    pub component: String,
    pub generated_at: String,
    pub document_count: usize,
    #[serde(default)]
    pub source_documents: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OutputEnvelope {
    pub component: String,
    pub metadata: OutputMetadata,
    pub results: Vec<Value>,
}

pub fn entity_envelope(
    engine: &str,
    source: &str,
    document_count: usize,
    entities: &[EntityRecord],
) -> Result<OutputEnvelope> {
    envelope(COMPONENT_ENTITIES, engine, source, document_count, entities)
}

pub fn relation_envelope(
    engine: &str,
    source: &str,
    document_count: usize,
    relations: &[RelationRecord],
) -> Result<OutputEnvelope> {
    envelope(COMPONENT_RELATIONS, engine, source, document_count, relations)
}

fn envelope<T: Serialize>(
    component: &str,
    engine: &str,
    source: &str,
    document_count: usize,
    results: &[T],
) -> Result<OutputEnvelope> {
    let results = results
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(OutputEnvelope {
        component: component.to_string(),
        metadata: OutputMetadata {
            engine: engine.to_string(),
            component: component.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            document_count,
            source_documents: vec![source.to_string()],
        },
        results,
    })
}

/// Write an envelope as pretty-printed JSON, creating parent directories.
pub fn write_envelope(path: &Path, envelope: &OutputEnvelope) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(envelope)?)?;
    Ok(())
}

/// Parse and validate a written envelope.
pub fn validate_envelope(raw: &str) -> Result<OutputEnvelope> {
    let envelope: OutputEnvelope = serde_json::from_str(raw)?;
    if envelope.component != COMPONENT_ENTITIES && envelope.component != COMPONENT_RELATIONS {
        return Err(Error::InvalidOutput(format!(
            "unknown component {:?}",
            envelope.component
        )));
    }
    if envelope.metadata.component != envelope.component {
        return Err(Error::InvalidOutput(
            "metadata.component does not match component".to_string(),
        ));
    }
    if DateTime::parse_from_rfc3339(&envelope.metadata.generated_at).is_err() {
        return Err(Error::InvalidOutput(format!(
            "generated_at is not an RFC 3339 timestamp: {:?}",
            envelope.metadata.generated_at
        )));
    }
    for (index, result) in envelope.results.iter().enumerate() {
        let has_keys = result.get("id").is_some() && result.get("type").is_some();
        if !has_keys {
            return Err(Error::InvalidOutput(format!(
                "result {} is missing id or type",
                index
            )));
        }
    }
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphmill_core::ids;
    use serde_json::json;

    fn sample_entity() -> EntityRecord {
        let mut e = EntityRecord::new(
            ids::entity_id("Person", "Jane Doe"),
            "Person",
            "Jane Doe, age 30, works at Acme as a Manager.",
        );
        e.attributes.insert("name".into(), json!("Jane Doe"));
        e
    }

    #[test]
    fn test_envelope_roundtrip_validates() {
        let envelope = entity_envelope("rule", "docs.txt", 3, &[sample_entity()]).unwrap();
        let raw = serde_json::to_string(&envelope).unwrap();
        let parsed = validate_envelope(&raw).unwrap();
        assert_eq!(parsed.component, COMPONENT_ENTITIES);
        assert_eq!(parsed.metadata.engine, "rule");
        assert_eq!(parsed.metadata.document_count, 3);
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0]["type"], "Person");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/entities.json");
        let envelope = entity_envelope("rule", "docs.txt", 0, &[]).unwrap();
        write_envelope(&path, &envelope).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(validate_envelope(&raw).is_ok());
    }

    #[test]
    fn test_unknown_component_rejected() {
        let raw = json!({
            "component": "mystery",
            "metadata": {
                "engine": "rule",
                "component": "mystery",
                "generated_at": "2026-01-01T00:00:00+00:00",
                "document_count": 0,
            },
            "results": [],
        })
        .to_string();
        assert!(matches!(
            validate_envelope(&raw).unwrap_err(),
            Error::InvalidOutput(_)
        ));
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        let raw = json!({
            "component": "entities",
            "metadata": {
                "engine": "rule",
                "component": "entities",
                "generated_at": "yesterday",
                "document_count": 0,
            },
            "results": [],
        })
        .to_string();
        assert!(matches!(
            validate_envelope(&raw).unwrap_err(),
            Error::InvalidOutput(_)
        ));
    }

    #[test]
    fn test_result_without_id_rejected() {
        let raw = json!({
            "component": "entities",
            "metadata": {
                "engine": "rule",
                "component": "entities",
                "generated_at": "2026-01-01T00:00:00+00:00",
                "document_count": 0,
            },
            "results": [{"type": "Person"}],
        })
        .to_string();
        assert!(matches!(
            validate_envelope(&raw).unwrap_err(),
            Error::InvalidOutput(_)
        ));
    }
}
