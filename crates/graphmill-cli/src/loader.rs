//! Document and schema loading.
//!
//! A missing source file is the one fatal error class in the pipeline; an
//! empty file is a valid, empty document set.

use std::fs;
use std::path::Path;

use graphmill_core::{EntitySchema, Error, RelationSchema, Result};
use graphmill_ingest::{normalize_text, DocumentUnit};

/// Read a document file and split it into units (one per non-empty line).
pub fn load_documents(path: &Path) -> Result<Vec<DocumentUnit>> {
    let raw = read_source(path)?;
    Ok(normalize_text(&raw))
}

pub fn load_entity_schema(path: &Path) -> Result<EntitySchema> {
    let raw = read_source(path)?;
    EntitySchema::from_value(serde_json::from_str(&raw)?)
}

pub fn load_relation_schema(path: &Path) -> Result<RelationSchema> {
    let raw = read_source(path)?;
    RelationSchema::from_value(serde_json::from_str(&raw)?)
}

fn read_source(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::ResourceNotFound(format!(
            "source file missing: {}",
            path.display()
        )));
    }
    Ok(fs::read_to_string(path)?)
}
