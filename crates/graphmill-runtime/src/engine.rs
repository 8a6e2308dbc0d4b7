//! The extraction engine contract and its factory.
//!
//! Every engine variant shares one surface: entities from documents, then
//! relations from the finalized entity list. Callers select a variant by
//! name and never depend on a concrete type.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use graphmill_core::{EntityRecord, EntitySchema, Error, RelationRecord, RelationSchema};
use graphmill_ingest::DocumentUnit;

use crate::engines::{LlmStubEngine, MlEngine, RuleEngine};

/// Common surface of all extraction engines.
pub trait ExtractionEngine {
    fn name(&self) -> &'static str;

    /// Extract raw (pre-dedup) entities from the document units.
    fn extract_entities(&self, units: &[DocumentUnit]) -> Vec<EntityRecord>;

    /// Resolve relations over a finalized (deduplicated) entity list.
    fn extract_relations(&self, entities: &[EntityRecord]) -> Vec<RelationRecord>;
}

/// Known engine variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Pattern-and-table driven extraction.
    Rule,
    /// Rule backbone decorated with stubbed LLM metadata.
    LlmStub,
    /// Rule backbone decorated with mock model confidence signals.
    Ml,
}

impl FromStr for EngineKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "rule" | "regex" => Ok(Self::Rule),
            "llm-stub" | "llm" => Ok(Self::LlmStub),
            "ml" => Ok(Self::Ml),
            other => Err(Error::Config(format!("unknown engine: {:?}", other))),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule => write!(f, "rule"),
            Self::LlmStub => write!(f, "llm-stub"),
            Self::Ml => write!(f, "ml"),
        }
    }
}

/// Build an engine variant. All variants share the rule backbone and the
/// injected `today` used for project status classification.
pub fn build_engine(
    kind: EngineKind,
    entity_schema: EntitySchema,
    relation_schema: RelationSchema,
    today: NaiveDate,
) -> Box<dyn ExtractionEngine> {
    let backbone = RuleEngine::new(entity_schema, relation_schema, today);
    match kind {
        EngineKind::Rule => Box::new(backbone),
        EngineKind::LlmStub => Box::new(LlmStubEngine::new(backbone)),
        EngineKind::Ml => Box::new(MlEngine::new(backbone)),
    }
}
