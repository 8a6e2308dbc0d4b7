//! LLM-stub engine: the rule backbone decorated with the metadata an LLM
//! extraction pass would attach, for offline pipeline testing.

use graphmill_core::{EntityRecord, RelationRecord};
use graphmill_ingest::DocumentUnit;
use serde_json::{json, Value};

use crate::engine::ExtractionEngine;
use crate::engines::{take_object, RuleEngine};

pub struct LlmStubEngine {
    backbone: RuleEngine,
}

impl LlmStubEngine {
    pub fn new(backbone: RuleEngine) -> Self {
        Self { backbone }
    }
}

impl ExtractionEngine for LlmStubEngine {
    fn name(&self) -> &'static str {
        "llm-stub"
    }

    fn extract_entities(&self, units: &[DocumentUnit]) -> Vec<EntityRecord> {
        let mut entities = self.backbone.extract_entities(units);
        for entity in &mut entities {
            let mut llm = take_object(&mut entity.metadata, "llm");
            llm.insert(
                "summary".into(),
                json!(format!("{} from stub model", entity.kind)),
            );
            llm.insert("confidence".into(), json!(0.7));
            entity.metadata.insert("llm".into(), Value::Object(llm));
        }
        entities
    }

    fn extract_relations(&self, entities: &[EntityRecord]) -> Vec<RelationRecord> {
        let mut relations = self.backbone.extract_relations(entities);
        for relation in &mut relations {
            let mut llm = take_object(&mut relation.metadata, "llm");
            llm.insert("source".into(), json!("stub-prompt"));
            relation.metadata.insert("llm".into(), Value::Object(llm));
        }
        relations
    }
}
