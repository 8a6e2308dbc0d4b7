//! Mock ML engine: the rule backbone decorated with stepped confidence
//! signals, standing in for a trained model in evaluation runs.

use graphmill_core::{EntityRecord, RelationRecord};
use graphmill_ingest::DocumentUnit;
use serde_json::{json, Value};

use crate::engine::ExtractionEngine;
use crate::engines::{take_object, RuleEngine};

const MODEL_NAME: &str = "mock-tree-forest";

pub struct MlEngine {
    backbone: RuleEngine,
}

impl MlEngine {
    pub fn new(backbone: RuleEngine) -> Self {
        Self { backbone }
    }
}

impl ExtractionEngine for MlEngine {
    fn name(&self) -> &'static str {
        "ml"
    }

    fn extract_entities(&self, units: &[DocumentUnit]) -> Vec<EntityRecord> {
        let mut entities = self.backbone.extract_entities(units);
        for (index, entity) in entities.iter_mut().enumerate() {
            let confidence = round2(0.55 + (index % 5) as f64 * 0.05);
            let mut signals = take_object(&mut entity.metadata, "ml_signals");
            signals.insert("confidence".into(), json!(confidence));
            signals.insert("model".into(), json!(MODEL_NAME));
            entity
                .metadata
                .insert("ml_signals".into(), Value::Object(signals));
        }
        entities
    }

    fn extract_relations(&self, entities: &[EntityRecord]) -> Vec<RelationRecord> {
        let mut relations = self.backbone.extract_relations(entities);
        for (index, relation) in relations.iter_mut().enumerate() {
            let confidence = round2(0.5 + (index % 3) as f64 * 0.1);
            let mut signals = take_object(&mut relation.metadata, "ml_signals");
            signals.insert("confidence".into(), json!(confidence));
            signals.insert("model".into(), json!(MODEL_NAME));
            relation
                .metadata
                .insert("ml_signals".into(), Value::Object(signals));
        }
        relations
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
