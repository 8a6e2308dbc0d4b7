//! Rule-based engine: pattern library plus reference tables plus the
//! schema-generic resolver.

use chrono::NaiveDate;
use graphmill_core::{EntityRecord, EntitySchema, RelationRecord, RelationSchema};
use graphmill_ingest::{DocumentUnit, EntityExtractor, PatternLibrary, ReferenceTables};
use graphmill_resolve::{EntityIndex, RelationResolver};

use crate::engine::ExtractionEngine;

pub struct RuleEngine {
    entity_schema: EntitySchema,
    relation_schema: RelationSchema,
    patterns: PatternLibrary,
    tables: ReferenceTables,
    today: NaiveDate,
}

impl RuleEngine {
    /// Engine with the built-in pattern library and reference tables.
    pub fn new(
        entity_schema: EntitySchema,
        relation_schema: RelationSchema,
        today: NaiveDate,
    ) -> Self {
        Self::with_components(
            entity_schema,
            relation_schema,
            PatternLibrary::builtin().clone(),
            ReferenceTables::builtin().clone(),
            today,
        )
    }

    /// Engine with custom patterns or tables; deployments extend the
    /// built-ins without touching extraction or resolution code.
    pub fn with_components(
        entity_schema: EntitySchema,
        relation_schema: RelationSchema,
        patterns: PatternLibrary,
        tables: ReferenceTables,
        today: NaiveDate,
    ) -> Self {
        Self {
            entity_schema,
            relation_schema,
            patterns,
            tables,
            today,
        }
    }
}

impl ExtractionEngine for RuleEngine {
    fn name(&self) -> &'static str {
        "rule"
    }

    fn extract_entities(&self, units: &[DocumentUnit]) -> Vec<EntityRecord> {
        EntityExtractor::new(&self.patterns, &self.tables, self.today).extract(units)
    }

    fn extract_relations(&self, entities: &[EntityRecord]) -> Vec<RelationRecord> {
        let index = EntityIndex::build(entities);
        RelationResolver::new(&index, &self.entity_schema).resolve_all(&self.relation_schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphmill_ingest::normalize_text;
    use serde_json::json;

    fn engine() -> RuleEngine {
        RuleEngine::new(
            EntitySchema::from_value(json!({
                "Person": ["name", "age", "position"],
                "Company": ["name", "industry"],
            }))
            .unwrap(),
            RelationSchema::from_value(json!({
                "works_at": ["Person", "Company"],
            }))
            .unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_rule_engine_end_to_end() {
        let engine = engine();
        let units = normalize_text(
            "Jane Doe, age 30, works at Acme as a Manager.\n\
             Acme operates in consulting.",
        );
        let entities = engine.extract_entities(&units);
        assert!(entities.iter().any(|e| e.kind == "Person"));
        assert!(entities.iter().any(|e| e.kind == "Company"));

        let relations = engine.extract_relations(&entities);
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].kind, "works_at");
    }
}
