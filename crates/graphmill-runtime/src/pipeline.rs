//! Staged extraction pipeline.
//!
//! Stage order is fixed: extract entities, deduplicate, then resolve
//! relations over the deduplicated list, then deduplicate relations. The
//! dedup barrier before resolution matters: relation resolution performs
//! cross-document lookups by canonical name and must see the full merged
//! entity set. Each stage hands a new collection to the next; nothing is
//! mutated across stages.

use graphmill_consolidate::{dedup_entities, dedup_relations};
use graphmill_core::{EntityRecord, RelationRecord};
use graphmill_ingest::DocumentUnit;
use tracing::info;

use crate::engine::ExtractionEngine;

/// Stage counters for one pipeline run.
#[derive(Debug, Default, Clone, Copy)]
pub struct PipelineReport {
    pub units: usize,
    pub raw_entities: usize,
    pub entities: usize,
    pub raw_relations: usize,
    pub relations: usize,
    pub duration_ms: u64,
}

pub struct PipelineOutput {
    pub entities: Vec<EntityRecord>,
    pub relations: Vec<RelationRecord>,
    pub report: PipelineReport,
}

pub struct ExtractionPipeline {
    engine: Box<dyn ExtractionEngine>,
}

impl ExtractionPipeline {
    pub fn new(engine: Box<dyn ExtractionEngine>) -> Self {
        Self { engine }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Run all stages over the given units.
    pub fn run(&self, units: &[DocumentUnit]) -> PipelineOutput {
        let start = std::time::Instant::now();
        info!(
            "Starting extraction pipeline (engine: {}, units: {})",
            self.engine.name(),
            units.len()
        );

        let raw_entities = self.engine.extract_entities(units);
        let raw_entity_count = raw_entities.len();
        let (entities, entity_report) = dedup_entities(raw_entities);

        let raw_relations = self.engine.extract_relations(&entities);
        let raw_relation_count = raw_relations.len();
        let (relations, relation_report) = dedup_relations(raw_relations);

        let report = PipelineReport {
            units: units.len(),
            raw_entities: raw_entity_count,
            entities: entity_report.output,
            raw_relations: raw_relation_count,
            relations: relation_report.output,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Pipeline complete: entities={} (merged {}), relations={} (removed {}), duration={}ms",
            report.entities,
            entity_report.removed(),
            report.relations,
            relation_report.removed(),
            report.duration_ms
        );

        PipelineOutput {
            entities,
            relations,
            report,
        }
    }
}
