//! Deduplication passes over raw extraction output.
//!
//! Entities group by (type, canonical name); the surviving record's
//! attribute and metadata maps are the union of the group, first-seen
//! values winning on conflicting keys, so no value is silently dropped.
//! Relations group by id alone: relation ids already encode
//! type + subject + object. Both passes preserve first-occurrence order,
//! which callers rely on for reproducible output diffs.

use std::collections::{HashMap, HashSet};

use graphmill_core::{EntityRecord, RelationRecord};
use tracing::debug;

/// Counters for one dedup pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DedupReport {
    pub input: usize,
    pub output: usize,
}

impl DedupReport {
    pub fn removed(&self) -> usize {
        self.input - self.output
    }
}

/// Merge entities sharing a (type, canonical name) key.
pub fn dedup_entities(entities: Vec<EntityRecord>) -> (Vec<EntityRecord>, DedupReport) {
    let input = entities.len();
    let mut seen: HashMap<(String, String), usize> = HashMap::new();
    let mut output: Vec<EntityRecord> = Vec::new();

    for entity in entities {
        let key = (entity.kind.clone(), entity.canonical_name().to_string());
        match seen.get(&key) {
            Some(&index) => merge_entity(&mut output[index], entity),
            None => {
                seen.insert(key, output.len());
                output.push(entity);
            }
        }
    }

    let report = DedupReport {
        input,
        output: output.len(),
    };
    if report.removed() > 0 {
        debug!("Merged {} duplicate entities", report.removed());
    }
    (output, report)
}

/// Union-merge `duplicate` into `keeper`; keeper's existing values win.
fn merge_entity(keeper: &mut EntityRecord, duplicate: EntityRecord) {
    for (key, value) in duplicate.attributes {
        keeper.attributes.entry(key).or_insert(value);
    }
    for (key, value) in duplicate.metadata {
        keeper.metadata.entry(key).or_insert(value);
    }
}

/// Drop relations whose id was already seen.
pub fn dedup_relations(relations: Vec<RelationRecord>) -> (Vec<RelationRecord>, DedupReport) {
    let input = relations.len();
    let mut seen: HashSet<String> = HashSet::new();
    let mut output = Vec::new();
    for relation in relations {
        if seen.insert(relation.id.clone()) {
            output.push(relation);
        }
    }
    let report = DedupReport {
        input,
        output: output.len(),
    };
    if report.removed() > 0 {
        debug!("Removed {} duplicate relations", report.removed());
    }
    (output, report)
}
