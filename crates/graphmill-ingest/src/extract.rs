//! Schema-driven entity extraction.
//!
//! Extraction is a strict two-phase pipeline. Phase one (`primary`) is the
//! only phase with access to document text: it applies the pattern library
//! and the technology keyword scan. Phase two (`derive`) synthesizes
//! secondary entities from phase-one output alone, so a derivation rule can
//! never observe an entity that does not exist yet.

pub mod derive;
pub mod primary;

use chrono::NaiveDate;
use graphmill_core::EntityRecord;

use crate::normalize::DocumentUnit;
use crate::patterns::PatternLibrary;
use crate::tables::ReferenceTables;

/// Entity extractor: pattern library plus reference tables plus an injected
/// "today" used to classify project status. The wall clock is never read
/// here; the caller decides what today means.
pub struct EntityExtractor<'a> {
    patterns: &'a PatternLibrary,
    tables: &'a ReferenceTables,
    today: NaiveDate,
}

impl<'a> EntityExtractor<'a> {
    pub fn new(patterns: &'a PatternLibrary, tables: &'a ReferenceTables, today: NaiveDate) -> Self {
        Self {
            patterns,
            tables,
            today,
        }
    }

    /// Run both phases over the given units and return the raw
    /// (pre-dedup) entity list in stable emission order.
    pub fn extract(&self, units: &[DocumentUnit]) -> Vec<EntityRecord> {
        let primary = primary::extract_primary(self.patterns, self.tables, self.today, units);
        let derived = derive::derive_secondary(&primary, self.tables);

        let mut entities = Vec::new();
        entities.extend(primary.persons);
        entities.extend(primary.companies);
        entities.extend(primary.projects);
        entities.extend(derived.departments);
        entities.extend(derived.positions);
        entities.extend(primary.technologies);
        entities.extend(derived.locations);
        entities.extend(derived.teams);
        entities.extend(derived.products);
        entities.extend(derived.clients);
        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_text;

    fn extract(text: &str, today: &str) -> Vec<EntityRecord> {
        let units = normalize_text(text);
        let today = NaiveDate::parse_from_str(today, "%Y-%m-%d").unwrap();
        EntityExtractor::new(PatternLibrary::builtin(), ReferenceTables::builtin(), today)
            .extract(&units)
    }

    fn of_kind<'a>(entities: &'a [EntityRecord], kind: &str) -> Vec<&'a EntityRecord> {
        entities.iter().filter(|e| e.kind == kind).collect()
    }

    #[test]
    fn test_person_and_company_scenario() {
        let entities = extract(
            "Jane Doe, age 30, works at Acme as a Manager.\n\
             Acme operates in cloud computing and analytics.",
            "2026-01-01",
        );
        let persons = of_kind(&entities, "Person");
        assert_eq!(persons.len(), 1);
        let person = persons[0];
        assert_eq!(person.attr_str("name"), Some("Jane Doe"));
        assert_eq!(person.attributes["age"], 30);
        assert_eq!(person.attr_str("position"), Some("Manager"));
        assert_eq!(person.attr_str("department"), Some("Management"));
        assert_eq!(person.company_hint(), Some("Acme"));

        let companies = of_kind(&entities, "Company");
        assert_eq!(companies.len(), 1);
        let company = companies[0];
        assert_eq!(company.attr_str("name"), Some("Acme"));
        assert_eq!(company.attr_str("industry"), Some("cloud computing"));
        assert_eq!(company.attr_str("sector"), Some("analytics"));
        // Acme is not in the location table.
        assert_eq!(company.attr_str("location"), Some("Global"));
    }

    #[test]
    fn test_emission_order_is_stable() {
        let entities = extract(
            "Jane Doe, age 30, works at OpenAI as a Researcher.\n\
             OpenAI operates in AI research.\n\
             Project Phoenix started on 2024-01-01, ends on 2024-06-01.",
            "2026-01-01",
        );
        let kinds: Vec<&str> = entities.iter().map(|e| e.kind.as_str()).collect();
        let expected = [
            "Person",
            "Company",
            "Project",
            "Department",
            "Position",
            "Technology",
            "Location",
            "Team",
            "Product",
            "Client",
        ];
        // Every expected kind appears, and first occurrences follow the
        // fixed emission order.
        let positions: Vec<usize> = expected
            .iter()
            .map(|kind| {
                kinds
                    .iter()
                    .position(|k| k == kind)
                    .unwrap_or_else(|| panic!("missing kind {}", kind))
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_idempotent_ids() {
        let text = "Jane Doe, age 30, works at Acme as a Manager.\n\
                    Acme operates in consulting.";
        let first = extract(text, "2026-01-01");
        let second = extract(text, "2026-01-01");
        let first_ids: Vec<&str> = first.iter().map(|e| e.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract("", "2026-01-01").is_empty());
    }
}
