//! Schema-generic relation resolution.
//!
//! A relation definition is nothing but an ordered signature of tokens. The
//! first token names the subject entity type; every following token is
//! either an attribute tag (not an entity type in the entity schema) or an
//! object entity type. No relation-specific code exists: the resolver
//! decides who plays which role from the signature alone.

use graphmill_core::{ids, EntityRecord, EntitySchema, RelationRecord, RelationSchema, RelationSpec};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::index::EntityIndex;

/// Metadata key marking a relation whose object was substituted by the
/// first-of-type fallback rather than matched precisely.
pub const FALLBACK_MARKER: &str = "resolution";

pub struct RelationResolver<'a> {
    index: &'a EntityIndex<'a>,
    entity_schema: &'a EntitySchema,
}

impl<'a> RelationResolver<'a> {
    pub fn new(index: &'a EntityIndex<'a>, entity_schema: &'a EntitySchema) -> Self {
        Self {
            index,
            entity_schema,
        }
    }

    /// Resolve every relation definition, in schema order.
    pub fn resolve_all(&self, schema: &RelationSchema) -> Vec<RelationRecord> {
        schema.iter().flat_map(|spec| self.resolve(spec)).collect()
    }

    /// Resolve one relation definition against the index.
    ///
    /// Emits one record per (subject, object type) pair; attribute-only
    /// signatures emit one record per subject with no object. A definition
    /// whose subject type has no entities yields nothing.
    pub fn resolve(&self, spec: &RelationSpec) -> Vec<RelationRecord> {
        let Some(subject_type) = spec.signature.first() else {
            debug!("Relation {:?} has an empty signature; skipping", spec.name);
            return Vec::new();
        };

        // Partition the remaining tokens, preserving relative order within
        // each partition.
        let mut attribute_tags: Vec<&str> = Vec::new();
        let mut object_types: Vec<&str> = Vec::new();
        for token in &spec.signature[1..] {
            if self.entity_schema.contains_type(token) {
                object_types.push(token);
            } else {
                attribute_tags.push(token);
            }
        }

        let subjects = self.index.of_type(subject_type);
        if subjects.is_empty() {
            debug!(
                "No {:?} entities; relation {:?} yields nothing",
                subject_type, spec.name
            );
            return Vec::new();
        }

        let mut records = Vec::new();
        for &subject in subjects {
            let metadata = self.subject_metadata(subject, &attribute_tags);

            if object_types.is_empty() {
                records.push(RelationRecord {
                    id: ids::relation_id(&spec.name, &subject.id, None),
                    kind: spec.name.clone(),
                    subject_id: subject.id.clone(),
                    object_id: None,
                    metadata: metadata.clone(),
                });
                continue;
            }

            for &object_type in &object_types {
                let mut metadata = metadata.clone();
                let mut target = self.match_object(subject, object_type);
                if target.is_none() {
                    // Best-effort fallback: substituting the first entity of
                    // the type maximizes relation coverage at the cost of
                    // some false positives, so these records are marked as
                    // low-confidence for downstream consumers.
                    target = self.index.first_of_type(object_type);
                    if target.is_some() {
                        metadata.insert(FALLBACK_MARKER.into(), json!("fallback"));
                    }
                }
                let object_id = target.map(|entity| entity.id.clone());
                records.push(RelationRecord {
                    id: ids::relation_id(&spec.name, &subject.id, object_id.as_deref()),
                    kind: spec.name.clone(),
                    subject_id: subject.id.clone(),
                    object_id,
                    metadata,
                });
            }
        }
        records
    }

    /// Pull attribute-tag values off the subject. A missing attribute is
    /// omitted, never an error: schemas are user-authored and may name
    /// attributes the document set never produced.
    fn subject_metadata(&self, subject: &EntityRecord, tags: &[&str]) -> Map<String, Value> {
        let mut metadata = Map::new();
        for &tag in tags {
            let value = subject
                .attributes
                .get(tag)
                .or_else(|| subject.metadata.get(tag));
            if let Some(value) = value {
                metadata.insert(tag.to_string(), value.clone());
            }
        }
        metadata
    }

    /// Type-keyed precise matching rules.
    fn match_object(
        &self,
        subject: &EntityRecord,
        object_type: &str,
    ) -> Option<&'a EntityRecord> {
        match object_type {
            "Company" => {
                let company = subject.company_hint()?;
                self.index.find_by_name("Company", company)
            }
            "Project" => {
                if let Some(Value::Array(projects)) = subject.metadata.get("projects") {
                    for project in projects.iter().filter_map(Value::as_str) {
                        if let Some(found) = self.index.find_by_name("Project", project) {
                            return Some(found);
                        }
                    }
                }
                let project = subject.meta_str("project")?;
                self.index.find_by_name("Project", project)
            }
            "Department" => {
                let department = subject.attr_str("department")?;
                self.index.find_by_name("Department", department)
            }
            "Team" => {
                if let Some(team) = subject.meta_str("team") {
                    if let Some(found) = self.index.find_by_name("Team", team) {
                        return Some(found);
                    }
                }
                let template = format!("{} Squad", subject.attr_str("name")?);
                self.index.find_by_name("Team", &template)
            }
            "Location" => {
                let company = subject.company_hint().or_else(|| {
                    // A Company subject locates itself.
                    (subject.kind == "Company").then(|| subject.attr_str("name")).flatten()
                })?;
                let company_entity = self.index.find_by_name("Company", company)?;
                let city = company_entity
                    .metadata
                    .get("location_info")
                    .and_then(|info| info.get("city"))
                    .and_then(Value::as_str)?;
                self.index
                    .find_by_name("Location", &format!("{} - {}", city, company))
            }
            "Technology" => {
                let technology = subject.meta_str("technology")?;
                self.index.find_by_name("Technology", technology)
            }
            "Person" => {
                let company = subject.company_hint();
                let persons = self.index.of_type("Person");
                if let Some(company) = company {
                    for &person in persons {
                        if person.id != subject.id && person.company_hint() == Some(company) {
                            return Some(person);
                        }
                    }
                }
                persons.iter().find(|person| person.id != subject.id).copied()
            }
            // Symmetric, data-driven types: any entity of the type serves.
            "Client" | "Product" | "Position" => self.index.first_of_type(object_type),
            // Identity-style relations: look up by the subject's own name.
            _ => {
                let name = subject.attr_str("name")?;
                self.index.by_canonical_name(name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity(kind: &str, name: &str) -> EntityRecord {
        let mut e = EntityRecord::new(ids::entity_id(kind, name), kind, "test");
        e.attributes.insert("name".into(), json!(name));
        e
    }

    fn person(name: &str, age: u64, company: &str) -> EntityRecord {
        let mut e = entity("Person", name);
        e.attributes.insert("age".into(), json!(age));
        e.metadata.insert("company".into(), json!(company));
        e
    }

    fn schema() -> EntitySchema {
        EntitySchema::from_value(json!({
            "Person": ["name", "age", "position"],
            "Company": ["name", "industry"],
            "Project": ["name", "status"],
        }))
        .unwrap()
    }

    fn spec(name: &str, signature: &[&str]) -> RelationSpec {
        RelationSpec {
            name: name.to_string(),
            signature: signature.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_works_at_links_person_to_company() {
        let entities = vec![person("Jane Doe", 30, "Acme"), entity("Company", "Acme")];
        let index = EntityIndex::build(&entities);
        let schema = schema();
        let resolver = RelationResolver::new(&index, &schema);

        let records = resolver.resolve(&spec("works_at", &["Person", "Company"]));
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.subject_id, entities[0].id);
        assert_eq!(record.object_id.as_deref(), Some(entities[1].id.as_str()));
        assert!(!record.metadata.contains_key(FALLBACK_MARKER));
        assert_eq!(record.id, format!("works_at-{}-{}", entities[0].id, entities[1].id));
    }

    #[test]
    fn test_attribute_only_signature_emits_per_subject() {
        let entities = vec![
            person("Jane Doe", 30, "Acme"),
            person("John Smith", 41, "Acme"),
        ];
        let index = EntityIndex::build(&entities);
        let schema = schema();
        let resolver = RelationResolver::new(&index, &schema);

        let records = resolver.resolve(&spec("has_age", &["Person", "age"]));
        assert_eq!(records.len(), 2);
        for (record, subject) in records.iter().zip(&entities) {
            assert!(record.object_id.is_none());
            assert_eq!(record.subject_id, subject.id);
            assert_eq!(record.metadata["age"], subject.attributes["age"]);
        }
    }

    #[test]
    fn test_missing_attribute_tag_is_omitted() {
        let entities = vec![entity("Company", "Acme")];
        let index = EntityIndex::build(&entities);
        let schema = schema();
        let resolver = RelationResolver::new(&index, &schema);

        let records = resolver.resolve(&spec("has_revenue", &["Company", "revenue"]));
        assert_eq!(records.len(), 1);
        assert!(records[0].metadata.is_empty());
    }

    #[test]
    fn test_missing_subject_type_yields_nothing() {
        let entities = vec![entity("Company", "Acme")];
        let index = EntityIndex::build(&entities);
        let schema = schema();
        let resolver = RelationResolver::new(&index, &schema);
        assert!(resolver.resolve(&spec("works_at", &["Person", "Company"])).is_empty());
    }

    #[test]
    fn test_fallback_object_is_marked() {
        let entities = vec![
            person("Jane Doe", 30, "Nowhere Inc"),
            entity("Company", "Acme"),
        ];
        let index = EntityIndex::build(&entities);
        let schema = schema();
        let resolver = RelationResolver::new(&index, &schema);

        let records = resolver.resolve(&spec("works_at", &["Person", "Company"]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].object_id.as_deref(), Some(entities[1].id.as_str()));
        assert_eq!(records[0].metadata[FALLBACK_MARKER], "fallback");
    }

    #[test]
    fn test_no_object_candidates_emit_null_object() {
        let entities = vec![person("Jane Doe", 30, "Acme")];
        let index = EntityIndex::build(&entities);
        let schema = schema();
        let resolver = RelationResolver::new(&index, &schema);

        let records = resolver.resolve(&spec("works_at", &["Person", "Company"]));
        assert_eq!(records.len(), 1);
        assert!(records[0].object_id.is_none());
        assert!(!records[0].metadata.contains_key(FALLBACK_MARKER));
    }

    #[test]
    fn test_person_prefers_colocated_colleague() {
        let entities = vec![
            person("Jane Doe", 30, "Acme"),
            person("John Smith", 41, "Beta"),
            person("Mary Major", 38, "Acme"),
        ];
        let index = EntityIndex::build(&entities);
        let schema = schema();
        let resolver = RelationResolver::new(&index, &schema);

        let records = resolver.resolve(&spec("mentors", &["Person", "Person"]));
        assert_eq!(records.len(), 3);
        // Jane's colleague at Acme is Mary, not John.
        assert_eq!(records[0].object_id.as_deref(), Some(entities[2].id.as_str()));
        // John has no colleague at Beta; any other person serves.
        assert_eq!(records[1].object_id.as_deref(), Some(entities[0].id.as_str()));
    }

    #[test]
    fn test_project_resolved_from_hint_list() {
        let mut manager = person("Jane Doe", 30, "Acme");
        manager
            .metadata
            .insert("projects".into(), json!(["Ghost", "Phoenix"]));
        let entities = vec![manager, entity("Project", "Phoenix")];
        let index = EntityIndex::build(&entities);
        let schema = schema();
        let resolver = RelationResolver::new(&index, &schema);

        let records = resolver.resolve(&spec("manages", &["Person", "Project"]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].object_id.as_deref(), Some(entities[1].id.as_str()));
        assert!(!records[0].metadata.contains_key(FALLBACK_MARKER));
    }

    #[test]
    fn test_mixed_signature_attribute_and_object() {
        let entities = vec![person("Jane Doe", 30, "Acme"), entity("Company", "Acme")];
        let index = EntityIndex::build(&entities);
        let schema = schema();
        let resolver = RelationResolver::new(&index, &schema);

        let records = resolver.resolve(&spec("employment", &["Person", "age", "Company"]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].metadata["age"], 30);
        assert!(records[0].object_id.is_some());
    }

    #[test]
    fn test_resolve_all_follows_schema_order() {
        let entities = vec![person("Jane Doe", 30, "Acme"), entity("Company", "Acme")];
        let index = EntityIndex::build(&entities);
        let schema = schema();
        let resolver = RelationResolver::new(&index, &schema);

        let relation_schema = RelationSchema::from_value(json!({
            "has_age": ["Person", "age"],
            "works_at": ["Person", "Company"],
        }))
        .unwrap();
        let records = resolver.resolve_all(&relation_schema);
        let kinds: Vec<&str> = records.iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(kinds, ["has_age", "works_at"]);
    }

    #[test]
    fn test_empty_signature_is_skipped() {
        let entities = vec![entity("Company", "Acme")];
        let index = EntityIndex::build(&entities);
        let schema = schema();
        let resolver = RelationResolver::new(&index, &schema);
        assert!(resolver.resolve(&spec("broken", &[])).is_empty());
    }
}
