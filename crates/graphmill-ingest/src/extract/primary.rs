//! Phase one: primary entities matched directly from document text.

use std::collections::HashMap;

use chrono::NaiveDate;
use graphmill_core::records::DERIVED_SENTINEL;
use graphmill_core::{ids, EntityRecord};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::normalize::DocumentUnit;
use crate::patterns::{keys, PatternLibrary};
use crate::tables::ReferenceTables;

/// Output of the text-scanning phase. The derivation phase consumes this
/// struct and nothing else.
#[derive(Debug, Default)]
pub struct PrimaryEntities {
    pub persons: Vec<EntityRecord>,
    pub companies: Vec<EntityRecord>,
    pub projects: Vec<EntityRecord>,
    pub technologies: Vec<EntityRecord>,
}

pub fn extract_primary(
    patterns: &PatternLibrary,
    tables: &ReferenceTables,
    today: NaiveDate,
    units: &[DocumentUnit],
) -> PrimaryEntities {
    let project_map = parse_person_projects(patterns, units);
    PrimaryEntities {
        persons: extract_persons(patterns, tables, units, &project_map),
        companies: extract_companies(patterns, tables, units),
        projects: extract_projects(patterns, units, today),
        technologies: scan_technologies(tables, units),
    }
}

/// Person name -> managed project names, from the auxiliary hint pattern.
fn parse_person_projects(
    patterns: &PatternLibrary,
    units: &[DocumentUnit],
) -> HashMap<String, Vec<String>> {
    let mut mapping = HashMap::new();
    for unit in units {
        for regex in patterns.for_key(keys::PERSON_PROJECTS) {
            for caps in regex.captures_iter(&unit.text) {
                let (Some(name), Some(projects)) = (caps.name("name"), caps.name("projects"))
                else {
                    continue;
                };
                let projects: Vec<String> = projects
                    .as_str()
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect();
                mapping.insert(name.as_str().trim().to_string(), projects);
            }
        }
    }
    mapping
}

fn extract_persons(
    patterns: &PatternLibrary,
    tables: &ReferenceTables,
    units: &[DocumentUnit],
    project_map: &HashMap<String, Vec<String>>,
) -> Vec<EntityRecord> {
    let mut persons = Vec::new();
    for unit in units {
        for regex in patterns.for_key(keys::PERSON) {
            for caps in regex.captures_iter(&unit.text) {
                let Some(name) = caps.name("name") else { continue };
                let name = name.as_str().trim().to_string();
                let age = caps
                    .name("age")
                    .and_then(|m| m.as_str().parse::<u64>().ok());
                let company = caps.name("company").map(|m| m.as_str().trim().to_string());
                let position = caps
                    .name("position")
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_else(|| "Associate".to_string());
                let department = tables.department_for_title(&position);
                let projects = project_map.get(&name).cloned().unwrap_or_default();

                let mut entity =
                    EntityRecord::new(ids::entity_id("Person", &name), "Person", &unit.text);
                entity.attributes.insert("name".into(), json!(name));
                if let Some(age) = age {
                    entity.attributes.insert("age".into(), json!(age));
                }
                entity.attributes.insert("position".into(), json!(position));
                entity
                    .attributes
                    .insert("department".into(), json!(department));
                if let Some(company) = &company {
                    entity.metadata.insert("company".into(), json!(company));
                }
                entity.metadata.insert("department".into(), json!(department));
                entity.metadata.insert("projects".into(), json!(projects));
                persons.push(entity);
            }
        }
    }
    persons
}

fn extract_companies(
    patterns: &PatternLibrary,
    tables: &ReferenceTables,
    units: &[DocumentUnit],
) -> Vec<EntityRecord> {
    let mut seen: Vec<String> = Vec::new();
    let mut companies = Vec::new();
    for unit in units {
        for regex in patterns.for_key(keys::COMPANY) {
            for caps in regex.captures_iter(&unit.text) {
                let Some(name) = caps.name("name") else { continue };
                let name = name.as_str().trim().to_string();
                if seen.contains(&name) {
                    continue;
                }
                seen.push(name.clone());

                let industry_raw = caps
                    .name("industry")
                    .map(|m| m.as_str().trim())
                    .unwrap_or_default();
                let mut parts = industry_raw.split(" and ").map(str::trim);
                let industry = parts.next().unwrap_or_default().to_string();
                let sector = parts.next().map(str::to_string).unwrap_or_else(|| industry.clone());
                let location_info = tables.location_for_company(&name);

                let mut entity =
                    EntityRecord::new(ids::entity_id("Company", &name), "Company", &unit.text);
                entity.attributes.insert("name".into(), json!(name));
                entity.attributes.insert("industry".into(), json!(industry));
                entity.attributes.insert("sector".into(), json!(sector));
                entity.attributes.insert(
                    "location".into(),
                    json!(location_info.map(|info| info.city.clone()).unwrap_or_else(|| "Global".to_string())),
                );
                entity
                    .metadata
                    .insert("location_info".into(), location_info_value(location_info));
                companies.push(entity);
            }
        }
    }
    companies
}

fn location_info_value(info: Option<&crate::tables::LocationInfo>) -> Value {
    match info {
        Some(info) => json!({
            "city": info.city,
            "country": info.country,
            "office_type": info.office_type,
        }),
        None => Value::Object(Map::new()),
    }
}

fn extract_projects(
    patterns: &PatternLibrary,
    units: &[DocumentUnit],
    today: NaiveDate,
) -> Vec<EntityRecord> {
    let mut projects = Vec::new();
    for unit in units {
        for regex in patterns.for_key(keys::PROJECT) {
            for caps in regex.captures_iter(&unit.text) {
                let Some(name) = caps.name("name") else { continue };
                let name = name.as_str().to_string();
                let start = caps
                    .name("start")
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                let end = caps
                    .name("end")
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();

                let status = match NaiveDate::parse_from_str(&end, "%Y-%m-%d") {
                    Ok(end_date) if end_date < today => "completed",
                    Ok(_) => "active",
                    Err(_) => {
                        warn!(
                            "Invalid project end date {:?} for {:?}; assuming active",
                            end, name
                        );
                        "active"
                    }
                };

                let mut entity =
                    EntityRecord::new(ids::entity_id("Project", &name), "Project", &unit.text);
                entity.attributes.insert("name".into(), json!(name));
                entity.attributes.insert("start_date".into(), json!(start));
                entity.attributes.insert("end_date".into(), json!(end));
                entity.attributes.insert("status".into(), json!(status));
                entity
                    .attributes
                    .insert("budget".into(), json!("unreported"));
                entity
                    .metadata
                    .insert("team".into(), json!(format!("{} Squad", name)));
                entity.metadata.insert("project".into(), json!(name));
                projects.push(entity);
            }
        }
    }
    projects
}

/// Technology spotting is a containment scan over the keyword table, not a
/// pattern match. It still belongs to the text-scanning phase so the
/// derivation phase never re-reads document text.
fn scan_technologies(tables: &ReferenceTables, units: &[DocumentUnit]) -> Vec<EntityRecord> {
    let mut seen: Vec<&str> = Vec::new();
    let mut technologies = Vec::new();
    for unit in units {
        let lower = unit.text.to_lowercase();
        for (keyword, category) in &tables.tech_categories {
            if !lower.contains(&keyword.to_lowercase()) || seen.contains(&keyword.as_str()) {
                continue;
            }
            seen.push(keyword.as_str());
            let version = format!("v{}.0", keyword.len());
            technologies.push(technology_record(keyword, category, &version, &unit.text));
        }
    }
    // Non-empty corpora always carry at least one technology so downstream
    // relations have a target; an empty document set stays empty.
    if technologies.is_empty() && !units.is_empty() {
        technologies.push(technology_record(
            "Automation",
            "Operations",
            "v1.0",
            DERIVED_SENTINEL,
        ));
    }
    technologies
}

fn technology_record(keyword: &str, category: &str, version: &str, source: &str) -> EntityRecord {
    let mut entity = EntityRecord::new(ids::entity_id("Technology", keyword), "Technology", source);
    entity.attributes.insert("name".into(), json!(keyword));
    entity.attributes.insert("category".into(), json!(category));
    entity.attributes.insert("version".into(), json!(version));
    entity
}
