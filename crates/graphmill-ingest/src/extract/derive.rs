//! Phase two: secondary entities synthesized from phase-one output.
//!
//! No function here reads document text. Every rule consumes already
//! extracted entities plus the static reference tables, so phase ordering
//! is enforced by the `PrimaryEntities` parameter type.

use graphmill_core::records::DERIVED_SENTINEL;
use graphmill_core::{ids, EntityRecord};
use serde_json::json;

use super::primary::PrimaryEntities;
use crate::tables::ReferenceTables;

/// Cap on synthesized Product entities; one per project up to this bound.
const MAX_PRODUCTS: usize = 10;
/// Cap on synthesized Client entities; one per company up to this bound.
const MAX_CLIENTS: usize = 6;

#[derive(Debug, Default)]
pub struct DerivedEntities {
    pub departments: Vec<EntityRecord>,
    pub positions: Vec<EntityRecord>,
    pub locations: Vec<EntityRecord>,
    pub teams: Vec<EntityRecord>,
    pub products: Vec<EntityRecord>,
    pub clients: Vec<EntityRecord>,
}

pub fn derive_secondary(primary: &PrimaryEntities, tables: &ReferenceTables) -> DerivedEntities {
    DerivedEntities {
        departments: derive_departments(&primary.persons),
        positions: derive_positions(&primary.persons, tables),
        locations: derive_locations(&primary.companies, tables),
        teams: derive_teams(&primary.projects),
        products: derive_products(&primary.projects, &primary.technologies),
        clients: derive_clients(&primary.companies, tables),
    }
}

/// One Department per distinct person department, in first-seen order.
/// Head is the first member encountered; employee_count the group size.
fn derive_departments(persons: &[EntityRecord]) -> Vec<EntityRecord> {
    let mut groups: Vec<(String, Vec<&EntityRecord>)> = Vec::new();
    for person in persons {
        let department = person
            .attr_str("department")
            .unwrap_or("General")
            .to_string();
        match groups.iter_mut().find(|(name, _)| *name == department) {
            Some((_, members)) => members.push(person),
            None => groups.push((department, vec![person])),
        }
    }

    groups
        .into_iter()
        .map(|(name, members)| {
            let head = members
                .first()
                .and_then(|m| m.attr_str("name"))
                .unwrap_or("Unknown");
            let mut entity = EntityRecord::new(
                ids::entity_id("Department", &name),
                "Department",
                DERIVED_SENTINEL,
            );
            entity.attributes.insert("name".into(), json!(name));
            entity.attributes.insert("head".into(), json!(head));
            entity
                .attributes
                .insert("employee_count".into(), json!(members.len()));
            entity
        })
        .collect()
}

/// One Position per distinct job title.
fn derive_positions(persons: &[EntityRecord], tables: &ReferenceTables) -> Vec<EntityRecord> {
    let mut seen: Vec<String> = Vec::new();
    let mut positions = Vec::new();
    for person in persons {
        let title = person.attr_str("position").unwrap_or("Associate").to_string();
        if seen.contains(&title) {
            continue;
        }
        seen.push(title.clone());
        let level = tables.level_for_title(&title);
        let mut entity = EntityRecord::new(
            ids::entity_id("Position", &title),
            "Position",
            DERIVED_SENTINEL,
        );
        entity.attributes.insert("title".into(), json!(title));
        entity.attributes.insert("level".into(), json!(level));
        entity.attributes.insert(
            "salary_range".into(),
            json!(tables.salary_range_for_level(&level)),
        );
        positions.push(entity);
    }
    positions
}

/// One Location per distinct company found in the location table; companies
/// without a table entry are skipped.
fn derive_locations(companies: &[EntityRecord], tables: &ReferenceTables) -> Vec<EntityRecord> {
    let mut seen: Vec<String> = Vec::new();
    let mut locations = Vec::new();
    for company in companies {
        let Some(company_name) = company.attr_str("name") else {
            continue;
        };
        let Some(info) = tables.location_for_company(company_name) else {
            continue;
        };
        let location_name = format!("{} - {}", info.city, company_name);
        if seen.contains(&location_name) {
            continue;
        }
        seen.push(location_name.clone());
        let mut entity = EntityRecord::new(
            ids::entity_id("Location", &location_name),
            "Location",
            DERIVED_SENTINEL,
        );
        entity.attributes.insert("name".into(), json!(location_name));
        entity.attributes.insert("city".into(), json!(info.city));
        entity.attributes.insert("country".into(), json!(info.country));
        entity
            .attributes
            .insert("office_type".into(), json!(info.office_type));
        locations.push(entity);
    }
    locations
}

/// One Team per project, named "<project> Squad".
fn derive_teams(projects: &[EntityRecord]) -> Vec<EntityRecord> {
    projects
        .iter()
        .map(|project| {
            let project_name = project.attr_str("name").unwrap_or("Project");
            let team_name = format!("{} Squad", project_name);
            let size = (project_name.len() + 2).clamp(4, 12);
            let mut entity =
                EntityRecord::new(ids::entity_id("Team", &team_name), "Team", DERIVED_SENTINEL);
            entity.attributes.insert("name".into(), json!(team_name));
            entity.attributes.insert("size".into(), json!(size));
            entity.attributes.insert(
                "focus_area".into(),
                json!(format!("Delivery of {}", project_name)),
            );
            entity
        })
        .collect()
}

/// Bounded Product synthesis: one per project up to `MAX_PRODUCTS`, with a
/// technology hint assigned round-robin.
fn derive_products(projects: &[EntityRecord], technologies: &[EntityRecord]) -> Vec<EntityRecord> {
    let tech_names: Vec<&str> = technologies
        .iter()
        .filter_map(|t| t.attr_str("name"))
        .collect();
    projects
        .iter()
        .take(MAX_PRODUCTS)
        .enumerate()
        .map(|(index, project)| {
            let name = format!("{} Platform", project.attr_str("name").unwrap_or("Project"));
            let mut entity = EntityRecord::new(
                ids::entity_id("Product", &name),
                "Product",
                DERIVED_SENTINEL,
            );
            entity.attributes.insert("name".into(), json!(name));
            entity
                .attributes
                .insert("version".into(), json!(format!("v{}.0", index + 1)));
            if let Some(release) = project.attributes.get("start_date") {
                entity
                    .attributes
                    .insert("release_date".into(), release.clone());
            }
            if !tech_names.is_empty() {
                entity.metadata.insert(
                    "technology".into(),
                    json!(tech_names[index % tech_names.len()]),
                );
            }
            entity
        })
        .collect()
}

/// Bounded Client synthesis: one per company up to `MAX_CLIENTS`, cycling
/// through the client templates.
fn derive_clients(companies: &[EntityRecord], tables: &ReferenceTables) -> Vec<EntityRecord> {
    companies
        .iter()
        .take(MAX_CLIENTS)
        .enumerate()
        .map(|(index, company)| {
            let template = &tables.client_templates[index % tables.client_templates.len()];
            let name = format!(
                "{} {}",
                company.attr_str("name").unwrap_or("Company"),
                template.name
            );
            let industry = company
                .attr_str("industry")
                .unwrap_or(&template.industry)
                .to_string();
            let mut entity = EntityRecord::new(
                ids::entity_id("Client", &name),
                "Client",
                DERIVED_SENTINEL,
            );
            entity.attributes.insert("name".into(), json!(name));
            entity
                .attributes
                .insert("contract_value".into(), json!(template.contract_value));
            entity.attributes.insert("industry".into(), json!(industry));
            entity
        })
        .collect()
}
