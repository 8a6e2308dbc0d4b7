//! Static reference tables used by derivation rules.
//!
//! Pure data, never matched against input text. The tables are passed
//! explicitly into the extractor so deployments can override or extend them
//! without touching extraction or resolution logic.

use once_cell::sync::Lazy;

/// Known office location of a company.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationInfo {
    pub city: String,
    pub country: String,
    pub office_type: String,
}

/// Template for synthesized client entities.
#[derive(Debug, Clone)]
pub struct ClientTemplate {
    pub name: String,
    pub contract_value: String,
    pub industry: String,
}

/// Immutable lookup tables for entity derivation.
///
/// Keyword lists are ordered; the first matching keyword wins.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub company_locations: Vec<(String, LocationInfo)>,
    pub title_departments: Vec<(String, String)>,
    pub title_levels: Vec<(String, String)>,
    pub level_salaries: Vec<(String, String)>,
    pub tech_categories: Vec<(String, String)>,
    pub client_templates: Vec<ClientTemplate>,
}

static BUILTIN: Lazy<ReferenceTables> = Lazy::new(builtin_tables);

impl ReferenceTables {
    /// The process-wide built-in tables.
    pub fn builtin() -> &'static ReferenceTables {
        &BUILTIN
    }

    pub fn location_for_company(&self, company: &str) -> Option<&LocationInfo> {
        self.company_locations
            .iter()
            .find(|(name, _)| name == company)
            .map(|(_, info)| info)
    }

    /// Department for a job title: first keyword contained in the title,
    /// else the title's last word, else "General".
    pub fn department_for_title(&self, title: &str) -> String {
        let lower = title.to_lowercase();
        for (keyword, department) in &self.title_departments {
            if lower.contains(&keyword.to_lowercase()) {
                return department.clone();
            }
        }
        title
            .split_whitespace()
            .last()
            .unwrap_or("General")
            .to_string()
    }

    /// Seniority level for a job title; "Associate" when no keyword matches.
    pub fn level_for_title(&self, title: &str) -> String {
        let lower = title.to_lowercase();
        for (keyword, level) in &self.title_levels {
            if lower.contains(keyword.as_str()) {
                return level.clone();
            }
        }
        "Associate".to_string()
    }

    pub fn salary_range_for_level(&self, level: &str) -> String {
        self.level_salaries
            .iter()
            .find(|(known, _)| known == level)
            .map(|(_, range)| range.clone())
            .unwrap_or_else(|| "100k-130k".to_string())
    }
}

fn builtin_tables() -> ReferenceTables {
    let company_locations = [
        ("OpenAI", "San Francisco", "USA", "HQ"),
        ("Google", "Mountain View", "USA", "Campus"),
        ("Microsoft", "Redmond", "USA", "Campus"),
        ("Apple", "Cupertino", "USA", "Headquarters"),
        ("Amazon", "Seattle", "USA", "Headquarters"),
        ("Meta", "Menlo Park", "USA", "Headquarters"),
        ("Tesla", "Palo Alto", "USA", "Research"),
        ("Netflix", "Los Gatos", "USA", "Media"),
        ("Spotify", "Stockholm", "Sweden", "Product"),
        ("Uber", "San Francisco", "USA", "Operations"),
        ("IBM", "Armonk", "USA", "Research"),
        ("Oracle", "Redwood Shores", "USA", "Campus"),
        ("Salesforce", "San Francisco", "USA", "Campus"),
        ("Adobe", "San Jose", "USA", "Studio"),
        ("Intel", "Santa Clara", "USA", "Microchip Lab"),
        ("Cisco", "San Jose", "USA", "Networking"),
        ("HP", "Palo Alto", "USA", "Operations"),
        ("Dell", "Round Rock", "USA", "Manufacturing"),
        ("VMware", "Palo Alto", "USA", "Virtualization"),
        ("RedHat", "Raleigh", "USA", "Open Source Lab"),
    ]
    .into_iter()
    .map(|(name, city, country, office_type)| {
        (
            name.to_string(),
            LocationInfo {
                city: city.to_string(),
                country: country.to_string(),
                office_type: office_type.to_string(),
            },
        )
    })
    .collect();

    let title_departments = [
        ("Researcher", "Research"),
        ("Engineer", "Engineering"),
        ("Architect", "Architecture"),
        ("Manager", "Management"),
        ("Developer", "Engineering"),
        ("Director", "Leadership"),
        ("Specialist", "Operations"),
        ("Designer", "Design"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let title_levels = [
        ("senior", "Senior"),
        ("lead", "Lead"),
        ("chief", "Principal"),
        ("manager", "Manager"),
        ("director", "Director"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let level_salaries = [
        ("Senior", "130k-170k"),
        ("Lead", "150k-190k"),
        ("Principal", "170k-210k"),
        ("Manager", "120k-150k"),
        ("Director", "160k-200k"),
        ("Associate", "90k-120k"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let tech_categories = [
        ("Cloud", "Infrastructure"),
        ("AI", "Artificial Intelligence"),
        ("Data", "Analytics"),
        ("Network", "Networking"),
        ("Virtualization", "Infrastructure"),
        ("Streaming", "Media"),
        ("Transport", "Logistics"),
        ("Security", "Cybersecurity"),
        ("Automation", "Operations"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let client_templates = [
        ("Strategic Solutions", "3.2M", "Consulting"),
        ("Prime Ventures", "1.8M", "Finance"),
        ("Global Logistics", "2.4M", "Transportation"),
        ("Greenfield Retail", "1.5M", "Retail"),
        ("Unity Manufacturing", "2.9M", "Manufacturing"),
        ("NextWave Media", "2.1M", "Media"),
    ]
    .into_iter()
    .map(|(name, contract_value, industry)| ClientTemplate {
        name: name.to_string(),
        contract_value: contract_value.to_string(),
        industry: industry.to_string(),
    })
    .collect();

    ReferenceTables {
        company_locations,
        title_departments,
        title_levels,
        level_salaries,
        tech_categories,
        client_templates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_lookup() {
        let tables = ReferenceTables::builtin();
        let info = tables.location_for_company("Spotify").unwrap();
        assert_eq!(info.city, "Stockholm");
        assert_eq!(info.country, "Sweden");
        assert!(tables.location_for_company("Acme").is_none());
    }

    #[test]
    fn test_department_for_title() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.department_for_title("Senior Engineer"), "Engineering");
        assert_eq!(tables.department_for_title("researcher"), "Research");
        // No keyword: falls back to the last word of the title.
        assert_eq!(tables.department_for_title("Head of Sales"), "Sales");
    }

    #[test]
    fn test_level_and_salary() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.level_for_title("Chief Data Officer"), "Principal");
        assert_eq!(tables.level_for_title("Intern"), "Associate");
        assert_eq!(tables.salary_range_for_level("Lead"), "150k-190k");
        assert_eq!(tables.salary_range_for_level("Unknown"), "100k-130k");
    }

    #[test]
    fn test_builtin_sizes() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.company_locations.len(), 20);
        assert_eq!(tables.client_templates.len(), 6);
        assert_eq!(tables.tech_categories.len(), 9);
    }
}
