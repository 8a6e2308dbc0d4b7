//! Pattern library: compiled text patterns with named capture groups.
//!
//! Patterns are compiled once at construction and applied case-insensitively.
//! A source that fails to compile is skipped with a logged warning so a bad
//! user-supplied pattern never takes down the run.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Pattern keys understood by the built-in extractor.
pub mod keys {
    pub const PERSON: &str = "Person";
    pub const COMPANY: &str = "Company";
    pub const PROJECT: &str = "Project";
    /// Auxiliary hint pattern: maps a person to the projects they manage.
    pub const PERSON_PROJECTS: &str = "PersonProjects";
}

/// Built-in pattern sources for the business-document corpus.
const BUILTIN_SOURCES: &[(&str, &str)] = &[
    (
        keys::PERSON,
        r"(?P<name>[A-Za-z][A-Za-z ',-]+), age (?P<age>\d{1,2}), works at (?P<company>[A-Za-z0-9&’' \-]+) as a (?P<position>[^.]+)\.",
    ),
    (
        keys::COMPANY,
        r"(?P<name>[A-Za-z0-9&’' \-]+) (?:operates|specializes|focuses|works|is known for) in (?P<industry>[^.]+)\.",
    ),
    (
        keys::PROJECT,
        r"Project (?P<name>[\w-]+) (?:started|began|launched|initiated) on (?P<start>\d{4}-\d{2}-\d{2}), (?:ends|finishes|completes|concludes) (?:on )?(?P<end>\d{4}-\d{2}-\d{2})\.",
    ),
    (
        keys::PERSON_PROJECTS,
        r"(?P<name>[A-Za-z][A-Za-z ',-]+?) (?:manages|leads|oversees|supervises|coordinates|directs|handles) (?P<count>\d+) projects?: (?P<projects>[^.]+)\.",
    ),
];

static BUILTIN: Lazy<PatternLibrary> = Lazy::new(|| {
    PatternLibrary::from_sources(BUILTIN_SOURCES.iter().copied())
});

/// Ordered, keyed collection of compiled patterns. Keys are entity type
/// names plus auxiliary hint-pattern names; one key may carry several
/// patterns, each producing zero or more non-overlapping matches per unit.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    patterns: Vec<(String, Regex)>,
}

impl PatternLibrary {
    /// The process-wide built-in library.
    pub fn builtin() -> &'static PatternLibrary {
        &BUILTIN
    }

    /// Compile a library from `(key, source)` pairs, skipping malformed
    /// sources with a warning.
    pub fn from_sources<'a, I>(sources: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut library = Self { patterns: Vec::new() };
        for (key, source) in sources {
            library.register(key, source);
        }
        library
    }

    /// Compile and add one pattern. Returns false (and logs) on a malformed
    /// source.
    pub fn register(&mut self, key: &str, source: &str) -> bool {
        match RegexBuilder::new(source).case_insensitive(true).build() {
            Ok(regex) => {
                self.patterns.push((key.to_string(), regex));
                true
            }
            Err(error) => {
                warn!("Skipping malformed pattern for {:?}: {}", key, error);
                false
            }
        }
    }

    /// All compiled patterns registered under `key`, in registration order.
    pub fn for_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Regex> {
        self.patterns
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, regex)| regex)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_compiles_all_sources() {
        assert_eq!(PatternLibrary::builtin().len(), BUILTIN_SOURCES.len());
    }

    #[test]
    fn test_person_pattern_captures() {
        let library = PatternLibrary::builtin();
        let regex = library.for_key(keys::PERSON).next().unwrap();
        let caps = regex
            .captures("Jane Doe, age 30, works at Acme as a Manager.")
            .unwrap();
        assert_eq!(&caps["name"], "Jane Doe");
        assert_eq!(&caps["age"], "30");
        assert_eq!(&caps["company"], "Acme");
        assert_eq!(&caps["position"], "Manager");
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let library = PatternLibrary::builtin();
        let regex = library.for_key(keys::PROJECT).next().unwrap();
        assert!(regex.is_match("project Phoenix started on 2024-01-01, ends on 2024-06-01."));
    }

    #[test]
    fn test_malformed_source_is_skipped() {
        let library = PatternLibrary::from_sources([
            ("Person", r"(unclosed"),
            ("Company", r"(?P<name>\w+)"),
        ]);
        assert_eq!(library.len(), 1);
        assert_eq!(library.for_key("Person").count(), 0);
        assert_eq!(library.for_key("Company").count(), 1);
    }

    #[test]
    fn test_register_extends_a_key() {
        let mut library = PatternLibrary::from_sources([("Person", r"(?P<name>\w+)")]);
        assert!(library.register("Person", r"(?P<name>\d+)"));
        assert_eq!(library.for_key("Person").count(), 2);
    }
}
