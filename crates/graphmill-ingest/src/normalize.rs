//! Document normalization: raw text to atomic units.
//!
//! Splitting policy is newline-delimited lines, trimmed, empties dropped.
//! Downstream pattern matching and unit ids depend on this boundary choice,
//! so it is fixed per deployment rather than configurable per call.

/// One atomic text unit ("sentence") scanned independently by the extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUnit {
    /// 1-based position within the document set.
    pub id: usize,
    pub text: String,
}

/// Split raw text into ordered, non-empty, trimmed units. Pure function; an
/// empty input yields an empty sequence.
pub fn normalize_text(raw: &str) -> Vec<DocumentUnit> {
    normalize_units(raw.lines().map(str::to_string))
}

/// Normalize a pre-split record sequence with the same trimming policy.
pub fn normalize_units<I>(records: I) -> Vec<DocumentUnit>
where
    I: IntoIterator<Item = String>,
{
    let mut units = Vec::new();
    for record in records {
        let text = record.trim();
        if text.is_empty() {
            continue;
        }
        units.push(DocumentUnit {
            id: units.len() + 1,
            text: text.to_string(),
        });
    }
    units
}
