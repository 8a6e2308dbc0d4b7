//! Document normalization, pattern library, and schema-driven entity
//! extraction.

pub mod extract;
pub mod normalize;
pub mod patterns;
pub mod tables;

pub use extract::EntityExtractor;
pub use normalize::{normalize_text, normalize_units, DocumentUnit};
pub use patterns::PatternLibrary;
pub use tables::ReferenceTables;
