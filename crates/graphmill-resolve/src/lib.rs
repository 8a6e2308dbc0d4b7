//! Entity index and the schema-generic relation resolver.

pub mod index;
pub mod relation;

pub use index::EntityIndex;
pub use relation::RelationResolver;
