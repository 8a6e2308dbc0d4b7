//! Graphmill core: shared record types, schemas, ids, and errors.

pub mod error;
pub mod ids;
pub mod records;
pub mod schema;

pub use error::{Error, Result};
pub use records::{EntityRecord, RelationRecord};
pub use schema::{EntitySchema, RelationSchema, RelationSpec};
